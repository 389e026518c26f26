use crate::quantity::params::{AuxParams, AuxValue};
use serde::{Deserialize, Serialize};

/// The canonical value of a widget: a finite number or nothing at all.
///
/// `Empty` is distinct from zero. An empty quantity has no conversions,
/// zero converts normally.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "state", content = "value")]
pub enum Quantity {
    #[default]
    Empty,
    Value(f64),
}

impl Quantity {
    pub fn value(self) -> Option<f64> {
        match self {
            Quantity::Empty => None,
            Quantity::Value(v) => Some(v),
        }
    }

    pub fn is_empty(self) -> bool {
        matches!(self, Quantity::Empty)
    }
}

impl From<f64> for Quantity {
    fn from(v: f64) -> Self {
        if v.is_finite() {
            Quantity::Value(v)
        } else {
            Quantity::Empty
        }
    }
}

/// Single source of truth for one widget instance.
#[derive(Debug, Clone)]
pub struct CanonicalStore {
    value: Quantity,
    aux: AuxParams,
    defaults: AuxParams,
}

impl CanonicalStore {
    /// Create an empty store whose auxiliary parameters start at `defaults`.
    pub fn new(defaults: AuxParams) -> Self {
        Self {
            value: Quantity::Empty,
            aux: defaults.clone(),
            defaults,
        }
    }

    pub fn get(&self) -> Quantity {
        self.value
    }

    pub fn value(&self) -> Option<f64> {
        self.value.value()
    }

    /// Replace the canonical value. NaN and infinities are stored as empty.
    pub fn set(&mut self, value: impl Into<Quantity>) {
        self.value = value.into();
    }

    pub fn set_aux(&mut self, key: impl Into<String>, value: AuxValue) {
        self.aux.insert(key, value);
    }

    pub fn remove_aux(&mut self, key: &str) -> Option<AuxValue> {
        self.aux.remove(key)
    }

    pub fn aux(&self) -> &AuxParams {
        &self.aux
    }

    pub fn defaults(&self) -> &AuxParams {
        &self.defaults
    }

    /// Back to empty with default auxiliary parameters.
    pub fn clear(&mut self) {
        self.value = Quantity::Empty;
        self.aux = self.defaults.clone();
    }
}

impl Default for CanonicalStore {
    fn default() -> Self {
        Self::new(AuxParams::new())
    }
}
