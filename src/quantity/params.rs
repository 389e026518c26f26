use crate::error::CalcError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Value of an auxiliary parameter (density key, hours per week, precision).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AuxValue {
    Number(f64),
    Text(String),
}

impl AuxValue {
    /// Interpret raw control text. Blank text yields `None` (parameter unset).
    pub fn parse(raw: &str) -> Option<AuxValue> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        match crate::sync::input::parse_number(trimmed) {
            Ok(n) => Some(AuxValue::Number(n)),
            Err(_) => Some(AuxValue::Text(trimmed.to_string())),
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            AuxValue::Number(n) => Some(*n),
            AuxValue::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            AuxValue::Text(s) => Some(s),
            AuxValue::Number(_) => None,
        }
    }
}

impl fmt::Display for AuxValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuxValue::Number(n) => write!(f, "{}", n),
            AuxValue::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<f64> for AuxValue {
    fn from(n: f64) -> Self {
        AuxValue::Number(n)
    }
}

impl From<&str> for AuxValue {
    fn from(s: &str) -> Self {
        AuxValue::Text(s.to_string())
    }
}

impl From<String> for AuxValue {
    fn from(s: String) -> Self {
        AuxValue::Text(s)
    }
}

/// Auxiliary parameters that take part in conversion without being a unit
/// of the canonical quantity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuxParams {
    values: BTreeMap<String, AuxValue>,
}

impl AuxParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<AuxValue>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&AuxValue> {
        self.values.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: AuxValue) {
        self.values.insert(key.into(), value);
    }

    pub fn remove(&mut self, key: &str) -> Option<AuxValue> {
        self.values.remove(key)
    }

    /// Numeric parameter, `OutOfRange` when unset or textual.
    pub fn number(&self, key: &str) -> Result<f64, CalcError> {
        self.values
            .get(key)
            .and_then(AuxValue::as_number)
            .filter(|n| n.is_finite())
            .ok_or_else(|| CalcError::OutOfRange(format!("parameter '{}' is not set", key)))
    }

    /// Text parameter. Numbers are accepted and rendered as text.
    pub fn text(&self, key: &str) -> Result<String, CalcError> {
        self.values
            .get(key)
            .map(|v| v.to_string())
            .ok_or_else(|| CalcError::OutOfRange(format!("parameter '{}' is not set", key)))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &AuxValue)> {
        self.values.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
