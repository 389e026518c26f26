use crate::error::CalcError;
use crate::fraction::ExactDecimal;
use crate::quantity::{AuxParams, AuxValue, CanonicalStore, Quantity};
use crate::sync::field::FieldSpec;
use crate::sync::input;
use crate::sync::observer::SyncObserver;
use log::{debug, warn};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// Field id to display string.
pub type DisplayMap = BTreeMap<String, String>;

/// What an event did to the canonical value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EditStatus {
    /// Canonical value replaced from the edited field.
    Applied,
    /// Field or widget cleared; every field is blank.
    Cleared,
    /// Text was not a number; nothing changed.
    Rejected,
    /// Text was a number but has no conversion (zero divisor, missing
    /// reference data); every field is blank.
    Unconvertible,
    /// Fields re-derived from an unchanged or rebased canonical value.
    Rederived,
}

/// Result of one event, as delivered to observers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SyncUpdate {
    pub status: EditStatus,
    pub canonical: Option<f64>,
    pub display: DisplayMap,
}

/// Which quantity survives a change of an auxiliary parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuxRule {
    /// Keep the canonical value, re-derive everything else.
    Hold,
    /// Keep the named field's value and rebase the canonical value on it.
    Preserve(String),
}

/// Serializable description of a registered field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldInfo {
    pub id: String,
    pub label: String,
    pub editable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct ActiveEdit {
    field_id: String,
    raw: String,
}

/// Keeps N fields consistent with one canonical value.
pub struct FieldSynchronizer {
    name: String,
    fields: Vec<Box<dyn FieldSpec>>,
    store: CanonicalStore,
    rules: HashMap<String, AuxRule>,
    editing: Option<ActiveEdit>,
    // Exact form of the canonical value when it came from typed decimal text
    exact: Option<ExactDecimal>,
    display: DisplayMap,
    observers: Vec<Box<dyn SyncObserver>>,
}

impl FieldSynchronizer {
    pub fn new(name: impl Into<String>, defaults: AuxParams) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
            store: CanonicalStore::new(defaults),
            rules: HashMap::new(),
            editing: None,
            exact: None,
            display: DisplayMap::new(),
            observers: Vec::new(),
        }
    }

    /// Register a field. Ids must be unique within a widget.
    pub fn register(&mut self, field: Box<dyn FieldSpec>) -> Result<&mut Self, CalcError> {
        if self.field_index(field.id()).is_ok() {
            return Err(CalcError::Config(format!(
                "field '{}' registered twice in {}",
                field.id(),
                self.name
            )));
        }
        self.display.insert(field.id().to_string(), String::new());
        self.fields.push(field);
        Ok(self)
    }

    pub fn set_aux_rule(&mut self, key: impl Into<String>, rule: AuxRule) -> &mut Self {
        self.rules.insert(key.into(), rule);
        self
    }

    pub fn subscribe(&mut self, observer: Box<dyn SyncObserver>) {
        self.observers.push(observer);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn display(&self) -> &DisplayMap {
        &self.display
    }

    pub fn canonical(&self) -> Quantity {
        self.store.get()
    }

    pub fn aux(&self) -> &AuxParams {
        self.store.aux()
    }

    pub fn fields(&self) -> impl Iterator<Item = &dyn FieldSpec> {
        self.fields.iter().map(|f| f.as_ref())
    }

    pub fn field_info(&self) -> Vec<FieldInfo> {
        self.fields()
            .map(|f| FieldInfo {
                id: f.id().to_string(),
                label: f.label().to_string(),
                editable: f.editable(),
            })
            .collect()
    }

    /// Id of the field whose raw text is currently preserved.
    pub fn editing(&self) -> Option<&str> {
        self.editing.as_ref().map(|e| e.field_id.as_str())
    }

    fn field_index(&self, field_id: &str) -> Result<usize, CalcError> {
        self.fields
            .iter()
            .position(|f| f.id() == field_id)
            .ok_or_else(|| CalcError::UnknownField(field_id.to_string()))
    }

    /// Apply user text typed into `field_id` and re-derive the other fields.
    ///
    /// Blank text empties the quantity. Text that is not a number leaves
    /// everything as it was. The edited field keeps the typed text until it
    /// is blurred or another field is edited.
    pub fn on_field_edit(&mut self, field_id: &str, raw: &str) -> Result<SyncUpdate, CalcError> {
        let index = self.field_index(field_id)?;
        let field = &self.fields[index];
        if !field.editable() {
            return Err(CalcError::ReadOnlyField(field_id.to_string()));
        }

        let status = if input::is_blank(raw) {
            self.store.set(Quantity::Empty);
            self.exact = None;
            EditStatus::Cleared
        } else {
            let converted = field.to_canonical(raw, self.store.aux());
            match converted {
                Ok(value) => {
                    self.store.set(value);
                    if self.store.get().is_empty() {
                        self.exact = None;
                        EditStatus::Unconvertible
                    } else {
                        self.exact = field.exact_canonical(raw);
                        EditStatus::Applied
                    }
                }
                Err(e) if e.is_empty_result() => {
                    debug!("{}: '{}' in {} has no conversion: {}", self.name, raw, field_id, e);
                    self.store.set(Quantity::Empty);
                    self.exact = None;
                    EditStatus::Unconvertible
                }
                Err(e) => {
                    debug!("{}: ignoring edit of {}: {}", self.name, field_id, e);
                    EditStatus::Rejected
                }
            }
        };

        self.editing = Some(ActiveEdit {
            field_id: field_id.to_string(),
            raw: raw.to_string(),
        });
        Ok(self.publish(status))
    }

    /// The field lost focus: replace its raw text with the formatted value.
    pub fn on_field_blur(&mut self, field_id: &str) -> Result<SyncUpdate, CalcError> {
        self.field_index(field_id)?;
        if self.editing() == Some(field_id) {
            self.editing = None;
        }
        Ok(self.publish(EditStatus::Rederived))
    }

    /// Change an auxiliary parameter (`None` unsets it) and apply the
    /// widget's rule for that key.
    pub fn on_aux_change(&mut self, key: &str, value: Option<AuxValue>) -> SyncUpdate {
        self.editing = None;

        let preserved = match self.rules.get(key) {
            Some(AuxRule::Preserve(field_id)) => self.preserved_unit(key, field_id),
            _ => None,
        };

        match value {
            Some(value) => self.store.set_aux(key, value),
            None => {
                self.store.remove_aux(key);
            }
        }

        if let Some((index, unit_value)) = preserved {
            self.exact = None;
            let rebased = self.fields[index].from_unit(unit_value, self.store.aux());
            match rebased {
                Ok(value) => self.store.set(value),
                Err(e) => {
                    debug!("{}: cannot rebase after {} change: {}", self.name, key, e);
                    self.store.set(Quantity::Empty);
                }
            }
        }

        self.publish(EditStatus::Rederived)
    }

    /// Like [`on_aux_change`](Self::on_aux_change) with raw control text.
    pub fn on_aux_text(&mut self, key: &str, raw: &str) -> SyncUpdate {
        self.on_aux_change(key, AuxValue::parse(raw))
    }

    fn preserved_unit(&self, key: &str, field_id: &str) -> Option<(usize, f64)> {
        let index = match self.field_index(field_id) {
            Ok(index) => index,
            Err(_) => {
                warn!(
                    "{}: rule for '{}' preserves unknown field '{}', holding canonical value",
                    self.name, key, field_id
                );
                return None;
            }
        };
        let canonical = self.store.value()?;
        self.fields[index]
            .to_unit(canonical, self.store.aux())
            .map(|unit_value| (index, unit_value))
            .ok()
    }

    /// Recompute every field from the current state.
    pub fn rederive(&mut self) -> SyncUpdate {
        self.publish(EditStatus::Rederived)
    }

    /// Empty the quantity and restore default auxiliary parameters.
    pub fn clear(&mut self) -> SyncUpdate {
        self.store.clear();
        self.editing = None;
        self.exact = None;
        self.publish(EditStatus::Cleared)
    }

    fn derive_display(&self) -> DisplayMap {
        let aux = self.store.aux();
        let canonical = self.store.value();
        self.fields
            .iter()
            .map(|field| {
                let id = field.id().to_string();
                if let Some(edit) = self.editing.as_ref().filter(|e| e.field_id == id) {
                    return (id, edit.raw.clone());
                }
                let exact = self
                    .exact
                    .and_then(|exact| field.render_exact(exact))
                    .and_then(Result::ok);
                let text = match (exact, canonical) {
                    (Some(text), _) => text,
                    (None, None) => String::new(),
                    (None, Some(value)) => field.from_canonical(value, aux).unwrap_or_else(|e| {
                        debug!("{}: {} left blank: {}", self.name, id, e);
                        String::new()
                    }),
                };
                (id, text)
            })
            .collect()
    }

    fn publish(&mut self, status: EditStatus) -> SyncUpdate {
        self.display = self.derive_display();
        let update = SyncUpdate {
            status,
            canonical: self.store.value(),
            display: self.display.clone(),
        };
        for observer in &self.observers {
            observer.on_update(&update);
        }
        update
    }
}
