use crate::error::CalcError;
use std::collections::BTreeMap;

/// Built-in ingredient densities in grams per millilitre.
const INGREDIENT_DENSITIES: &[(&str, f64)] = &[
    ("water", 1.0),
    ("milk", 1.03),
    ("heavy cream", 0.994),
    ("honey", 1.42),
    ("maple syrup", 1.32),
    ("vegetable oil", 0.92),
    ("olive oil", 0.91),
    ("butter", 0.911),
    ("all purpose flour", 0.53),
    ("bread flour", 0.55),
    ("whole wheat flour", 0.51),
    ("granulated sugar", 0.85),
    ("brown sugar", 0.93),
    ("powdered sugar", 0.56),
    ("cocoa powder", 0.42),
    ("table salt", 1.217),
    ("rolled oats", 0.41),
    ("white rice", 0.85),
];

/// Immutable name-to-number lookup (densities, grade points, ...).
///
/// Keys are compared case-insensitively, ignoring surrounding whitespace
/// and treating `_` and `-` as spaces.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReferenceTable {
    name: String,
    entries: BTreeMap<String, f64>,
}

pub fn normalize_key(key: &str) -> String {
    key.trim()
        .to_lowercase()
        .replace(|c: char| c == '_' || c == '-', " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

impl ReferenceTable {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: BTreeMap::new(),
        }
    }

    pub fn from_entries<'a>(
        name: impl Into<String>,
        entries: impl IntoIterator<Item = (&'a str, f64)>,
    ) -> Self {
        let mut table = Self::new(name);
        for (key, value) in entries {
            table.insert(key, value);
        }
        table
    }

    pub fn ingredient_densities() -> Self {
        Self::from_entries("ingredient densities", INGREDIENT_DENSITIES.iter().copied())
    }

    /// Add or replace an entry.
    pub fn insert(&mut self, key: &str, value: f64) {
        self.entries.insert(normalize_key(key), value);
    }

    pub fn get(&self, key: &str) -> Option<f64> {
        self.entries.get(&normalize_key(key)).copied()
    }

    /// Like [`get`](Self::get), with a missing key reported as `OutOfRange`.
    pub fn lookup(&self, key: &str) -> Result<f64, CalcError> {
        self.get(key).ok_or_else(|| {
            CalcError::OutOfRange(format!("'{}' is not in the {} table", key.trim(), self.name))
        })
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(&normalize_key(key))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
