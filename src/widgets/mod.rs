// Widget definitions: each widget is a FieldSynchronizer with a fixed field
// list, auxiliary defaults and explicit rules for auxiliary changes.

pub mod cooking;
pub mod inches;
pub mod percent;
pub mod wage;


use crate::config::Config;
use crate::error::CalcError;
use crate::sync::FieldSynchronizer;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum WidgetKind {
    Cooking,
    Wage,
    Inches,
    Percent,
}

impl WidgetKind {
    pub const ALL: [WidgetKind; 4] = [
        WidgetKind::Cooking,
        WidgetKind::Wage,
        WidgetKind::Inches,
        WidgetKind::Percent,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            WidgetKind::Cooking => "cooking",
            WidgetKind::Wage => "wage",
            WidgetKind::Inches => "inches",
            WidgetKind::Percent => "percent",
        }
    }
}

impl fmt::Display for WidgetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for WidgetKind {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == wanted)
            .ok_or_else(|| CalcError::Config(format!("unknown widget '{}'", s.trim())))
    }
}

/// Build a fresh synchronizer for `kind` from configuration.
pub fn build(kind: WidgetKind, config: &Config) -> Result<FieldSynchronizer, CalcError> {
    match kind {
        WidgetKind::Cooking => cooking::build(config),
        WidgetKind::Wage => wage::build(config),
        WidgetKind::Inches => inches::build(config),
        WidgetKind::Percent => percent::build(config),
    }
}
