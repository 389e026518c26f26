use serde::{Deserialize, Serialize};

/// Use `decimals` places for values whose magnitude is below `below`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PrecisionRule {
    pub below: f64,
    pub decimals: usize,
}

/// Shared decimal formatting: fixed precision with trailing-zero trimming.
///
/// Rules are checked in order; the first whose `below` exceeds the
/// magnitude of the value picks the decimal count, otherwise
/// `max_decimals` applies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayPolicy {
    #[serde(default = "default_max_decimals")]
    pub max_decimals: usize,

    #[serde(default = "default_trim")]
    pub trim_trailing_zeros: bool,

    #[serde(default)]
    pub rules: Vec<PrecisionRule>,
}

fn default_max_decimals() -> usize {
    4
}

fn default_trim() -> bool {
    true
}

impl Default for DisplayPolicy {
    fn default() -> Self {
        Self {
            max_decimals: default_max_decimals(),
            trim_trailing_zeros: default_trim(),
            rules: Vec::new(),
        }
    }
}

impl DisplayPolicy {
    pub fn with_decimals(max_decimals: usize) -> Self {
        Self {
            max_decimals,
            ..Self::default()
        }
    }

    pub fn with_rule(mut self, below: f64, decimals: usize) -> Self {
        self.rules.push(PrecisionRule { below, decimals });
        self
    }

    pub fn decimals_for(&self, value: f64) -> usize {
        let magnitude = value.abs();
        self.rules
            .iter()
            .find(|rule| magnitude < rule.below)
            .map(|rule| rule.decimals)
            .unwrap_or(self.max_decimals)
    }

    pub fn format(&self, value: f64) -> String {
        if !value.is_finite() {
            return String::new();
        }
        let decimals = self.decimals_for(value);
        let mut text = format!("{:.*}", decimals, value);
        if self.trim_trailing_zeros && text.contains('.') {
            let trimmed = text.trim_end_matches('0').trim_end_matches('.').len();
            text.truncate(trimmed);
        }
        if text.starts_with('-') && text[1..].chars().all(|c| c == '0' || c == '.') {
            text.remove(0);
        }
        text
    }
}
