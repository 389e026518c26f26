use crate::error::CalcError;
use crate::sync::format::DisplayPolicy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Config {
    // Number formatting shared by all widgets
    #[serde(default)]
    pub display: DisplayConfig,

    #[serde(default)]
    pub cooking: CookingConfig,

    #[serde(default)]
    pub wage: WageConfig,

    #[serde(default)]
    pub inches: InchesConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DisplayConfig {
    // Decimal fields
    #[serde(default)]
    pub general: DisplayPolicy,

    // Percentage fields; thresholds here are cosmetic, not domain rules
    #[serde(default = "default_percent_policy")]
    pub percent: DisplayPolicy,

    // Decimal places kept before reducing to an exact fraction
    #[serde(default = "default_fraction_decimals")]
    pub fraction_decimals: u32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            general: DisplayPolicy::default(),
            percent: default_percent_policy(),
            fraction_decimals: default_fraction_decimals(),
        }
    }
}

fn default_percent_policy() -> DisplayPolicy {
    DisplayPolicy::with_decimals(2)
}

fn default_fraction_decimals() -> u32 {
    10
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CookingConfig {
    #[serde(default = "default_ingredient")]
    pub default_ingredient: String,

    // Extra or overriding densities, grams per millilitre
    #[serde(default)]
    pub ingredients: HashMap<String, f64>,
}

impl Default for CookingConfig {
    fn default() -> Self {
        Self {
            default_ingredient: default_ingredient(),
            ingredients: HashMap::new(),
        }
    }
}

fn default_ingredient() -> String {
    "water".to_string()
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct WageConfig {
    #[serde(default = "default_hours_per_week")]
    pub hours_per_week: f64,

    #[serde(default = "default_days_per_week")]
    pub days_per_week: f64,

    #[serde(default = "default_weeks_per_year")]
    pub weeks_per_year: f64,
}

impl Default for WageConfig {
    fn default() -> Self {
        Self {
            hours_per_week: default_hours_per_week(),
            days_per_week: default_days_per_week(),
            weeks_per_year: default_weeks_per_year(),
        }
    }
}

fn default_hours_per_week() -> f64 {
    40.0
}

fn default_days_per_week() -> f64 {
    5.0
}

fn default_weeks_per_year() -> f64 {
    52.0
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct InchesConfig {
    // Fraction denominator: 2, 4, 8, 16, 32 or 64
    #[serde(default = "default_precision")]
    pub precision: u64,
}

impl Default for InchesConfig {
    fn default() -> Self {
        Self {
            precision: default_precision(),
        }
    }
}

fn default_precision() -> u64 {
    16
}

impl Config {
    pub fn load_from_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self, CalcError> {
        let content = std::fs::read_to_string(path)?;
        Self::load_from_str(&content)
    }

    pub fn load_from_str(content: &str) -> Result<Self, CalcError> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn empty() -> Self {
        Self::default()
    }

    fn validate(&self) -> Result<(), CalcError> {
        crate::fraction::InchPrecision::from_denominator(self.inches.precision)
            .map_err(|e| CalcError::Config(format!("inches.precision: {}", e)))?;
        for (name, density) in &self.cooking.ingredients {
            if !density.is_finite() || *density < 0.0 {
                return Err(CalcError::Config(format!(
                    "cooking.ingredients.{}: density must be a non-negative number",
                    name
                )));
            }
        }
        Ok(())
    }
}
