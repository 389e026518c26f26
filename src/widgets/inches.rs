use crate::config::Config;
use crate::error::CalcError;
use crate::quantity::AuxParams;
use crate::sync::{AuxRule, FieldSynchronizer, Representation, UnitField};

pub const PRECISION: &str = "precision";

// (id, label, units per inch)
const LENGTH_UNITS: &[(&str, &str, f64)] = &[
    ("feet", "Feet", 1.0 / 12.0),
    ("yards", "Yards", 1.0 / 36.0),
    ("mm", "Millimetres", 25.4),
    ("cm", "Centimetres", 2.54),
    ("m", "Metres", 0.0254),
];

/// Tape-measure converter; canonical value is inches.
pub fn build(config: &Config) -> Result<FieldSynchronizer, CalcError> {
    let defaults = AuxParams::new().with(PRECISION, config.inches.precision as f64);
    let policy = &config.display.general;

    let mut sync = FieldSynchronizer::new("inches", defaults);
    sync.register(Box::new(UnitField::new("inches", "Inches", 1.0).display(policy.clone())))?
        .register(Box::new(UnitField::new("fraction", "Fraction", 1.0).representation(
            Representation::FixedFraction {
                precision_key: PRECISION.to_string(),
            },
        )))?
        .register(Box::new(
            UnitField::new("feet_inches", "Feet & inches", 1.0).representation(
                Representation::FeetInches {
                    precision_key: PRECISION.to_string(),
                },
            ),
        ))?;
    for &(id, label, per_inch) in LENGTH_UNITS {
        sync.register(Box::new(UnitField::new(id, label, per_inch).display(policy.clone())))?;
    }

    sync.set_aux_rule(PRECISION, AuxRule::Hold);
    Ok(sync)
}
