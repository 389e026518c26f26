use crate::config::Config;
use crate::error::CalcError;
use crate::quantity::AuxParams;
use crate::sync::{FieldSynchronizer, Representation, UnitField};

/// Percentage converter; canonical value is the plain ratio.
pub fn build(config: &Config) -> Result<FieldSynchronizer, CalcError> {
    let display = &config.display;

    let mut sync = FieldSynchronizer::new("percent", AuxParams::new());
    sync.register(Box::new(
        UnitField::decimal("percent", "Percent", 2).display(display.percent.clone()),
    ))?
    .register(Box::new(
        UnitField::decimal("decimal", "Decimal", 0).display(display.general.clone()),
    ))?
    .register(Box::new(UnitField::decimal("fraction", "Fraction", 0).representation(
        Representation::ReducedFraction {
            decimals: display.fraction_decimals,
        },
    )))?
    .register(Box::new(
        UnitField::decimal("per_mille", "Per mille", 3).display(display.percent.clone()),
    ))?;
    Ok(sync)
}
