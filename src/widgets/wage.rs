use crate::config::Config;
use crate::error::CalcError;
use crate::quantity::AuxParams;
use crate::sync::{AuxRule, FieldSynchronizer, UnitField};

pub const HOURS_PER_WEEK: &str = "hours_per_week";
pub const DAYS_PER_WEEK: &str = "days_per_week";
pub const WEEKS_PER_YEAR: &str = "weeks_per_year";

fn hours(aux: &AuxParams) -> Result<f64, CalcError> {
    aux.number(HOURS_PER_WEEK)
}

fn hours_per_year(aux: &AuxParams) -> Result<f64, CalcError> {
    Ok(aux.number(HOURS_PER_WEEK)? * aux.number(WEEKS_PER_YEAR)?)
}

/// Pay-period converter; canonical value is the hourly wage.
pub fn build(config: &Config) -> Result<FieldSynchronizer, CalcError> {
    let defaults = AuxParams::new()
        .with(HOURS_PER_WEEK, config.wage.hours_per_week)
        .with(DAYS_PER_WEEK, config.wage.days_per_week)
        .with(WEEKS_PER_YEAR, config.wage.weeks_per_year);
    let policy = &config.display.general;

    let mut sync = FieldSynchronizer::new("wage", defaults);
    sync.register(Box::new(UnitField::new("hourly", "Hourly", 1.0).display(policy.clone())))?
        .register(Box::new(
            UnitField::with_factor("daily", "Daily", |aux| {
                let days = aux.number(DAYS_PER_WEEK)?;
                if days == 0.0 {
                    return Err(CalcError::DivisionByZero("zero days per week".to_string()));
                }
                Ok(hours(aux)? / days)
            })
            .display(policy.clone()),
        ))?
        .register(Box::new(
            UnitField::with_factor("weekly", "Weekly", hours).display(policy.clone()),
        ))?
        .register(Box::new(
            UnitField::with_factor("biweekly", "Biweekly", |aux| Ok(2.0 * hours(aux)?))
                .display(policy.clone()),
        ))?
        .register(Box::new(
            UnitField::with_factor("semimonthly", "Semimonthly", |aux| {
                Ok(hours_per_year(aux)? / 24.0)
            })
            .display(policy.clone()),
        ))?
        .register(Box::new(
            UnitField::with_factor("monthly", "Monthly", |aux| Ok(hours_per_year(aux)? / 12.0))
                .display(policy.clone()),
        ))?
        .register(Box::new(
            UnitField::with_factor("annual", "Annual", hours_per_year).display(policy.clone()),
        ))?;

    for key in [HOURS_PER_WEEK, DAYS_PER_WEEK, WEEKS_PER_YEAR] {
        sync.set_aux_rule(key, AuxRule::Hold);
    }
    Ok(sync)
}
