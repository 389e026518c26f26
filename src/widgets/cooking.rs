use crate::config::Config;
use crate::error::CalcError;
use crate::quantity::AuxParams;
use crate::reference::ReferenceTable;
use crate::sync::{AuxRule, FieldSynchronizer, UnitField};
use log::warn;
use std::rc::Rc;

pub const INGREDIENT: &str = "ingredient";

// (id, label, units per gram)
const MASS_UNITS: &[(&str, &str, f64)] = &[
    ("g", "Grams", 1.0),
    ("kg", "Kilograms", 0.001),
    ("mg", "Milligrams", 1000.0),
    ("oz", "Ounces", 1.0 / 28.349523125),
    ("lb", "Pounds", 1.0 / 453.59237),
];

// (id, label, millilitres per unit), US customary
const VOLUME_UNITS: &[(&str, &str, f64)] = &[
    ("ml", "Millilitres", 1.0),
    ("l", "Litres", 1000.0),
    ("tsp", "Teaspoons", 4.92892159375),
    ("tbsp", "Tablespoons", 14.78676478125),
    ("fl_oz", "Fluid ounces", 29.5735295625),
    ("cup", "Cups", 236.5882365),
];

/// Built-in densities with configured entries layered on top.
pub fn density_table(config: &Config) -> ReferenceTable {
    let mut table = ReferenceTable::ingredient_densities();
    for (name, density) in &config.cooking.ingredients {
        table.insert(name, *density);
    }
    table
}

fn density(table: &ReferenceTable, aux: &AuxParams) -> Result<f64, CalcError> {
    let ingredient = aux.text(INGREDIENT)?;
    let density = table.lookup(&ingredient)?;
    if density == 0.0 {
        return Err(CalcError::DivisionByZero(format!(
            "'{}' has zero density",
            ingredient
        )));
    }
    Ok(density)
}

/// Mass/volume converter; canonical value is grams.
pub fn build(config: &Config) -> Result<FieldSynchronizer, CalcError> {
    let table = Rc::new(density_table(config));
    let ingredient = config.cooking.default_ingredient.as_str();
    if !table.contains(ingredient) {
        warn!(
            "default ingredient '{}' has no density, volume fields start blank",
            ingredient
        );
    }

    let policy = &config.display.general;
    let mut sync = FieldSynchronizer::new("cooking", AuxParams::new().with(INGREDIENT, ingredient));

    for &(id, label, per_gram) in MASS_UNITS {
        sync.register(Box::new(UnitField::new(id, label, per_gram).display(policy.clone())))?;
    }
    for &(id, label, ml_per_unit) in VOLUME_UNITS {
        let table = Rc::clone(&table);
        let field = UnitField::with_factor(id, label, move |aux| {
            Ok(1.0 / (density(&table, aux)? * ml_per_unit))
        });
        sync.register(Box::new(field.display(policy.clone())))?;
    }

    sync.set_aux_rule(INGREDIENT, AuxRule::Hold);
    Ok(sync)
}
