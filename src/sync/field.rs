use crate::error::CalcError;
use crate::fraction::{self, ExactDecimal, InchPrecision};
use crate::quantity::AuxParams;
use crate::sync::format::DisplayPolicy;
use crate::sync::input;

/// One visible representation of a widget's canonical quantity.
///
/// Conversions are split into a numeric layer (`to_unit` / `from_unit`),
/// where the round-trip law holds to floating-point tolerance, and a text
/// layer (`parse` / `render`) that owns display precision.
pub trait FieldSpec {
    fn id(&self) -> &str;

    fn label(&self) -> &str {
        self.id()
    }

    /// Display-only fields reject edits.
    fn editable(&self) -> bool {
        true
    }

    /// Raw text to a value in this field's unit.
    fn parse(&self, raw: &str) -> Result<f64, CalcError> {
        input::parse_number(raw)
    }

    /// Value in this field's unit to the canonical value.
    fn from_unit(&self, unit_value: f64, aux: &AuxParams) -> Result<f64, CalcError>;

    /// Canonical value to this field's unit.
    fn to_unit(&self, canonical: f64, aux: &AuxParams) -> Result<f64, CalcError>;

    /// Value in this field's unit to display text.
    fn render(&self, unit_value: f64, aux: &AuxParams) -> Result<String, CalcError>;

    fn to_canonical(&self, raw: &str, aux: &AuxParams) -> Result<f64, CalcError> {
        let unit_value = self.parse(raw)?;
        self.from_unit(unit_value, aux)
    }

    fn from_canonical(&self, value: f64, aux: &AuxParams) -> Result<String, CalcError> {
        let unit_value = self.to_unit(value, aux)?;
        self.render(unit_value, aux)
    }

    /// Exact canonical value of `raw`, when this field's conversion is a
    /// plain decimal shift.
    fn exact_canonical(&self, _raw: &str) -> Option<ExactDecimal> {
        None
    }

    /// Render from an exact canonical value. `None` means the field only
    /// renders from floats.
    fn render_exact(&self, _exact: ExactDecimal) -> Option<Result<String, CalcError>> {
        None
    }
}

/// Field units per canonical unit, possibly derived from aux parameters.
pub type FactorFn = dyn Fn(&AuxParams) -> Result<f64, CalcError>;

/// How a [`UnitField`] presents its value.
#[derive(Debug, Clone, PartialEq)]
pub enum Representation {
    Decimal(DisplayPolicy),
    /// Mixed number at the denominator stored under `precision_key`.
    FixedFraction { precision_key: String },
    /// Exact reduced fraction after rounding to `decimals` places.
    ReducedFraction { decimals: u32 },
    /// `5' 3 1/2"` from a value in inches. Display-only.
    FeetInches { precision_key: String },
}

/// The stock field: a linear unit with a configurable representation.
pub struct UnitField {
    id: String,
    label: String,
    factor: Box<FactorFn>,
    // Set when the factor is exactly 10^n
    decimal_shift: Option<u32>,
    representation: Representation,
}

impl UnitField {
    /// A field worth `factor` of its units per canonical unit.
    pub fn new(id: impl Into<String>, label: impl Into<String>, factor: f64) -> Self {
        Self::with_factor(id, label, move |_| Ok(factor))
    }

    /// A field whose factor depends on auxiliary parameters.
    pub fn with_factor<F>(id: impl Into<String>, label: impl Into<String>, factor: F) -> Self
    where
        F: Fn(&AuxParams) -> Result<f64, CalcError> + 'static,
    {
        Self {
            id: id.into(),
            label: label.into(),
            factor: Box::new(factor),
            decimal_shift: None,
            representation: Representation::Decimal(DisplayPolicy::default()),
        }
    }

    /// A field worth `10^places` of its units per canonical unit. Decimal
    /// text typed here keeps its exact value for fraction fields.
    pub fn decimal(id: impl Into<String>, label: impl Into<String>, places: u32) -> Self {
        Self {
            decimal_shift: Some(places),
            ..Self::new(id, label, 10f64.powi(places as i32))
        }
    }

    pub fn representation(mut self, representation: Representation) -> Self {
        self.representation = representation;
        self
    }

    pub fn display(self, policy: DisplayPolicy) -> Self {
        self.representation(Representation::Decimal(policy))
    }

    fn factor(&self, aux: &AuxParams) -> Result<f64, CalcError> {
        let factor = (self.factor)(aux)?;
        if factor.is_finite() {
            Ok(factor)
        } else {
            Err(CalcError::DivisionByZero(format!("{} conversion factor", self.id)))
        }
    }

    fn precision(aux: &AuxParams, key: &str) -> Result<InchPrecision, CalcError> {
        InchPrecision::from_value(aux.number(key)?)
    }
}

impl FieldSpec for UnitField {
    fn id(&self) -> &str {
        &self.id
    }

    fn label(&self) -> &str {
        &self.label
    }

    fn editable(&self) -> bool {
        !matches!(self.representation, Representation::FeetInches { .. })
    }

    fn parse(&self, raw: &str) -> Result<f64, CalcError> {
        match self.representation {
            Representation::Decimal(_) => input::parse_number(raw),
            _ => input::parse_fraction(raw),
        }
    }

    fn from_unit(&self, unit_value: f64, aux: &AuxParams) -> Result<f64, CalcError> {
        let factor = self.factor(aux)?;
        if factor == 0.0 {
            return Err(CalcError::DivisionByZero(format!(
                "{} has a zero conversion factor",
                self.id
            )));
        }
        finite(unit_value / factor, &self.id)
    }

    fn to_unit(&self, canonical: f64, aux: &AuxParams) -> Result<f64, CalcError> {
        finite(canonical * self.factor(aux)?, &self.id)
    }

    fn render(&self, unit_value: f64, aux: &AuxParams) -> Result<String, CalcError> {
        match &self.representation {
            Representation::Decimal(policy) => Ok(policy.format(unit_value)),
            Representation::FixedFraction { precision_key } => {
                let precision = Self::precision(aux, precision_key)?;
                let f = fraction::to_fixed_denominator_fraction(unit_value, precision.denominator())?;
                Ok(f.to_string())
            }
            Representation::ReducedFraction { decimals } => {
                Ok(fraction::to_reduced_fraction_at(unit_value, *decimals)?.to_string())
            }
            Representation::FeetInches { precision_key } => {
                let precision = Self::precision(aux, precision_key)?;
                let f = fraction::to_fixed_denominator_fraction(unit_value, precision.denominator())?;
                let feet = f.integer_part / 12;
                let inches = fraction::FractionResult {
                    negative: false,
                    integer_part: f.integer_part % 12,
                    ..f
                };
                let sign = if f.negative { "-" } else { "" };
                Ok(format!("{}{}' {}\"", sign, feet, inches))
            }
        }
    }

    fn exact_canonical(&self, raw: &str) -> Option<ExactDecimal> {
        let places = self.decimal_shift?;
        if !matches!(self.representation, Representation::Decimal(_)) {
            return None;
        }
        ExactDecimal::parse(raw).ok()?.shifted(places)
    }

    fn render_exact(&self, exact: ExactDecimal) -> Option<Result<String, CalcError>> {
        match self.representation {
            Representation::ReducedFraction { .. } if self.decimal_shift == Some(0) => {
                Some(exact.to_fraction().map(|f| f.to_string()))
            }
            _ => None,
        }
    }
}

fn finite(value: f64, id: &str) -> Result<f64, CalcError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CalcError::OutOfRange(format!("{} result is not finite", id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inches_aux() -> AuxParams {
        AuxParams::new().with("precision", 16.0)
    }

    #[test]
    fn test_constant_factor_field() {
        let kg = UnitField::new("kg", "Kilograms", 0.001);
        let aux = AuxParams::new();
        assert_eq!(kg.from_canonical(1500.0, &aux).unwrap(), "1.5");
        assert_eq!(kg.to_canonical("2", &aux).unwrap(), 2000.0);
    }

    #[test]
    fn test_zero_factor_is_division_by_zero() {
        let weekly = UnitField::with_factor("weekly", "Weekly", |aux| aux.number("hours"));
        let aux = AuxParams::new().with("hours", 0.0);
        assert!(matches!(
            weekly.to_canonical("400", &aux),
            Err(CalcError::DivisionByZero(_))
        ));
        assert_eq!(weekly.from_canonical(20.0, &aux).unwrap(), "0");
    }

    #[test]
    fn test_overflow_is_out_of_range() {
        let kg = UnitField::new("kg", "Kilograms", 0.001);
        let aux = AuxParams::new();
        assert!(matches!(
            kg.to_canonical("1e308", &aux),
            Err(CalcError::OutOfRange(_))
        ));
        let mg = UnitField::new("mg", "Milligrams", 1000.0);
        assert!(matches!(
            mg.from_canonical(1e307, &aux),
            Err(CalcError::OutOfRange(_))
        ));
    }

    #[test]
    fn test_missing_aux_is_out_of_range() {
        let weekly = UnitField::with_factor("weekly", "Weekly", |aux| aux.number("hours"));
        assert!(matches!(
            weekly.from_canonical(20.0, &AuxParams::new()),
            Err(CalcError::OutOfRange(_))
        ));
    }

    #[test]
    fn test_fixed_fraction_representation() {
        let field = UnitField::new("fraction", "Fraction", 1.0).representation(
            Representation::FixedFraction {
                precision_key: "precision".to_string(),
            },
        );
        let aux = inches_aux();
        assert_eq!(field.from_canonical(2.5, &aux).unwrap(), "2 1/2");
        assert_eq!(field.to_canonical("1 3/8", &aux).unwrap(), 1.375);
        assert!(field.editable());
    }

    #[test]
    fn test_feet_inches_representation() {
        let field = UnitField::new("feet_inches", "Feet & inches", 1.0).representation(
            Representation::FeetInches {
                precision_key: "precision".to_string(),
            },
        );
        let aux = inches_aux();
        assert_eq!(field.from_canonical(63.5, &aux).unwrap(), "5' 3 1/2\"");
        assert_eq!(field.from_canonical(12.0, &aux).unwrap(), "1' 0\"");
        assert!(!field.editable());
    }

    #[test]
    fn test_bad_precision_blanks_fraction() {
        let field = UnitField::new("fraction", "Fraction", 1.0).representation(
            Representation::FixedFraction {
                precision_key: "precision".to_string(),
            },
        );
        let aux = AuxParams::new().with("precision", 10.0);
        assert!(matches!(
            field.from_canonical(2.5, &aux),
            Err(CalcError::OutOfRange(_))
        ));
    }
}
