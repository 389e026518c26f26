use crate::error::CalcError;
use serde::Serialize;
use std::fmt;
use std::num::NonZeroU64;

/// An exact fraction split into integer and proper fractional parts.
///
/// Invariants: `numerator < denominator`, and `numerator / denominator` is
/// fully reduced. A zero numerator is stored with denominator 1 and renders
/// integer-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FractionResult {
    pub negative: bool,
    pub integer_part: u64,
    pub numerator: u64,
    pub denominator: u64,
}

impl FractionResult {
    pub const ZERO: FractionResult = FractionResult {
        negative: false,
        integer_part: 0,
        numerator: 0,
        denominator: 1,
    };

    /// Build from an improper ratio `num / den`, reducing by the gcd.
    pub(crate) fn from_ratio(negative: bool, num: u128, den: u128) -> Result<Self, CalcError> {
        if den == 0 {
            return Err(CalcError::DivisionByZero("fraction denominator".to_string()));
        }
        let g = super::renderer::gcd(num, den);
        let (num, den) = (num / g, den / g);
        let overflow = || CalcError::OutOfRange(format!("fraction {}/{} is too large", num, den));

        let integer_part = u64::try_from(num / den).map_err(|_| overflow())?;
        let numerator = u64::try_from(num % den).map_err(|_| overflow())?;
        let denominator = if numerator == 0 {
            1
        } else {
            u64::try_from(den).map_err(|_| overflow())?
        };

        Ok(Self {
            negative: negative && (integer_part != 0 || numerator != 0),
            integer_part,
            numerator,
            denominator,
        })
    }

    pub fn is_whole(&self) -> bool {
        self.numerator == 0
    }

    /// Improper form as a signed numerator over the denominator.
    pub fn improper(&self) -> (i128, u64) {
        let magnitude =
            self.integer_part as i128 * self.denominator as i128 + self.numerator as i128;
        let signed = if self.negative { -magnitude } else { magnitude };
        (signed, self.denominator)
    }

    pub fn to_f64(&self) -> f64 {
        let magnitude = self.integer_part as f64 + self.numerator as f64 / self.denominator as f64;
        if self.negative {
            -magnitude
        } else {
            magnitude
        }
    }

    /// `25/2` rather than `12 1/2`.
    pub fn to_improper_string(&self) -> String {
        let (num, den) = self.improper();
        if den == 1 {
            num.to_string()
        } else {
            format!("{}/{}", num, den)
        }
    }
}

impl fmt::Display for FractionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negative {
            write!(f, "-")?;
        }
        match (self.integer_part, self.numerator) {
            (whole, 0) => write!(f, "{}", whole),
            (0, num) => write!(f, "{}/{}", num, self.denominator),
            (whole, num) => write!(f, "{} {}/{}", whole, num, self.denominator),
        }
    }
}

/// Denominators offered for length fractions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InchPrecision {
    Half,
    Quarter,
    Eighth,
    #[default]
    Sixteenth,
    ThirtySecond,
    SixtyFourth,
}

impl InchPrecision {
    pub const ALL: [InchPrecision; 6] = [
        InchPrecision::Half,
        InchPrecision::Quarter,
        InchPrecision::Eighth,
        InchPrecision::Sixteenth,
        InchPrecision::ThirtySecond,
        InchPrecision::SixtyFourth,
    ];

    pub fn denominator(self) -> NonZeroU64 {
        let d = match self {
            InchPrecision::Half => 2,
            InchPrecision::Quarter => 4,
            InchPrecision::Eighth => 8,
            InchPrecision::Sixteenth => 16,
            InchPrecision::ThirtySecond => 32,
            InchPrecision::SixtyFourth => 64,
        };
        NonZeroU64::new(d).unwrap_or(NonZeroU64::MIN)
    }

    pub fn from_denominator(denominator: u64) -> Result<Self, CalcError> {
        Self::ALL
            .into_iter()
            .find(|p| p.denominator().get() == denominator)
            .ok_or_else(|| {
                CalcError::OutOfRange(format!(
                    "precision 1/{} is not one of 1/2 .. 1/64",
                    denominator
                ))
            })
    }

    /// Accept a numeric aux value such as `16.0`.
    pub fn from_value(value: f64) -> Result<Self, CalcError> {
        if value.fract() != 0.0 || value < 1.0 || !value.is_finite() {
            return Err(CalcError::OutOfRange(format!(
                "precision {} is not a whole denominator",
                value
            )));
        }
        Self::from_denominator(value as u64)
    }
}
