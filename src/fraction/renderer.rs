use crate::error::CalcError;
use crate::fraction::types::FractionResult;
use crate::sync::input::parse_number;
use std::num::NonZeroU64;

/// Greatest common divisor (Euclid). `gcd(0, d) == d`.
pub fn gcd(mut a: u128, mut b: u128) -> u128 {
    while b != 0 {
        let r = a % b;
        a = b;
        b = r;
    }
    a
}

/// Round `value` to the nearest `1/denominator` and reduce.
///
/// A remainder that rounds up to a whole unit carries into the integer part
/// (0.999 at halves is `1`, not `0 2/2`).
pub fn to_fixed_denominator_fraction(
    value: f64,
    denominator: NonZeroU64,
) -> Result<FractionResult, CalcError> {
    if !value.is_finite() {
        return Err(CalcError::OutOfRange(format!("{} has no fraction form", value)));
    }
    let magnitude = value.abs();
    if magnitude >= u64::MAX as f64 {
        return Err(CalcError::OutOfRange(format!("{} is too large", value)));
    }

    let d = denominator.get();
    let mut integer_part = magnitude.floor() as u64;
    let remainder = magnitude - magnitude.floor();
    let mut numerator = (remainder * d as f64).round() as u64;
    if numerator >= d {
        integer_part = integer_part.checked_add(1).ok_or_else(|| {
            CalcError::OutOfRange(format!("{} is too large", value))
        })?;
        numerator = 0;
    }

    let g = gcd(numerator as u128, d as u128) as u64;
    let (numerator, reduced_den) = (numerator / g, d / g);
    Ok(FractionResult {
        negative: value < 0.0 && (integer_part != 0 || numerator != 0),
        integer_part,
        numerator,
        denominator: if numerator == 0 { 1 } else { reduced_den },
    })
}

/// A decimal string held as `digits / 10^scale`, parsed without going
/// through binary floating point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExactDecimal {
    pub negative: bool,
    pub digits: u128,
    pub scale: u32,
}

/// 10^38 is the largest power of ten that fits in u128.
const MAX_SCALE: u32 = 38;

impl ExactDecimal {
    pub fn parse(text: &str) -> Result<Self, CalcError> {
        // Reuse the input grammar so exact and float parsing agree on what a number is.
        parse_number(text)?;
        let trimmed = text.trim();
        let too_large = || CalcError::OutOfRange(format!("'{}' has too many digits", trimmed));

        let (negative, unsigned) = match trimmed.as_bytes()[0] {
            b'-' => (true, &trimmed[1..]),
            b'+' => (false, &trimmed[1..]),
            _ => (false, trimmed),
        };
        let (mantissa, exponent) = match unsigned.find(&['e', 'E'][..]) {
            Some(pos) => {
                let exp = unsigned[pos + 1..]
                    .parse::<i64>()
                    .map_err(|_| too_large())?;
                (&unsigned[..pos], exp)
            }
            None => (unsigned, 0),
        };
        let (int_digits, frac_digits) = match mantissa.find('.') {
            Some(pos) => (&mantissa[..pos], &mantissa[pos + 1..]),
            None => (mantissa, ""),
        };

        let mut digits: u128 = 0;
        for c in int_digits.chars().chain(frac_digits.chars()) {
            let d = c.to_digit(10).ok_or_else(|| CalcError::InvalidNumber(trimmed.to_string()))?;
            digits = digits
                .checked_mul(10)
                .and_then(|v| v.checked_add(d as u128))
                .ok_or_else(too_large)?;
        }

        if digits == 0 {
            return Ok(Self {
                negative,
                digits,
                scale: 0,
            });
        }

        let mut scale = (frac_digits.len() as i64)
            .checked_sub(exponent)
            .ok_or_else(too_large)?;
        if scale < 0 {
            let shift = u32::try_from(scale.unsigned_abs()).map_err(|_| too_large())?;
            let factor = 10u128.checked_pow(shift).ok_or_else(too_large)?;
            digits = digits.checked_mul(factor).ok_or_else(too_large)?;
            scale = 0;
        }
        let scale = u32::try_from(scale).map_err(|_| too_large())?;
        Self {
            negative,
            digits,
            scale,
        }
        .normalized()
        .ok_or_else(too_large)
    }

    /// Drop trailing zero digits until the scale fits a u128 power of ten.
    fn normalized(mut self) -> Option<Self> {
        while self.scale > MAX_SCALE {
            if self.digits % 10 != 0 {
                return None;
            }
            self.digits /= 10;
            self.scale -= 1;
        }
        Some(self)
    }

    /// Divide by `10^places` exactly.
    pub fn shifted(self, places: u32) -> Option<Self> {
        Self {
            scale: self.scale.checked_add(places)?,
            ..self
        }
        .normalized()
    }

    pub fn to_fraction(self) -> Result<FractionResult, CalcError> {
        let den = 10u128
            .checked_pow(self.scale)
            .ok_or_else(|| CalcError::OutOfRange("decimal scale too large".to_string()))?;
        FractionResult::from_ratio(self.negative, self.digits, den)
    }
}

/// Reduce a decimal string exactly: `"0.1"` is 1/10, `"12.5"` is 12 1/2.
pub fn to_reduced_fraction(text: &str) -> Result<FractionResult, CalcError> {
    ExactDecimal::parse(text)?.to_fraction()
}

/// Round `value` to `decimal_places`, then reduce the resulting decimal
/// string exactly.
pub fn to_reduced_fraction_at(value: f64, decimal_places: u32) -> Result<FractionResult, CalcError> {
    if !value.is_finite() {
        return Err(CalcError::OutOfRange(format!("{} has no fraction form", value)));
    }
    let text = format!("{:.*}", decimal_places as usize, value);
    to_reduced_fraction(&text)
}

/// Interpret `text` as a percentage: `"12.5"` is 125/1000, reduced to 1/8.
pub fn percent_to_fraction(text: &str) -> Result<FractionResult, CalcError> {
    ExactDecimal::parse(text)?
        .shifted(2)
        .ok_or_else(|| CalcError::OutOfRange(format!("'{}' has too many digits", text.trim())))?
        .to_fraction()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn denom(d: u64) -> NonZeroU64 {
        NonZeroU64::new(d).unwrap()
    }

    #[test]
    fn test_gcd() {
        assert_eq!(gcd(0, 8), 8);
        assert_eq!(gcd(8, 0), 8);
        assert_eq!(gcd(125, 1000), 125);
        assert_eq!(gcd(17, 5), 1);
    }

    #[test]
    fn test_exact_decimal_parse() {
        let d = ExactDecimal::parse("12.50").unwrap();
        assert_eq!((d.negative, d.digits, d.scale), (false, 1250, 2));

        let d = ExactDecimal::parse("-.5").unwrap();
        assert_eq!((d.negative, d.digits, d.scale), (true, 5, 1));

        let d = ExactDecimal::parse("1.5e-3").unwrap();
        assert_eq!((d.digits, d.scale), (15, 4));

        let d = ExactDecimal::parse("2e3").unwrap();
        assert_eq!((d.digits, d.scale), (2000, 0));

        assert!(matches!(
            ExactDecimal::parse("abc"),
            Err(CalcError::InvalidNumber(_))
        ));
        assert!(matches!(
            ExactDecimal::parse("1e60"),
            Err(CalcError::OutOfRange(_))
        ));
    }

    #[test]
    fn test_extreme_exponents_do_not_overflow() {
        assert!(matches!(
            to_reduced_fraction("0.55e-9223372036854775807"),
            Err(CalcError::OutOfRange(_))
        ));
        assert!(to_reduced_fraction("5e9223372036854775807").is_err());
        assert_eq!(
            percent_to_fraction("0e-9223372036854775808").unwrap(),
            FractionResult::ZERO
        );
    }

    #[test]
    fn test_to_reduced_fraction_forms() {
        assert_eq!(to_reduced_fraction("0.25").unwrap().to_string(), "1/4");
        assert_eq!(to_reduced_fraction("-0.75").unwrap().to_string(), "-3/4");
        assert_eq!(to_reduced_fraction("3").unwrap().to_string(), "3");
        assert_eq!(to_reduced_fraction("0").unwrap(), FractionResult::ZERO);
    }

    #[test]
    fn test_to_reduced_fraction_at_rounds_first() {
        let third = to_reduced_fraction_at(1.0 / 3.0, 2).unwrap();
        assert_eq!(third.to_string(), "33/100");
        let eighth = to_reduced_fraction_at(0.125, 6).unwrap();
        assert_eq!(eighth.to_string(), "1/8");
    }

    #[test]
    fn test_percent_to_fraction_small_values() {
        assert_eq!(percent_to_fraction("50").unwrap().to_string(), "1/2");
        assert_eq!(percent_to_fraction("0.1").unwrap().to_string(), "1/1000");
        assert_eq!(percent_to_fraction("150").unwrap().to_string(), "1 1/2");
    }

    #[test]
    fn test_fixed_denominator_negative() {
        let f = to_fixed_denominator_fraction(-1.5, denom(4)).unwrap();
        assert_eq!(f.to_string(), "-1 1/2");
        let f = to_fixed_denominator_fraction(-0.01, denom(4)).unwrap();
        assert_eq!(f.to_string(), "0");
    }

    #[test]
    fn test_fixed_denominator_rejects_non_finite() {
        assert!(to_fixed_denominator_fraction(f64::NAN, denom(16)).is_err());
        assert!(to_fixed_denominator_fraction(f64::INFINITY, denom(16)).is_err());
    }
}
