use crate::error::CalcError;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// ASCII decimal number, as typed into a numeric input.
    /// Matches: "12", "-3.5", "1.", ".5", "+2", "1e3", "2.5E-2"
    /// Rejects: "", ".", "-", "1e", "inf", "NaN", "1,5"
    static ref NUMBER_PATTERN: Regex =
        Regex::new(r"^[+-]?(\d+\.?\d*|\.\d+)([eE][+-]?\d+)?$").unwrap();

    /// Mixed number or simple fraction: "3/8", "1 1/2", "1-1/2", "2 3 / 4"
    static ref FRACTION_PATTERN: Regex =
        Regex::new(r"^([+-])?\s*(?:(\d+)(?:\s+|\s*-\s*))?(\d+)\s*/\s*(\d+)$").unwrap();
}

/// True when `raw` is blank after trimming.
pub fn is_blank(raw: &str) -> bool {
    raw.trim().is_empty()
}

/// Parse a finite decimal number from user text.
///
/// Stricter than `str::parse::<f64>`: infinities, NaN and anything outside
/// plain ASCII decimal notation are rejected.
pub fn parse_number(raw: &str) -> Result<f64, CalcError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CalcError::EmptyInput);
    }
    if !NUMBER_PATTERN.is_match(trimmed) {
        return Err(CalcError::InvalidNumber(trimmed.to_string()));
    }
    let value = trimmed
        .parse::<f64>()
        .map_err(|_| CalcError::InvalidNumber(trimmed.to_string()))?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CalcError::InvalidNumber(trimmed.to_string()))
    }
}

/// Parse a decimal number or a (mixed) fraction such as `1 1/2`.
pub fn parse_fraction(raw: &str) -> Result<f64, CalcError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CalcError::EmptyInput);
    }
    let caps = match FRACTION_PATTERN.captures(trimmed) {
        Some(caps) => caps,
        None => return parse_number(trimmed),
    };

    let digits = |i: usize| -> Result<f64, CalcError> {
        caps.get(i)
            .map(|m| m.as_str().parse::<f64>())
            .unwrap_or(Ok(0.0))
            .map_err(|_| CalcError::InvalidNumber(trimmed.to_string()))
    };

    let whole = digits(2)?;
    let numerator = digits(3)?;
    let denominator = digits(4)?;
    if denominator == 0.0 {
        return Err(CalcError::DivisionByZero(format!(
            "fraction '{}' has a zero denominator",
            trimmed
        )));
    }

    let magnitude = whole + numerator / denominator;
    let negative = caps.get(1).map(|m| m.as_str() == "-").unwrap_or(false);
    Ok(if negative { -magnitude } else { magnitude })
}
