use std::fmt;

/// Errors raised while converting between fields and the canonical value.
///
/// `EmptyInput`, `InvalidNumber`, `DivisionByZero` and `OutOfRange` are
/// contained by the synchronizer and only ever surface as blank fields.
/// The remaining variants are caller mistakes and are returned as-is.
#[derive(Debug, Clone, PartialEq)]
pub enum CalcError {
    EmptyInput,
    InvalidNumber(String),
    DivisionByZero(String),
    OutOfRange(String),
    UnknownField(String),
    ReadOnlyField(String),
    Config(String),
}

/// Coarse classification of a [`CalcError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    EmptyInput,
    InvalidNumber,
    DivisionByZero,
    OutOfRange,
    Caller,
}

impl CalcError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CalcError::EmptyInput => ErrorKind::EmptyInput,
            CalcError::InvalidNumber(_) => ErrorKind::InvalidNumber,
            CalcError::DivisionByZero(_) => ErrorKind::DivisionByZero,
            CalcError::OutOfRange(_) => ErrorKind::OutOfRange,
            CalcError::UnknownField(_) | CalcError::ReadOnlyField(_) | CalcError::Config(_) => {
                ErrorKind::Caller
            }
        }
    }

    /// True for errors that mean "this result is blank" rather than
    /// "the input was rejected".
    pub fn is_empty_result(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::EmptyInput | ErrorKind::DivisionByZero | ErrorKind::OutOfRange
        )
    }
}

impl fmt::Display for CalcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CalcError::EmptyInput => write!(f, "Empty input"),
            CalcError::InvalidNumber(text) => write!(f, "Invalid number: '{}'", text),
            CalcError::DivisionByZero(ctx) => write!(f, "Division by zero: {}", ctx),
            CalcError::OutOfRange(ctx) => write!(f, "Out of range: {}", ctx),
            CalcError::UnknownField(id) => write!(f, "Unknown field: {}", id),
            CalcError::ReadOnlyField(id) => write!(f, "Field '{}' is display-only", id),
            CalcError::Config(msg) => write!(f, "Config error: {}", msg),
        }
    }
}

impl std::error::Error for CalcError {}

impl From<toml::de::Error> for CalcError {
    fn from(e: toml::de::Error) -> Self {
        CalcError::Config(e.to_string())
    }
}

impl From<std::io::Error> for CalcError {
    fn from(e: std::io::Error) -> Self {
        CalcError::Config(e.to_string())
    }
}
