use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum WidgetError {
    #[error("Unknown field '{0}'")]
    UnknownField(String),

    #[error("Field '{0}' is not a button")]
    NotAButton(String),

    #[error("Invalid value '{value}' for field '{field}': {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Value {value} for field '{field}' is outside [{start}, {end}]")]
    OutOfRange {
        field: String,
        value: f64,
        start: f64,
        end: f64,
    },

    #[error("Unknown option '{option}' for field '{field}' (expected one of: {expected})")]
    UnknownOption {
        field: String,
        option: String,
        expected: String,
    },
}

impl WidgetError {
    /// Create an invalid value error.
    pub fn invalid_value(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidValue {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, WidgetError>;
