//! Error types for date interval calculations.
//!
//! Display strings are the user-visible messages carried by failure results,
//! so they stay fixed regardless of which input triggered them. The offending
//! (already sanitized) input is kept on the variant for logging and for
//! library callers.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalculationError {
    #[error("Invalid date format. Use YYYY-MM-DDTHH:MM:SS.")]
    InvalidDateFormat(String),

    #[error("Invalid timezone specified.")]
    InvalidTimeZone(String),

    #[error("Invalid type specified.")]
    InvalidType(String),

    #[error("Invalid unit specified.")]
    InvalidConversionUnit(String),

    #[error("Unable to parse date: {0}")]
    UnexpectedParsingFailure(String),
}

impl CalculationError {
    /// Stable name of the error kind, used as a tracing field.
    pub fn kind(&self) -> &'static str {
        match self {
            CalculationError::InvalidDateFormat(_) => "invalid_date_format",
            CalculationError::InvalidTimeZone(_) => "invalid_time_zone",
            CalculationError::InvalidType(_) => "invalid_type",
            CalculationError::InvalidConversionUnit(_) => "invalid_conversion_unit",
            CalculationError::UnexpectedParsingFailure(_) => "unexpected_parsing_failure",
        }
    }

    /// The rejected input, or the failure detail for `UnexpectedParsingFailure`.
    pub fn input(&self) -> &str {
        match self {
            CalculationError::InvalidDateFormat(s)
            | CalculationError::InvalidTimeZone(s)
            | CalculationError::InvalidType(s)
            | CalculationError::InvalidConversionUnit(s)
            | CalculationError::UnexpectedParsingFailure(s) => s,
        }
    }
}

pub type Result<T> = std::result::Result<T, CalculationError>;
