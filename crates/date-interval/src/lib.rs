//! # date-interval
//!
//! Deterministic date interval computation.
//!
//! Given two `YYYY-MM-DDTHH:MM:SS` timestamps, an interval type, and
//! optionally a conversion unit and an IANA time zone, computes the whole-day,
//! weekday, or whole-week span between them and re-expresses it in seconds,
//! minutes, hours, or years. Invalid input never panics or returns `Err` from
//! [`DateIntervalCalculator::calculate`]: it comes back as a failure result
//! carrying a human-readable message.
//!
//! ## Modules
//!
//! - [`calculator`] — Validation pipeline, interval arithmetic, weekday walk, unit conversion
//! - [`request`] — Request parameters and the interval type / conversion unit enums
//! - [`response`] — Success/failure results and their JSON wire shape
//! - [`sanitize`] — Input sanitization and message localization collaborators
//! - [`error`] — Error types

pub mod calculator;
pub mod error;
pub mod request;
pub mod response;
pub mod sanitize;

pub use calculator::{
    calculate, convert_result, CalculatorOptions, DateIntervalCalculator, Interval,
    DATE_TIME_FORMAT,
};
pub use error::CalculationError;
pub use request::{CalculationRequest, ConversionUnit, IntervalType};
pub use response::{Calculation, CalculationResult, Conversion, ConvertedValue, Envelope};
pub use sanitize::{HtmlEscaper, IdentityLocalizer, Localizer, Sanitizer};
