//! Calculation requests and the enumerations they are validated into.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CalculationError;

// ── IntervalType ────────────────────────────────────────────────────────────

/// The metric derived from the interval between two timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntervalType {
    /// Whole days between the two timestamps.
    Days,
    /// Monday-Friday days touched by a day-by-day walk from start to end.
    Weekdays,
    /// Whole weeks, i.e. `floor(days / 7)`.
    Weeks,
}

impl IntervalType {
    pub const ALL: [IntervalType; 3] = [
        IntervalType::Days,
        IntervalType::Weekdays,
        IntervalType::Weeks,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            IntervalType::Days => "days",
            IntervalType::Weekdays => "weekdays",
            IntervalType::Weeks => "weeks",
        }
    }
}

impl fmt::Display for IntervalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IntervalType {
    type Err = CalculationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        IntervalType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| CalculationError::InvalidType(s.to_string()))
    }
}

// ── ConversionUnit ──────────────────────────────────────────────────────────

/// Secondary unit a day-based result is re-expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConversionUnit {
    Seconds,
    Minutes,
    Hours,
    Years,
}

impl ConversionUnit {
    pub const ALL: [ConversionUnit; 4] = [
        ConversionUnit::Seconds,
        ConversionUnit::Minutes,
        ConversionUnit::Hours,
        ConversionUnit::Years,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ConversionUnit::Seconds => "seconds",
            ConversionUnit::Minutes => "minutes",
            ConversionUnit::Hours => "hours",
            ConversionUnit::Years => "years",
        }
    }
}

impl fmt::Display for ConversionUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConversionUnit {
    type Err = CalculationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ConversionUnit::ALL
            .into_iter()
            .find(|u| u.as_str() == s)
            .ok_or_else(|| CalculationError::InvalidConversionUnit(s.to_string()))
    }
}

// ── CalculationRequest ──────────────────────────────────────────────────────

/// The raw parameters of one calculation.
///
/// Fields hold the caller's strings untouched; sanitization and validation
/// happen inside [`DateIntervalCalculator`](crate::DateIntervalCalculator) so
/// that bad values come back as failure results rather than decode errors.
///
/// Deserializes from the wire shape:
///
/// ```
/// use date_interval::CalculationRequest;
///
/// let req: CalculationRequest = serde_json::from_str(
///     r#"{"startDateTime":"2024-01-01T00:00:00","endDateTime":"2024-01-08T00:00:00","type":"days"}"#,
/// )
/// .unwrap();
/// assert_eq!(req.interval_type(), "days");
/// assert_eq!(req.time_zone(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationRequest {
    start_date_time: String,
    end_date_time: String,
    #[serde(rename = "type")]
    interval_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    conversion_unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    time_zone: Option<String>,
}

impl CalculationRequest {
    pub fn new(
        start_date_time: impl Into<String>,
        end_date_time: impl Into<String>,
        interval_type: impl Into<String>,
    ) -> Self {
        Self {
            start_date_time: start_date_time.into(),
            end_date_time: end_date_time.into(),
            interval_type: interval_type.into(),
            conversion_unit: None,
            time_zone: None,
        }
    }

    pub fn with_conversion_unit(mut self, unit: impl Into<String>) -> Self {
        self.conversion_unit = Some(unit.into());
        self
    }

    pub fn with_time_zone(mut self, zone: impl Into<String>) -> Self {
        self.time_zone = Some(zone.into());
        self
    }

    pub fn start_date_time(&self) -> &str {
        &self.start_date_time
    }

    pub fn end_date_time(&self) -> &str {
        &self.end_date_time
    }

    pub fn interval_type(&self) -> &str {
        &self.interval_type
    }

    pub fn conversion_unit(&self) -> Option<&str> {
        self.conversion_unit.as_deref()
    }

    pub fn time_zone(&self) -> Option<&str> {
        self.time_zone.as_deref()
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
