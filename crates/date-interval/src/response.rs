//! Calculation results and their wire representation.
//!
//! A result serializes to the record the calling application consumes:
//!
//! ```json
//! {"success":true,"type":"days","result":7,"conversionUnit":"hours","convertedResult":168}
//! {"success":false,"result":"Invalid type specified."}
//! ```
//!
//! The wire response wraps that record in a one-element array; see
//! [`CalculationResult::into_envelope`].

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use crate::request::{ConversionUnit, IntervalType};

/// A converted result: whole for exact values, fractional otherwise.
///
/// Serializes as a bare JSON number (`168`, `1`, `0.019178082191780823`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ConvertedValue {
    Whole(i64),
    Fractional(f64),
}

/// The secondary-unit part of a successful calculation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Conversion {
    pub unit: ConversionUnit,
    pub value: ConvertedValue,
}

/// A successful calculation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Calculation {
    pub interval_type: IntervalType,
    /// Day, weekday, or week count depending on `interval_type`.
    pub result: i64,
    pub conversion: Option<Conversion>,
}

/// Outcome of one calculation: exactly one of the two shapes.
#[derive(Debug, Clone, PartialEq)]
pub enum CalculationResult {
    Success(Calculation),
    Failure { message: String },
}

/// The wire response: a single-element array holding one result.
pub type Envelope = [CalculationResult; 1];

impl CalculationResult {
    pub fn is_success(&self) -> bool {
        matches!(self, CalculationResult::Success(_))
    }

    pub fn calculation(&self) -> Option<&Calculation> {
        match self {
            CalculationResult::Success(calc) => Some(calc),
            CalculationResult::Failure { .. } => None,
        }
    }

    /// The failure message, if this is a failure.
    pub fn message(&self) -> Option<&str> {
        match self {
            CalculationResult::Success(_) => None,
            CalculationResult::Failure { message } => Some(message),
        }
    }

    /// Wrap the result for callers that expect the indexed-collection response.
    pub fn into_envelope(self) -> Envelope {
        [self]
    }
}

impl From<Calculation> for CalculationResult {
    fn from(calc: Calculation) -> Self {
        CalculationResult::Success(calc)
    }
}

impl Serialize for CalculationResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CalculationResult::Success(calc) => {
                let len = if calc.conversion.is_some() { 5 } else { 3 };
                let mut map = serializer.serialize_map(Some(len))?;
                map.serialize_entry("success", &true)?;
                map.serialize_entry("type", &calc.interval_type)?;
                map.serialize_entry("result", &calc.result)?;
                if let Some(conv) = &calc.conversion {
                    map.serialize_entry("conversionUnit", &conv.unit)?;
                    map.serialize_entry("convertedResult", &conv.value)?;
                }
                map.end()
            }
            CalculationResult::Failure { message } => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("success", &false)?;
                map.serialize_entry("result", message)?;
                map.end()
            }
        }
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn days(result: i64) -> Calculation {
        Calculation {
            interval_type: IntervalType::Days,
            result,
            conversion: None,
        }
    }

    #[test]
    fn test_success_serializes_in_wire_order() {
        let res = CalculationResult::from(days(7));
        let json = serde_json::to_string(&res).unwrap();
        assert_eq!(json, r#"{"success":true,"type":"days","result":7}"#);
    }

    #[test]
    fn test_success_with_conversion() {
        let res = CalculationResult::from(Calculation {
            conversion: Some(Conversion {
                unit: ConversionUnit::Hours,
                value: ConvertedValue::Whole(168),
            }),
            ..days(7)
        });
        let json = serde_json::to_string(&res).unwrap();
        assert_eq!(
            json,
            r#"{"success":true,"type":"days","result":7,"conversionUnit":"hours","convertedResult":168}"#
        );
    }

    #[test]
    fn test_fractional_value_serializes_as_number() {
        let res = CalculationResult::from(Calculation {
            interval_type: IntervalType::Weeks,
            result: 26,
            conversion: Some(Conversion {
                unit: ConversionUnit::Years,
                value: ConvertedValue::Fractional(0.5),
            }),
        });
        let json = serde_json::to_string(&res).unwrap();
        assert!(json.ends_with(r#""conversionUnit":"years","convertedResult":0.5}"#));
    }

    #[test]
    fn test_failure_serializes_message_as_result() {
        let res = CalculationResult::Failure {
            message: "Invalid unit specified.".to_string(),
        };
        let json = serde_json::to_string(&res).unwrap();
        assert_eq!(json, r#"{"success":false,"result":"Invalid unit specified."}"#);
        assert_eq!(res.message(), Some("Invalid unit specified."));
        assert!(!res.is_success());
        assert!(res.calculation().is_none());
    }

    #[test]
    fn test_envelope_is_single_element_array() {
        let envelope = CalculationResult::from(days(0)).into_envelope();
        let value = serde_json::to_value(&envelope).unwrap();
        let arr = value.as_array().unwrap();
        assert_eq!(arr.len(), 1);
        assert_eq!(arr[0]["success"], true);
        assert_eq!(arr[0]["result"], 0);
    }
}
