//! Property tests for interval arithmetic and failure handling.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};
use date_interval::{calculate, CalculationResult, ConvertedValue, DATE_TIME_FORMAT};
use proptest::prelude::*;

fn epoch() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(1970, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

/// Timestamps between 1970 and roughly 2106, at second resolution.
fn timestamp() -> impl Strategy<Value = NaiveDateTime> {
    (0i64..50_000, 0i64..86_400)
        .prop_map(|(days, secs)| epoch() + Duration::days(days) + Duration::seconds(secs))
}

fn fmt(dt: NaiveDateTime) -> String {
    dt.format(DATE_TIME_FORMAT).to_string()
}

fn result_of(res: &CalculationResult) -> i64 {
    res.calculation()
        .unwrap_or_else(|| panic!("expected success, got {res:?}"))
        .result
}

proptest! {
    #[test]
    fn same_instant_spans(t in timestamp()) {
        let s = fmt(t);
        prop_assert_eq!(result_of(&calculate(&s, &s, "days", None, None)), 0);
        prop_assert_eq!(result_of(&calculate(&s, &s, "weeks", None, None)), 0);

        let expected = if t.weekday().number_from_monday() <= 5 { 1 } else { 0 };
        prop_assert_eq!(result_of(&calculate(&s, &s, "weekdays", None, None)), expected);
    }

    #[test]
    fn weeks_are_floor_of_days(a in timestamp(), b in timestamp()) {
        let (a, b) = (fmt(a), fmt(b));
        let days = result_of(&calculate(&a, &b, "days", None, None));
        let weeks = result_of(&calculate(&a, &b, "weeks", None, None));
        prop_assert_eq!(weeks, days / 7);
    }

    #[test]
    fn days_are_symmetric(a in timestamp(), b in timestamp()) {
        let (a, b) = (fmt(a), fmt(b));
        prop_assert_eq!(
            result_of(&calculate(&a, &b, "days", None, None)),
            result_of(&calculate(&b, &a, "days", None, None))
        );
    }

    #[test]
    fn weekdays_never_decrease_as_end_moves_later(
        start in timestamp(),
        step in 0i64..400 * 86_400,
        extra in 0i64..30 * 86_400,
    ) {
        let s = fmt(start);
        let near = fmt(start + Duration::seconds(step));
        let far = fmt(start + Duration::seconds(step + extra));
        let near_count = result_of(&calculate(&s, &near, "weekdays", None, None));
        let far_count = result_of(&calculate(&s, &far, "weekdays", None, None));
        prop_assert!(far_count >= near_count, "{} < {}", far_count, near_count);
    }

    #[test]
    fn weekdays_bounded_by_visited_days(start in timestamp(), span in 0i64..2_000) {
        let s = fmt(start);
        let e = fmt(start + Duration::days(span));
        let count = result_of(&calculate(&s, &e, "weekdays", None, None));
        prop_assert!(count <= span + 1);
        // Any 7 consecutive days hold exactly 5 weekdays
        prop_assert!(count >= (span + 1) / 7 * 5);
    }

    #[test]
    fn seconds_round_trip_to_days(a in timestamp(), b in timestamp()) {
        let (a, b) = (fmt(a), fmt(b));
        let res = calculate(&a, &b, "days", Some("seconds"), None);
        let calc = res.calculation().unwrap();
        match calc.conversion.unwrap().value {
            ConvertedValue::Whole(secs) => prop_assert_eq!(secs / 86_400, calc.result),
            other => prop_assert!(false, "expected whole seconds, got {:?}", other),
        }
    }

    #[test]
    fn arbitrary_input_never_panics(
        start in ".{0,24}",
        end in ".{0,24}",
        kind in "[a-z]{0,10}",
        unit in proptest::option::of("[a-z]{0,10}"),
        zone in proptest::option::of("[A-Za-z_/]{0,20}"),
    ) {
        let res = calculate(&start, &end, &kind, unit.as_deref(), zone.as_deref());
        if let Some(msg) = res.message() {
            prop_assert!(!msg.is_empty());
        }
    }

    #[test]
    fn markup_is_escaped_in_messages(payload in "<[a-z]{1,8}>[^<>]{0,10}") {
        let res = calculate("2024-01-01T00:00:00", &payload, "days", None, None);
        let msg = res.message().unwrap();
        prop_assert!(!msg.contains('<') && !msg.contains('>'));
    }
}

#[test]
fn documented_examples() {
    let res = calculate("2024-01-01T00:00:00", "2024-01-08T00:00:00", "days", None, None);
    assert_eq!(result_of(&res), 7);

    let res = calculate("2024-01-01T00:00:00", "2024-01-08T00:00:00", "weeks", None, None);
    assert_eq!(result_of(&res), 1);

    let res = calculate(
        "2024-01-01T00:00:00",
        "2024-01-08T00:00:00",
        "days",
        Some("hours"),
        None,
    );
    assert_eq!(
        res.calculation().unwrap().conversion.unwrap().value,
        ConvertedValue::Whole(168)
    );

    let res = calculate("2024-01-01T00:00:00", "2024-01-07T00:00:00", "weekdays", None, None);
    assert_eq!(result_of(&res), 5);
}

#[test]
fn wire_envelope() {
    let res = calculate("2024-01-01T00:00:00", "2024-01-08T00:00:00", "weeks", Some("years"), None);
    let json = serde_json::to_value(res.into_envelope()).unwrap();
    assert_eq!(
        json,
        serde_json::json!([{
            "success": true,
            "type": "weeks",
            "result": 1,
            "conversionUnit": "years",
            "convertedResult": 7.0 / 365.0
        }])
    );

    let res = calculate("2024-13-01T00:00:00", "2024-01-08T00:00:00", "days", None, None);
    let json = serde_json::to_value(res.into_envelope()).unwrap();
    assert_eq!(
        json,
        serde_json::json!([{
            "success": false,
            "result": "Invalid date format. Use YYYY-MM-DDTHH:MM:SS."
        }])
    );
}
