//! Interval computation between two wall-clock timestamps.
//!
//! A calculation runs a fixed pipeline: sanitize every string input, check
//! both timestamps against `YYYY-MM-DDTHH:MM:SS`, resolve the time zone,
//! validate the interval type and conversion unit, then derive the requested
//! metric. The first failing step ends the pipeline and becomes a failure
//! result; nothing escapes [`DateIntervalCalculator::calculate`] as a panic
//! or an `Err`.
//!
//! # Metrics
//!
//! - `days` — whole 24-hour wall-clock periods between the two timestamps
//! - `weekdays` — Monday-Friday days visited by a day-by-day walk from start to end
//! - `weeks` — `floor(days / 7)`
//!
//! # Time Zones
//!
//! Both timestamps are read as local times in the same zone, so day counts
//! follow the wall clock and a DST shift never turns one calendar day into
//! 23 or 25 hours' worth of "partial" day. A local time skipped by a
//! spring-forward transition is moved forward by the length of the gap
//! (02:30 in a one-hour gap reads as 03:30), and that shifted time of day is
//! what the weekday walk carries from then on.

use chrono::{DateTime, Datelike, Days, NaiveDateTime, Offset, TimeDelta, TimeZone, Timelike};
use chrono_tz::Tz;

use crate::error::{CalculationError, Result};
use crate::request::{CalculationRequest, ConversionUnit, IntervalType};
use crate::response::{Calculation, CalculationResult, Conversion, ConvertedValue};
use crate::sanitize::{HtmlEscaper, IdentityLocalizer, Localizer, Sanitizer};

/// The only accepted timestamp layout.
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

const SECONDS_PER_DAY: i64 = 86_400;
const MINUTES_PER_DAY: i64 = 1_440;
const HOURS_PER_DAY: i64 = 24;
const DAYS_PER_YEAR: i64 = 365;

// ── Configuration ───────────────────────────────────────────────────────────

/// Options for [`DateIntervalCalculator::with_options`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalculatorOptions {
    /// Zone used when a request carries no `timeZone`.
    pub default_time_zone: Tz,
}

impl Default for CalculatorOptions {
    fn default() -> Self {
        Self {
            default_time_zone: Tz::UTC,
        }
    }
}

// ── DateIntervalCalculator ──────────────────────────────────────────────────

/// Stateless calculator. Holds only configuration and collaborators, so one
/// instance can serve any number of concurrent callers.
#[derive(Debug, Clone, Default)]
pub struct DateIntervalCalculator<S = HtmlEscaper, L = IdentityLocalizer> {
    options: CalculatorOptions,
    sanitizer: S,
    localizer: L,
}

impl DateIntervalCalculator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: CalculatorOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }
}

impl<S: Sanitizer, L: Localizer> DateIntervalCalculator<S, L> {
    /// Replace the input sanitizer.
    pub fn with_sanitizer<S2: Sanitizer>(self, sanitizer: S2) -> DateIntervalCalculator<S2, L> {
        DateIntervalCalculator {
            options: self.options,
            sanitizer,
            localizer: self.localizer,
        }
    }

    /// Replace the failure-message localizer.
    pub fn with_localizer<L2: Localizer>(self, localizer: L2) -> DateIntervalCalculator<S, L2> {
        DateIntervalCalculator {
            options: self.options,
            sanitizer: self.sanitizer,
            localizer,
        }
    }

    pub fn options(&self) -> &CalculatorOptions {
        &self.options
    }

    /// Run one calculation, folding any error into a failure result.
    ///
    /// # Examples
    ///
    /// ```
    /// use date_interval::{CalculationRequest, DateIntervalCalculator};
    ///
    /// let calc = DateIntervalCalculator::new();
    /// let req = CalculationRequest::new("2024-01-01T00:00:00", "2024-01-08T00:00:00", "days")
    ///     .with_conversion_unit("hours");
    /// let res = calc.calculate(&req);
    /// assert_eq!(
    ///     serde_json::to_string(&res).unwrap(),
    ///     r#"{"success":true,"type":"days","result":7,"conversionUnit":"hours","convertedResult":168}"#
    /// );
    /// ```
    pub fn calculate(&self, request: &CalculationRequest) -> CalculationResult {
        match self.try_calculate(request) {
            Ok(calc) => CalculationResult::Success(calc),
            Err(err) => {
                tracing::debug!(kind = err.kind(), input = err.input(), "calculation rejected");
                CalculationResult::Failure {
                    message: self.localizer.localize(&err.to_string()),
                }
            }
        }
    }

    /// Run one calculation, returning the first validation or parsing error.
    ///
    /// # Errors
    ///
    /// - [`CalculationError::InvalidDateFormat`] if either timestamp is not
    ///   exactly `YYYY-MM-DDTHH:MM:SS` or names an impossible date/time
    /// - [`CalculationError::InvalidTimeZone`] if `timeZone` is not an IANA zone
    /// - [`CalculationError::InvalidType`] for anything but `days`, `weekdays`, `weeks`
    /// - [`CalculationError::InvalidConversionUnit`] for anything but
    ///   `seconds`, `minutes`, `hours`, `years`
    /// - [`CalculationError::UnexpectedParsingFailure`] if a timestamp cannot
    ///   be placed in the resolved zone or the weekday walk leaves the calendar
    pub fn try_calculate(&self, request: &CalculationRequest) -> Result<Calculation> {
        let start_raw = self.sanitizer.sanitize(request.start_date_time());
        let end_raw = self.sanitizer.sanitize(request.end_date_time());
        let type_raw = self.sanitizer.sanitize(request.interval_type());
        let unit_raw = self.sanitize_optional(request.conversion_unit());
        let zone_raw = self.sanitize_optional(request.time_zone());

        let start = parse_date_time(&start_raw)?;
        let end = parse_date_time(&end_raw)?;

        let zone = match zone_raw.as_deref() {
            Some(name) => parse_timezone(name)?,
            None => self.options.default_time_zone,
        };

        let interval_type: IntervalType = type_raw.parse()?;
        let unit = unit_raw
            .as_deref()
            .map(str::parse::<ConversionUnit>)
            .transpose()?;

        let interval = Interval::new(resolve_in_zone(start, &zone)?, resolve_in_zone(end, &zone)?);

        let result = match interval_type {
            IntervalType::Days => interval.whole_days(),
            IntervalType::Weekdays => interval.weekdays()?,
            IntervalType::Weeks => interval.whole_weeks(),
        };

        tracing::debug!(
            start = %start_raw,
            end = %end_raw,
            zone = zone.name(),
            %interval_type,
            result,
            "interval computed"
        );

        Ok(Calculation {
            interval_type,
            result,
            conversion: unit.map(|unit| Conversion {
                unit,
                value: convert_result(result, interval_type, unit),
            }),
        })
    }

    /// Sanitize an optional input; an empty value or `"0"` counts as absent.
    fn sanitize_optional(&self, input: Option<&str>) -> Option<String> {
        input
            .map(|s| self.sanitizer.sanitize(s))
            .filter(|s| !s.is_empty() && s != "0")
    }
}

/// Calculate with a default-configured [`DateIntervalCalculator`].
///
/// # Arguments
///
/// * `start_date_time` — `YYYY-MM-DDTHH:MM:SS`
/// * `end_date_time` — `YYYY-MM-DDTHH:MM:SS`
/// * `interval_type` — `"days"`, `"weekdays"`, or `"weeks"`
/// * `conversion_unit` — optional `"seconds"`, `"minutes"`, `"hours"`, or `"years"`
/// * `time_zone` — optional IANA zone name, UTC when absent
///
/// # Examples
///
/// ```
/// use date_interval::calculate;
///
/// // Monday through Sunday
/// let res = calculate("2024-01-01T00:00:00", "2024-01-07T00:00:00", "weekdays", None, None);
/// assert_eq!(res.calculation().unwrap().result, 5);
///
/// let res = calculate("2024-01-01T00:00:00", "2024-01-08T00:00:00", "months", None, None);
/// assert_eq!(res.message(), Some("Invalid type specified."));
/// ```
pub fn calculate(
    start_date_time: &str,
    end_date_time: &str,
    interval_type: &str,
    conversion_unit: Option<&str>,
    time_zone: Option<&str>,
) -> CalculationResult {
    let mut request = CalculationRequest::new(start_date_time, end_date_time, interval_type);
    if let Some(unit) = conversion_unit {
        request = request.with_conversion_unit(unit);
    }
    if let Some(zone) = time_zone {
        request = request.with_time_zone(zone);
    }
    DateIntervalCalculator::new().calculate(&request)
}

// ── Interval ────────────────────────────────────────────────────────────────

/// Two instants in the same zone. Day spans use their local wall-clock
/// times; the weekday walk compares instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    start: DateTime<Tz>,
    end: DateTime<Tz>,
}

impl Interval {
    pub fn new(start: DateTime<Tz>, end: DateTime<Tz>) -> Self {
        Self { start, end }
    }

    /// Absolute count of whole wall-clock days between start and end, using
    /// the local times after any DST-gap shift.
    ///
    /// Partial days are dropped: one day and two hours is 1, and 23:00 to
    /// 01:00 the next morning is 0.
    pub fn whole_days(&self) -> i64 {
        (self.end.naive_local() - self.start.naive_local())
            .num_days()
            .abs()
    }

    pub fn whole_weeks(&self) -> i64 {
        self.whole_days() / 7
    }

    /// Count Monday-Friday days by walking from start to end one day at a time.
    ///
    /// Each step adds one calendar day to the cursor's local time and places
    /// it back in the zone, so a cursor pushed forward by a DST gap keeps the
    /// later time of day. The walk includes `end` (compared as an instant):
    /// a same-day span counts its day once when that day is a weekday, and a
    /// start later than end counts nothing.
    ///
    /// # Errors
    ///
    /// Returns [`CalculationError::UnexpectedParsingFailure`] if stepping the
    /// cursor would leave the representable calendar.
    pub fn weekdays(&self) -> Result<i64> {
        let zone = self.start.timezone();
        let mut cursor = self.start;
        let mut count = 0;

        while cursor <= self.end {
            if cursor.weekday().number_from_monday() <= 5 {
                count += 1;
            }
            let next = cursor
                .naive_local()
                .checked_add_days(Days::new(1))
                .ok_or_else(|| {
                    CalculationError::UnexpectedParsingFailure(format!(
                        "date overflow after '{}'",
                        cursor.format(DATE_TIME_FORMAT)
                    ))
                })?;
            cursor = resolve_in_zone(next, &zone)?;
        }

        Ok(count)
    }
}

// ── Unit conversion ─────────────────────────────────────────────────────────

/// Re-express a day-based result in `unit`.
///
/// Week counts are turned into days first. Years divide by 365 without
/// rounding; an exact multiple of 365 stays whole.
pub fn convert_result(result: i64, interval_type: IntervalType, unit: ConversionUnit) -> ConvertedValue {
    let days = match interval_type {
        IntervalType::Weeks => result * 7,
        IntervalType::Days | IntervalType::Weekdays => result,
    };

    match unit {
        ConversionUnit::Seconds => ConvertedValue::Whole(days * SECONDS_PER_DAY),
        ConversionUnit::Minutes => ConvertedValue::Whole(days * MINUTES_PER_DAY),
        ConversionUnit::Hours => ConvertedValue::Whole(days * HOURS_PER_DAY),
        ConversionUnit::Years if days % DAYS_PER_YEAR == 0 => {
            ConvertedValue::Whole(days / DAYS_PER_YEAR)
        }
        ConversionUnit::Years => ConvertedValue::Fractional(days as f64 / DAYS_PER_YEAR as f64),
    }
}

// ── Internal helpers ────────────────────────────────────────────────────────

/// Parse a `YYYY-MM-DDTHH:MM:SS` timestamp strictly.
///
/// The parsed value must format back to exactly the input, which rejects
/// short fields, signed or five-digit years, and anything a lenient parser
/// would quietly normalize. Leap seconds are rejected too.
fn parse_date_time(s: &str) -> Result<NaiveDateTime> {
    let dt = NaiveDateTime::parse_from_str(s, DATE_TIME_FORMAT)
        .map_err(|_| CalculationError::InvalidDateFormat(s.to_string()))?;

    if dt.nanosecond() >= 1_000_000_000 || dt.format(DATE_TIME_FORMAT).to_string() != s {
        return Err(CalculationError::InvalidDateFormat(s.to_string()));
    }

    Ok(dt)
}

/// Parse an IANA timezone string into `Tz`.
fn parse_timezone(s: &str) -> Result<Tz> {
    s.parse::<Tz>()
        .map_err(|_| CalculationError::InvalidTimeZone(s.to_string()))
}

/// Place a wall-clock time in `zone`.
///
/// Ambiguous times take the earlier offset. A time skipped by a forward
/// transition is read with the offset in force the day before, which lands
/// it past the gap by as much as it was inside it.
fn resolve_in_zone(naive: NaiveDateTime, zone: &Tz) -> Result<DateTime<Tz>> {
    if let Some(dt) = zone.from_local_datetime(&naive).earliest() {
        return Ok(dt);
    }

    let unplaceable = || {
        CalculationError::UnexpectedParsingFailure(format!(
            "'{}' cannot be placed in {}",
            naive.format(DATE_TIME_FORMAT),
            zone.name()
        ))
    };
    let day_before = naive.checked_sub_days(Days::new(1)).ok_or_else(unplaceable)?;
    let offset = zone.offset_from_utc_datetime(&day_before).fix();
    let utc = naive
        .checked_sub_signed(TimeDelta::seconds(i64::from(offset.local_minus_utc())))
        .ok_or_else(unplaceable)?;

    Ok(zone.from_utc_datetime(&utc))
}

// ── Tests ───────────────────────────────────────────────────────────────────
