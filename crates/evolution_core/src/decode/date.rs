//! Multi-format date parsing.
//!
//! # Responsibility
//! - Parse document timestamps with strict format fallback.
//! - Parse review period bounds with lenient degradation.
//!
//! # Invariants
//! - Fractional-second format is always attempted before the whole-second one.
//! - Review period parsing never fails; unusable input yields `None`.

use crate::model::status::ReviewPeriod;
use crate::model::Timestamp;
use chrono::{DateTime, NaiveDate, NaiveTime, SecondsFormat, Utc};
use log::debug;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// `YYYY-MM-DDTHH:MM:SS.fffZZZZZ` with any number of fraction digits; the
/// offset may also be `Z`.
const FRACTIONAL_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f%#z";
/// `YYYY-MM-DDTHH:MM:SSZZZZZ`
const WHOLE_SECOND_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%#z";
const CALENDAR_DATE_FORMAT: &str = "%Y-%m-%d";

/// Date parsing error for strict call sites.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateError {
    /// Input matched none of the accepted timestamp formats.
    InvalidDate { input: String },
}

impl Display for DateError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDate { input } => write!(
                f,
                "invalid date `{input}`: expected YYYY-MM-DDTHH:MM:SS[.fff]+HH:MM"
            ),
        }
    }
}

impl Error for DateError {}

/// Parses a document-level timestamp.
///
/// # Errors
/// - Returns [`DateError::InvalidDate`] when both formats fail.
pub fn parse_timestamp(input: &str) -> Result<Timestamp, DateError> {
    [FRACTIONAL_TIMESTAMP_FORMAT, WHOLE_SECOND_TIMESTAMP_FORMAT]
        .iter()
        .find_map(|format| DateTime::parse_from_str(input, format).ok())
        .map(|parsed| parsed.with_timezone(&Utc))
        .ok_or_else(|| DateError::InvalidDate {
            input: input.to_string(),
        })
}

/// Formats a timestamp so that [`parse_timestamp`] reads it back unchanged.
pub fn format_timestamp(timestamp: &Timestamp) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// Parses review period bounds.
///
/// Both bounds are first read as plain `YYYY-MM-DD` dates at UTC midnight.
/// If that fails or does not give `start < end`, both are read as RFC 3339
/// timestamps. Anything else yields `None`.
pub fn parse_review_period(start: &str, end: &str) -> Option<ReviewPeriod> {
    let calendar = parse_calendar_date(start)
        .zip(parse_calendar_date(end))
        .and_then(|(start, end)| ReviewPeriod::new(start, end));
    if calendar.is_some() {
        return calendar;
    }

    let rfc3339 = parse_rfc3339(start)
        .zip(parse_rfc3339(end))
        .and_then(|(start, end)| ReviewPeriod::new(start, end));
    if rfc3339.is_none() {
        debug!(
            "event=review_period module=decode status=degraded start={:?} end={:?}",
            start, end
        );
    }
    rfc3339
}

/// Formats a review period bound as a plain UTC calendar date.
pub fn format_calendar_date(timestamp: &Timestamp) -> String {
    timestamp.format(CALENDAR_DATE_FORMAT).to_string()
}

/// Formats both bounds of `period` so [`parse_review_period`] reads the same
/// period back.
///
/// Plain calendar dates are used only when both bounds sit at UTC midnight;
/// otherwise both bounds are written as RFC 3339.
pub fn format_review_period(period: &ReviewPeriod) -> (String, String) {
    let at_midnight = |timestamp: &Timestamp| timestamp.time() == NaiveTime::MIN;
    if at_midnight(period.start()) && at_midnight(period.end()) {
        (
            format_calendar_date(period.start()),
            format_calendar_date(period.end()),
        )
    } else {
        (
            format_timestamp(period.start()),
            format_timestamp(period.end()),
        )
    }
}

fn parse_calendar_date(input: &str) -> Option<Timestamp> {
    NaiveDate::parse_from_str(input, CALENDAR_DATE_FORMAT)
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc())
}

fn parse_rfc3339(input: &str) -> Option<Timestamp> {
    DateTime::parse_from_rfc3339(input)
        .ok()
        .map(|parsed| parsed.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::{
        format_calendar_date, format_review_period, format_timestamp, parse_review_period,
        parse_timestamp, DateError,
    };

    #[test]
    fn fractional_and_whole_second_forms_agree() {
        let fractional = parse_timestamp("2024-04-28T10:00:00.000+00:00").unwrap();
        let whole = parse_timestamp("2024-04-28T10:00:00+00:00").unwrap();
        assert_eq!(fractional, whole);
    }

    #[test]
    fn offsets_resolve_to_utc() {
        let shifted = parse_timestamp("2024-04-28T12:00:00+02:00").unwrap();
        let utc = parse_timestamp("2024-04-28T10:00:00Z").unwrap();
        assert_eq!(shifted, utc);
    }

    #[test]
    fn fraction_is_kept() {
        let parsed = parse_timestamp("2024-04-28T10:00:00.250Z").unwrap();
        assert_eq!(parsed.timestamp_subsec_millis(), 250);
    }

    #[test]
    fn any_fraction_width_is_accepted() {
        let one_digit = parse_timestamp("2024-04-28T10:00:00.5+00:00").unwrap();
        assert_eq!(one_digit.timestamp_subsec_millis(), 500);

        let six_digits = parse_timestamp("2024-04-28T10:00:00.123456+00:00").unwrap();
        assert_eq!(six_digits.timestamp_subsec_micros(), 123_456);
        assert_eq!(
            parse_timestamp(&format_timestamp(&six_digits)).unwrap(),
            six_digits
        );
    }

    #[test]
    fn garbage_is_invalid_date() {
        let err = parse_timestamp("not-a-date").unwrap_err();
        assert_eq!(
            err,
            DateError::InvalidDate {
                input: "not-a-date".to_string()
            }
        );
        assert!(parse_timestamp("2024-04-28").is_err());
    }

    #[test]
    fn formatted_timestamp_parses_back() {
        let parsed = parse_timestamp("2024-04-28T10:00:00.125+03:00").unwrap();
        let formatted = format_timestamp(&parsed);
        assert_eq!(formatted, "2024-04-28T07:00:00.125Z");
        assert_eq!(parse_timestamp(&formatted).unwrap(), parsed);
    }

    #[test]
    fn review_period_prefers_calendar_dates() {
        let period = parse_review_period("2024-01-01", "2024-01-10").unwrap();
        assert_eq!(format_calendar_date(period.start()), "2024-01-01");
        assert_eq!(format_calendar_date(period.end()), "2024-01-10");
    }

    #[test]
    fn review_period_falls_back_to_rfc3339() {
        let period =
            parse_review_period("2024-01-01T12:00:00Z", "2024-01-02T00:00:00+01:00").unwrap();
        assert!(period.start() < period.end());
    }

    #[test]
    fn review_period_formatting_keeps_time_of_day() {
        let midnight = parse_review_period("2024-01-01", "2024-01-10").unwrap();
        assert_eq!(
            format_review_period(&midnight),
            ("2024-01-01".to_string(), "2024-01-10".to_string())
        );

        let same_day =
            parse_review_period("2024-01-01T08:00:00Z", "2024-01-01T20:00:00Z").unwrap();
        let (start, end) = format_review_period(&same_day);
        assert_eq!(start, "2024-01-01T08:00:00Z");
        assert_eq!(parse_review_period(&start, &end), Some(same_day));
    }

    #[test]
    fn review_period_degrades_to_none() {
        assert!(parse_review_period("2024-01-10", "2024-01-01").is_none());
        assert!(parse_review_period("2024-01-01", "2024-01-01").is_none());
        assert!(parse_review_period("soon", "2024-01-01").is_none());
        assert!(parse_review_period("2024-01-01", "2024-01-02T00:00:00Z").is_none());
    }
}
