//! Literal coercion
//!
//! String operands of date and timestamp fields are parsed into typed
//! values before they are bound, so PostgreSQL receives `DATE` and
//! `TIMESTAMP` parameters instead of text.

use crate::types::SqlValue;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use thiserror::Error;

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIMESTAMP_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// Errors raised while turning a string into a date or timestamp literal
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoercionError {
    #[error("Invalid date literal '{value}': expected YYYY-MM-DD")]
    InvalidDate { value: String },

    #[error("Invalid timestamp literal '{value}': expected YYYY-MM-DD HH:MM:SS[.fff] or RFC 3339")]
    InvalidTimestamp { value: String },
}

/// How a bound operand must be typed before it reaches the database
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Coercion {
    #[default]
    None,
    Date,
    Timestamp,
}

/// Parse a `YYYY-MM-DD` date literal
pub fn parse_date(value: &str) -> Result<NaiveDate, CoercionError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| CoercionError::InvalidDate {
        value: value.to_string(),
    })
}

/// Parse a timestamp literal.
///
/// Naive `YYYY-MM-DD HH:MM:SS[.fff]` (space or `T` separated) yields a
/// `Timestamp`; an RFC 3339 string with an offset yields a `TimestampTz`.
pub fn parse_timestamp(value: &str) -> Result<SqlValue, CoercionError> {
    let trimmed = value.trim();

    for format in TIMESTAMP_FORMATS {
        if let Ok(ts) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(SqlValue::Timestamp(ts));
        }
    }

    DateTime::parse_from_rfc3339(trimmed)
        .map(|dt| SqlValue::TimestampTz(dt.with_timezone(&Utc)))
        .map_err(|_| CoercionError::InvalidTimestamp {
            value: value.to_string(),
        })
}

impl SqlValue {
    /// Apply a coercion. Only `Text` values are converted; everything else,
    /// including `Null`, passes through unchanged.
    pub fn coerce(self, coercion: Coercion) -> Result<SqlValue, CoercionError> {
        match (coercion, self) {
            (Coercion::Date, SqlValue::Text(s)) => parse_date(&s).map(SqlValue::Date),
            (Coercion::Timestamp, SqlValue::Text(s)) => parse_timestamp(&s),
            (_, other) => Ok(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        let date = parse_date("2024-01-05").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());
    }

    #[test]
    fn test_parse_date_rejects_garbage() {
        let err = parse_date("05/01/2024").unwrap_err();
        assert_eq!(
            err,
            CoercionError::InvalidDate {
                value: "05/01/2024".to_string()
            }
        );
        assert!(parse_date("2024-13-01").is_err());
    }

    #[test]
    fn test_parse_timestamp_naive_forms() {
        let expected = NaiveDate::from_ymd_opt(2024, 2, 29)
            .unwrap()
            .and_hms_opt(13, 45, 0)
            .unwrap();

        assert_eq!(
            parse_timestamp("2024-02-29 13:45:00").unwrap(),
            SqlValue::Timestamp(expected)
        );
        assert_eq!(
            parse_timestamp("2024-02-29T13:45:00").unwrap(),
            SqlValue::Timestamp(expected)
        );
    }

    #[test]
    fn test_parse_timestamp_with_offset() {
        let value = parse_timestamp("2024-02-29T13:45:00+02:00").unwrap();
        match value {
            SqlValue::TimestampTz(ts) => assert_eq!(ts.to_rfc3339(), "2024-02-29T11:45:00+00:00"),
            other => panic!("Expected TimestampTz, got {:?}", other),
        }
    }

    #[test]
    fn test_coerce_only_touches_text() {
        assert_eq!(SqlValue::Int(3).coerce(Coercion::Date).unwrap(), SqlValue::Int(3));
        assert_eq!(SqlValue::Null.coerce(Coercion::Timestamp).unwrap(), SqlValue::Null);
        assert_eq!(
            SqlValue::Text("2024-01-01".into()).coerce(Coercion::None).unwrap(),
            SqlValue::Text("2024-01-01".into())
        );
        assert!(matches!(
            SqlValue::Text("2024-01-01".into()).coerce(Coercion::Date).unwrap(),
            SqlValue::Date(_)
        ));
        assert!(SqlValue::Text("soon".into()).coerce(Coercion::Timestamp).is_err());
    }
}
