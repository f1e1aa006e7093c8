//! Type mapping definitions
//!
//! This module provides the native value model for query operands
//! and result cells, plus conversions from common Rust types.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// PostgreSQL values carried by filters, change sets and mapped rows.
///
/// Deserialization is untagged: JSON strings always become `Text`, so date and
/// timestamp typing is decided by the translator's field sets, not by guessing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SqlValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Decimal(Decimal),
    Uuid(Uuid),
    Date(NaiveDate),
    Time(NaiveTime),
    Timestamp(NaiveDateTime),
    TimestampTz(DateTime<Utc>),
    Json(serde_json::Value),
}

impl SqlValue {
    pub fn is_null(&self) -> bool {
        matches!(self, SqlValue::Null)
    }

    /// Borrow the string payload of a `Text` value
    pub fn as_str(&self) -> Option<&str> {
        match self {
            SqlValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            SqlValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Short PostgreSQL-flavoured name of the variant, used in diagnostics
    pub fn type_name(&self) -> &'static str {
        match self {
            SqlValue::Null => "NULL",
            SqlValue::Bool(_) => "BOOLEAN",
            SqlValue::Int(_) => "BIGINT",
            SqlValue::Float(_) => "DOUBLE PRECISION",
            SqlValue::Text(_) => "TEXT",
            SqlValue::Decimal(_) => "NUMERIC",
            SqlValue::Uuid(_) => "UUID",
            SqlValue::Date(_) => "DATE",
            SqlValue::Time(_) => "TIME",
            SqlValue::Timestamp(_) => "TIMESTAMP",
            SqlValue::TimestampTz(_) => "TIMESTAMPTZ",
            SqlValue::Json(_) => "JSONB",
        }
    }
}

/// Plain textual rendering; `Text` is written without quotes.
impl fmt::Display for SqlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SqlValue::Null => f.write_str("NULL"),
            SqlValue::Bool(b) => write!(f, "{}", b),
            SqlValue::Int(i) => write!(f, "{}", i),
            SqlValue::Float(v) => write!(f, "{}", v),
            SqlValue::Text(s) => f.write_str(s),
            SqlValue::Decimal(d) => write!(f, "{}", d),
            SqlValue::Uuid(u) => write!(f, "{}", u),
            SqlValue::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            SqlValue::Time(t) => write!(f, "{}", t),
            SqlValue::Timestamp(ts) => write!(f, "{}", ts),
            SqlValue::TimestampTz(ts) => f.write_str(&ts.to_rfc3339()),
            SqlValue::Json(v) => write!(f, "{}", v),
        }
    }
}

impl From<String> for SqlValue {
    fn from(val: String) -> Self {
        SqlValue::Text(val)
    }
}

impl From<&str> for SqlValue {
    fn from(val: &str) -> Self {
        SqlValue::Text(val.to_string())
    }
}

impl From<&String> for SqlValue {
    fn from(val: &String) -> Self {
        SqlValue::Text(val.clone())
    }
}

impl From<i16> for SqlValue {
    fn from(val: i16) -> Self {
        SqlValue::Int(val as i64)
    }
}

impl From<i32> for SqlValue {
    fn from(val: i32) -> Self {
        SqlValue::Int(val as i64)
    }
}

impl From<i64> for SqlValue {
    fn from(val: i64) -> Self {
        SqlValue::Int(val)
    }
}

impl From<u32> for SqlValue {
    fn from(val: u32) -> Self {
        SqlValue::Int(val as i64)
    }
}

impl From<f32> for SqlValue {
    fn from(val: f32) -> Self {
        SqlValue::Float(val as f64)
    }
}

impl From<f64> for SqlValue {
    fn from(val: f64) -> Self {
        SqlValue::Float(val)
    }
}

impl From<bool> for SqlValue {
    fn from(val: bool) -> Self {
        SqlValue::Bool(val)
    }
}

impl From<Decimal> for SqlValue {
    fn from(val: Decimal) -> Self {
        SqlValue::Decimal(val)
    }
}

impl From<Uuid> for SqlValue {
    fn from(val: Uuid) -> Self {
        SqlValue::Uuid(val)
    }
}

impl From<NaiveDate> for SqlValue {
    fn from(val: NaiveDate) -> Self {
        SqlValue::Date(val)
    }
}

impl From<NaiveTime> for SqlValue {
    fn from(val: NaiveTime) -> Self {
        SqlValue::Time(val)
    }
}

impl From<NaiveDateTime> for SqlValue {
    fn from(val: NaiveDateTime) -> Self {
        SqlValue::Timestamp(val)
    }
}

impl From<DateTime<Utc>> for SqlValue {
    fn from(val: DateTime<Utc>) -> Self {
        SqlValue::TimestampTz(val)
    }
}

/// JSON scalars map onto their SQL counterparts; only arrays and objects stay `Json`
impl From<serde_json::Value> for SqlValue {
    fn from(val: serde_json::Value) -> Self {
        crate::serialize::json_to_sql_value(val)
    }
}

impl<T> From<Option<T>> for SqlValue
where
    T: Into<SqlValue>,
{
    fn from(val: Option<T>) -> Self {
        match val {
            Some(v) => v.into(),
            None => SqlValue::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_primitives() {
        assert_eq!(SqlValue::from("active"), SqlValue::Text("active".to_string()));
        assert_eq!(SqlValue::from(7_i32), SqlValue::Int(7));
        assert_eq!(SqlValue::from(true), SqlValue::Bool(true));
        assert_eq!(SqlValue::from(None::<i32>), SqlValue::Null);
        assert_eq!(SqlValue::from(Some(2.5_f64)), SqlValue::Float(2.5));
    }

    #[test]
    fn test_json_scalars_are_not_wrapped() {
        assert_eq!(SqlValue::from(json!("x")), SqlValue::Text("x".to_string()));
        assert_eq!(SqlValue::from(json!(3)), SqlValue::Int(3));
        assert_eq!(SqlValue::from(json!(null)), SqlValue::Null);
        assert_eq!(SqlValue::from(json!([1, 2])), SqlValue::Json(json!([1, 2])));
    }

    #[test]
    fn test_untagged_deserialization_keeps_strings_as_text() {
        let values: Vec<SqlValue> =
            serde_json::from_value(json!(["2024-01-01", 4, 1.5, true, null, {"a": 1}])).unwrap();

        assert_eq!(values[0], SqlValue::Text("2024-01-01".to_string()));
        assert_eq!(values[1], SqlValue::Int(4));
        assert_eq!(values[2], SqlValue::Float(1.5));
        assert_eq!(values[3], SqlValue::Bool(true));
        assert_eq!(values[4], SqlValue::Null);
        assert_eq!(values[5], SqlValue::Json(json!({"a": 1})));
    }

    #[test]
    fn test_display_renders_raw_text() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(SqlValue::Text("abc".into()).to_string(), "abc");
        assert_eq!(SqlValue::Date(date).to_string(), "2024-03-09");
        assert_eq!(SqlValue::Int(-4).to_string(), "-4");
    }
}
