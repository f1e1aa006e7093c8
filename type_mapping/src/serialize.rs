//! Serialization utilities
//!
//! This module converts between `SqlValue` and `serde_json::Value`.

use crate::types::SqlValue;
use serde_json::Value;

/// Map a JSON value onto the closest SQL value.
///
/// Strings stay `Text` (no timestamp or UUID sniffing), integers that fit
/// `i64` become `Int`, other numbers `Float`, arrays and objects `Json`.
pub fn json_to_sql_value(value: Value) -> SqlValue {
    match value {
        Value::Null => SqlValue::Null,
        Value::Bool(b) => SqlValue::Bool(b),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                SqlValue::Int(i)
            } else if let Some(f) = n.as_f64() {
                SqlValue::Float(f)
            } else {
                SqlValue::Text(n.to_string())
            }
        }
        Value::String(s) => SqlValue::Text(s),
        other => SqlValue::Json(other),
    }
}

/// Render a SQL value as JSON. Temporal values use their ISO forms,
/// decimals are strings to keep precision, non-finite floats become null.
pub fn sql_value_to_json(value: &SqlValue) -> Value {
    match value {
        SqlValue::Null => Value::Null,
        SqlValue::Bool(b) => Value::Bool(*b),
        SqlValue::Int(i) => Value::from(*i),
        SqlValue::Float(f) => serde_json::Number::from_f64(*f)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        SqlValue::Json(v) => v.clone(),
        other => Value::String(other.to_string()),
    }
}
