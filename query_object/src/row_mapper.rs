//! Row mapping
//!
//! A `RowMapper` turns one result row into the caller's shape. Closures,
//! any `sqlx::FromRow` type (through `FromRowMapper`) and the default
//! `MapRowToMap` all implement it.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde_json::{Value as JsonValue, json};
use sqlx::postgres::types::{Oid, PgInterval, PgTimeTz};
use sqlx::postgres::{PgRow, PgTypeInfo, PgTypeKind};
use sqlx::types::{Decimal, Uuid};
use sqlx::{Column, FromRow, Row, TypeInfo, ValueRef};
use std::fmt::{self, Write};
use std::marker::PhantomData;
use std::net::IpAddr;
use type_mapping::{Record, SqlValue, sql_value_to_json};

pub trait RowMapper<T>: Send + Sync {
    fn map_row(&self, row: &PgRow) -> Result<T, sqlx::Error>;
}

impl<T, F> RowMapper<T> for F
where
    F: Fn(&PgRow) -> Result<T, sqlx::Error> + Send + Sync,
{
    fn map_row(&self, row: &PgRow) -> Result<T, sqlx::Error> {
        self(row)
    }
}

/// Maps rows through the target type's `sqlx::FromRow` implementation
pub struct FromRowMapper<T> {
    _phantom: PhantomData<fn() -> T>,
}

impl<T> FromRowMapper<T> {
    pub fn new() -> Self {
        Self {
            _phantom: PhantomData,
        }
    }
}

impl<T> Default for FromRowMapper<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for FromRowMapper<T> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for FromRowMapper<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FromRowMapper")
            .field("target", &std::any::type_name::<T>())
            .finish()
    }
}

impl<T> RowMapper<T> for FromRowMapper<T>
where
    T: for<'r> FromRow<'r, PgRow>,
{
    fn map_row(&self, row: &PgRow) -> Result<T, sqlx::Error> {
        T::from_row(row)
    }
}

/// Default mapper: every column into a `Record` keyed by its lower-cased label
#[derive(Debug, Clone, Copy, Default)]
pub struct MapRowToMap;

impl RowMapper<Record> for MapRowToMap {
    fn map_row(&self, row: &PgRow) -> Result<Record, sqlx::Error> {
        let columns = row.columns();
        let mut record = Record::with_capacity(columns.len());
        for column in columns {
            let value = decode_column(row, column.ordinal())?;
            record.insert(column.name(), value);
        }
        Ok(record)
    }
}

/// Decode one column by its PostgreSQL type name.
///
/// NULL becomes `SqlValue::Null`. Arrays and intervals without a native
/// variant come back as `Json`; other unknown types are rendered as text,
/// falling back to `\x` hex of the raw value.
pub fn decode_column(row: &PgRow, index: usize) -> Result<SqlValue, sqlx::Error> {
    let raw = row.try_get_raw(index)?;
    if raw.is_null() {
        return Ok(SqlValue::Null);
    }
    let type_info = raw.type_info().into_owned();
    decode_as(row, index, &type_info)
}

// Unchecked decoding: the type name match is the type check, and domains
// decode through their base type.
fn decode_as(row: &PgRow, index: usize, type_info: &PgTypeInfo) -> Result<SqlValue, sqlx::Error> {
    let value = match type_info.name() {
        "BOOL" => SqlValue::Bool(row.try_get_unchecked(index)?),
        "INT2" => SqlValue::Int(row.try_get_unchecked::<i16, _>(index)?.into()),
        "INT4" => SqlValue::Int(row.try_get_unchecked::<i32, _>(index)?.into()),
        "INT8" => SqlValue::Int(row.try_get_unchecked(index)?),
        "OID" => SqlValue::Int(row.try_get_unchecked::<Oid, _>(index)?.0.into()),
        "FLOAT4" => SqlValue::Float(row.try_get_unchecked::<f32, _>(index)?.into()),
        "FLOAT8" => SqlValue::Float(row.try_get_unchecked(index)?),
        "NUMERIC" => SqlValue::Decimal(row.try_get_unchecked(index)?),
        "TEXT" | "VARCHAR" | "BPCHAR" | "NAME" | "XML" => {
            SqlValue::Text(row.try_get_unchecked(index)?)
        }
        "UUID" => SqlValue::Uuid(row.try_get_unchecked(index)?),
        "DATE" => SqlValue::Date(row.try_get_unchecked(index)?),
        "TIME" => SqlValue::Time(row.try_get_unchecked(index)?),
        "TIMESTAMP" => SqlValue::Timestamp(row.try_get_unchecked(index)?),
        "TIMESTAMPTZ" => SqlValue::TimestampTz(row.try_get_unchecked(index)?),
        "JSON" | "JSONB" => SqlValue::Json(row.try_get_unchecked(index)?),
        "TIMETZ" => {
            let value: PgTimeTz<NaiveTime, FixedOffset> = row.try_get_unchecked(index)?;
            SqlValue::Text(format!("{}{}", value.time, value.offset))
        }
        "INTERVAL" => {
            let value: PgInterval = row.try_get_unchecked(index)?;
            SqlValue::Json(json!({
                "months": value.months,
                "days": value.days,
                "microseconds": value.microseconds,
            }))
        }
        "BYTEA" => SqlValue::Text(hex_text(&row.try_get_unchecked::<Vec<u8>, _>(index)?)),
        "INET" | "CIDR" => {
            let bytes = raw_bytes(row, index)?;
            match inet_text(bytes) {
                Some(text) => SqlValue::Text(text),
                None => SqlValue::Text(hex_text(bytes)),
            }
        }
        "MACADDR" | "MACADDR8" => {
            let bytes = raw_bytes(row, index)?;
            let parts: Vec<String> = bytes.iter().map(|b| format!("{:02x}", b)).collect();
            SqlValue::Text(parts.join(":"))
        }
        name => match type_info.kind() {
            PgTypeKind::Domain(base) => return decode_as(row, index, base),
            PgTypeKind::Enum(_) => SqlValue::Text(row.try_get_unchecked(index)?),
            PgTypeKind::Array(element) => decode_array(row, index, element)?,
            _ if name.eq_ignore_ascii_case("citext") => {
                SqlValue::Text(row.try_get_unchecked(index)?)
            }
            _ => SqlValue::Text(hex_text(raw_bytes(row, index)?)),
        },
    };

    Ok(value)
}

fn decode_array(row: &PgRow, index: usize, element: &PgTypeInfo) -> Result<SqlValue, sqlx::Error> {
    let items = match element.name() {
        "BOOL" => sql_values(row.try_get_unchecked::<Vec<Option<bool>>, _>(index)?),
        "INT2" => sql_values(row.try_get_unchecked::<Vec<Option<i16>>, _>(index)?),
        "INT4" => sql_values(row.try_get_unchecked::<Vec<Option<i32>>, _>(index)?),
        "INT8" => sql_values(row.try_get_unchecked::<Vec<Option<i64>>, _>(index)?),
        "FLOAT4" => sql_values(row.try_get_unchecked::<Vec<Option<f32>>, _>(index)?),
        "FLOAT8" => sql_values(row.try_get_unchecked::<Vec<Option<f64>>, _>(index)?),
        "NUMERIC" => sql_values(row.try_get_unchecked::<Vec<Option<Decimal>>, _>(index)?),
        "TEXT" | "VARCHAR" | "BPCHAR" | "NAME" => {
            sql_values(row.try_get_unchecked::<Vec<Option<String>>, _>(index)?)
        }
        "UUID" => sql_values(row.try_get_unchecked::<Vec<Option<Uuid>>, _>(index)?),
        "DATE" => sql_values(row.try_get_unchecked::<Vec<Option<NaiveDate>>, _>(index)?),
        "TIMESTAMP" => sql_values(row.try_get_unchecked::<Vec<Option<NaiveDateTime>>, _>(index)?),
        "TIMESTAMPTZ" => {
            sql_values(row.try_get_unchecked::<Vec<Option<DateTime<Utc>>>, _>(index)?)
        }
        "JSON" | "JSONB" => sql_values(row.try_get_unchecked::<Vec<Option<JsonValue>>, _>(index)?),
        _ if matches!(element.kind(), PgTypeKind::Enum(_)) => {
            sql_values(row.try_get_unchecked::<Vec<Option<String>>, _>(index)?)
        }
        _ => return Ok(SqlValue::Text(hex_text(raw_bytes(row, index)?))),
    };

    Ok(SqlValue::Json(JsonValue::Array(
        items.iter().map(sql_value_to_json).collect(),
    )))
}

fn sql_values<T: Into<SqlValue>>(items: Vec<Option<T>>) -> Vec<SqlValue> {
    items.into_iter().map(SqlValue::from).collect()
}

fn raw_bytes(row: &PgRow, index: usize) -> Result<&[u8], sqlx::Error> {
    row.try_get_raw(index)?
        .as_bytes()
        .map_err(|source| sqlx::Error::ColumnDecode {
            index: column_label(row, index),
            source,
        })
}

fn column_label(row: &PgRow, index: usize) -> String {
    row.columns()
        .get(index)
        .map(|c| c.name().to_string())
        .unwrap_or_else(|| index.to_string())
}

/// Render bytes the way PostgreSQL prints `bytea`: `\x` then lower-case hex
fn hex_text(bytes: &[u8]) -> String {
    let mut text = String::with_capacity(2 + bytes.len() * 2);
    text.push_str("\\x");
    for byte in bytes {
        let _ = write!(text, "{:02x}", byte);
    }
    text
}

// Binary inet/cidr: family, prefix bits, is_cidr flag, address length, address
fn inet_text(bytes: &[u8]) -> Option<String> {
    let (header, address) = bytes.split_at_checked(4)?;
    let (family, bits, is_cidr, len) = (header[0], header[1], header[2] != 0, header[3]);
    if address.len() != usize::from(len) {
        return None;
    }
    let (ip, max_bits) = match family {
        2 => (IpAddr::from(<[u8; 4]>::try_from(address).ok()?), 32),
        3 => (IpAddr::from(<[u8; 16]>::try_from(address).ok()?), 128),
        _ => return None,
    };
    if is_cidr || bits != max_bits {
        Some(format!("{}/{}", ip, bits))
    } else {
        Some(ip.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, sqlx::FromRow)]
    struct User {
        #[allow(dead_code)]
        id: i64,
    }

    fn assert_mapper<T, M: RowMapper<T>>(_: &M) {}

    #[test]
    fn test_mapper_kinds() {
        assert_mapper::<Record, _>(&MapRowToMap);
        assert_mapper::<User, _>(&FromRowMapper::<User>::new());
        assert_mapper::<i64, _>(&|row: &PgRow| row.try_get::<i64, _>("id"));
    }

    #[test]
    fn test_from_row_mapper_debug_names_target() {
        let mapper = FromRowMapper::<User>::default();
        assert!(format!("{:?}", mapper).contains("User"));
    }

    #[test]
    fn test_hex_text_matches_bytea_output() {
        assert_eq!(hex_text(&[0xde, 0xad, 0xbe, 0xef]), "\\xdeadbeef");
        assert_eq!(hex_text(&[]), "\\x");
    }

    #[test]
    fn test_inet_text_from_binary() {
        assert_eq!(inet_text(&[2, 32, 0, 4, 10, 1, 2, 3]).as_deref(), Some("10.1.2.3"));
        assert_eq!(inet_text(&[2, 8, 1, 4, 10, 0, 0, 0]).as_deref(), Some("10.0.0.0/8"));
        assert_eq!(inet_text(&[2, 24, 0, 4, 192, 168, 0, 7]).as_deref(), Some("192.168.0.7/24"));

        let mut v6 = vec![3, 128, 0, 16];
        v6.extend_from_slice(&[0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1]);
        assert_eq!(inet_text(&v6).as_deref(), Some("::1"));

        assert_eq!(inet_text(&[2, 32, 0, 4, 10]), None);
        assert_eq!(inet_text(&[9, 32, 0, 4, 10, 1, 2, 3]), None);
    }
}
