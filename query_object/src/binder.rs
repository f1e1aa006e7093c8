//! Parameter coercion and binding
//!
//! Translated parameters are coerced according to their field's date or
//! timestamp membership, then bound with their native PostgreSQL type.

use crate::errors::QueryError;
use crate::translator::BoundParam;
use sqlx::encode::IsNull;
use sqlx::error::BoxDynError;
use sqlx::postgres::types::Oid;
use sqlx::postgres::{PgArgumentBuffer, PgArguments, PgTypeInfo, Postgres};
use sqlx::query::{Query, QueryScalar};
use sqlx::{Encode, Type};
use type_mapping::SqlValue;

/// NULL parameter sent with OID 0, so PostgreSQL infers its type from
/// the surrounding expression or target column.
#[derive(Debug, Clone, Copy)]
pub(crate) struct UntypedNull;

impl Type<Postgres> for UntypedNull {
    fn type_info() -> PgTypeInfo {
        PgTypeInfo::with_oid(Oid(0))
    }
}

impl Encode<'_, Postgres> for UntypedNull {
    fn encode_by_ref(&self, _buf: &mut PgArgumentBuffer) -> Result<IsNull, BoxDynError> {
        Ok(IsNull::Yes)
    }
}

/// Coerce every parameter before any statement runs.
///
/// Fails on the first operand that does not parse as its field's date or
/// timestamp type.
pub fn coerce_params(params: &[BoundParam]) -> Result<Vec<SqlValue>, QueryError> {
    params
        .iter()
        .map(|param| {
            param
                .value
                .clone()
                .coerce(param.coercion)
                .map_err(|e| QueryError::coercion(&param.field, e))
        })
        .collect()
}

// Shared binding logic for the query shapes used by the executor
macro_rules! bind_sql_value {
    ($query:expr, $value:expr) => {
        match $value {
            SqlValue::Null => $query.bind(UntypedNull),
            SqlValue::Bool(b) => $query.bind(b),
            SqlValue::Int(i) => {
                if i >= i32::MIN as i64 && i <= i32::MAX as i64 {
                    $query.bind(i as i32)
                } else {
                    $query.bind(i)
                }
            }
            SqlValue::Float(f) => $query.bind(f),
            SqlValue::Text(s) => $query.bind(s),
            SqlValue::Decimal(d) => $query.bind(d),
            SqlValue::Uuid(u) => $query.bind(u),
            SqlValue::Date(d) => $query.bind(d),
            SqlValue::Time(t) => $query.bind(t),
            SqlValue::Timestamp(ts) => $query.bind(ts),
            SqlValue::TimestampTz(ts) => $query.bind(ts),
            SqlValue::Json(json) => $query.bind(json),
        }
    };
}

pub(crate) fn bind_query<'q>(
    mut query: Query<'q, Postgres, PgArguments>,
    values: Vec<SqlValue>,
) -> Query<'q, Postgres, PgArguments> {
    for value in values {
        query = bind_sql_value!(query, value);
    }
    query
}

pub(crate) fn bind_scalar<'q, O>(
    mut query: QueryScalar<'q, Postgres, O, PgArguments>,
    values: Vec<SqlValue>,
) -> QueryScalar<'q, Postgres, O, PgArguments> {
    for value in values {
        query = bind_sql_value!(query, value);
    }
    query
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};
    use type_mapping::Coercion;

    fn param(field: &str, value: impl Into<SqlValue>, coercion: Coercion) -> BoundParam {
        BoundParam {
            field: field.to_string(),
            value: value.into(),
            coercion,
        }
    }

    #[test]
    fn test_coerces_date_and_timestamp_text() {
        let values = coerce_params(&[
            param("status", "active", Coercion::None),
            param("birthday", "2001-02-03", Coercion::Date),
            param("created", "2024-01-01 10:30:00", Coercion::Timestamp),
        ])
        .unwrap();

        assert_eq!(values[0], SqlValue::from("active"));
        assert_eq!(
            values[1],
            SqlValue::Date(NaiveDate::from_ymd_opt(2001, 2, 3).unwrap())
        );
        let expected: NaiveDateTime = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(10, 30, 0)
            .unwrap();
        assert_eq!(values[2], SqlValue::Timestamp(expected));
    }

    #[test]
    fn test_native_values_pass_through() {
        let date = NaiveDate::from_ymd_opt(2020, 5, 1).unwrap();
        let values = coerce_params(&[
            param("birthday", date, Coercion::Date),
            param("created", SqlValue::Null, Coercion::Timestamp),
            param("id", 7, Coercion::Date),
        ])
        .unwrap();

        assert_eq!(values, vec![SqlValue::Date(date), SqlValue::Null, SqlValue::Int(7)]);
    }

    #[test]
    fn test_null_is_sent_without_a_type() {
        assert_eq!(
            <UntypedNull as Type<Postgres>>::type_info(),
            PgTypeInfo::with_oid(Oid(0))
        );
        assert_ne!(
            <UntypedNull as Type<Postgres>>::type_info(),
            <String as Type<Postgres>>::type_info()
        );
    }

    #[test]
    fn test_malformed_date_is_data_error() {
        let err = coerce_params(&[param("birthday", "yesterday", Coercion::Date)]).unwrap_err();

        assert!(matches!(err, QueryError::Coercion { ref field, .. } if field == "birthday"));
        assert!(err.is_data_error());
    }
}
