//! WHERE clause generation
//!
//! The clause always starts with `WHERE 1=1` so every filter can be
//! prefixed uniformly with its own AND/OR keyword. Each placeholder is
//! recorded together with the logical field it came from.

use crate::allow_list::{AllowList, FieldSets};
use crate::dialect::SqlDialect;
use crate::errors::QueryError;
use crate::filter::{DateInterval, Filter, FilterOperator};
use type_mapping::{Coercion, SqlValue};

/// One bound parameter and the field it belongs to
#[derive(Debug, Clone, PartialEq)]
pub struct BoundParam {
    pub field: String,
    pub value: SqlValue,
    pub coercion: Coercion,
}

/// WHERE clause text and its parameters, in placeholder order
#[derive(Debug, Clone, PartialEq)]
pub struct WhereClause {
    pub sql: String,
    pub params: Vec<BoundParam>,
}

pub(crate) fn build_where_clause(
    allow_list: &AllowList,
    field_sets: &FieldSets,
    dialect: &dyn SqlDialect,
    filters: &[Filter],
) -> Result<WhereClause, QueryError> {
    let mut sql = String::from("WHERE 1=1");
    let mut params = Vec::new();

    for filter in filters {
        let column = allow_list.resolve(filter.field())?;
        let fragment = build_fragment(column, filter, field_sets, dialect, &mut params)?;
        sql.push_str(filter.logic().keyword());
        sql.push_str(&fragment);
    }

    Ok(WhereClause { sql, params })
}

fn build_fragment(
    column: &str,
    filter: &Filter,
    field_sets: &FieldSets,
    dialect: &dyn SqlDialect,
    params: &mut Vec<BoundParam>,
) -> Result<String, QueryError> {
    let field = filter.field();
    let coercion = field_sets.coercion_for(field);
    let mut bind = |value: SqlValue, coercion: Coercion| -> String {
        params.push(BoundParam {
            field: field.to_string(),
            value,
            coercion,
        });
        dialect.placeholder(params.len())
    };

    let fragment = match filter.operator() {
        FilterOperator::Eq => format!("{} = {}", column, bind(single_operand(filter), coercion)),
        FilterOperator::Ne => format!("{} <> {}", column, bind(single_operand(filter), coercion)),
        FilterOperator::Gt => format!("{} > {}", column, bind(single_operand(filter), coercion)),
        FilterOperator::Lt => format!("{} < {}", column, bind(single_operand(filter), coercion)),
        FilterOperator::Ge => format!("{} >= {}", column, bind(single_operand(filter), coercion)),
        FilterOperator::Le => format!("{} <= {}", column, bind(single_operand(filter), coercion)),
        FilterOperator::Like => {
            // The wrapped pattern is never a valid date, so it is bound as text
            let pattern = match filter.value() {
                Some(value) if !value.is_null() => format!("%{}%", value),
                _ => return Err(missing_operand(filter)),
            };
            let placeholder = bind(SqlValue::Text(pattern), Coercion::None);
            dialect.case_insensitive_like(column, &placeholder)
        }
        FilterOperator::Between => {
            let [start, end] = filter.values() else {
                return Err(QueryError::InvalidArity {
                    field: field.to_string(),
                    operator: FilterOperator::Between,
                    expected: 2,
                    actual: filter.values().len(),
                });
            };
            let start = bind(start.clone(), coercion);
            let end = bind(end.clone(), coercion);
            format!("{} BETWEEN {} AND {}", column, start, end)
        }
        FilterOperator::In => {
            if filter.values().is_empty() {
                return Err(QueryError::EmptyInList(field.to_string()));
            }
            let placeholders: Vec<String> = filter
                .values()
                .iter()
                .map(|value| bind(value.clone(), coercion))
                .collect();
            format!("{} IN ({})", column, placeholders.join(", "))
        }
        FilterOperator::DateWithinFutureInterval => {
            dialect.date_within_future(column, &interval_operand(filter)?)
        }
        FilterOperator::DateWithinPastInterval => {
            dialect.date_within_past(column, &interval_operand(filter)?)
        }
    };

    Ok(fragment)
}

/// Comparison operand; an absent value binds as NULL
fn single_operand(filter: &Filter) -> SqlValue {
    filter.value().cloned().unwrap_or(SqlValue::Null)
}

fn interval_operand(filter: &Filter) -> Result<DateInterval, QueryError> {
    let invalid = |value: String| QueryError::InvalidInterval {
        field: filter.field().to_string(),
        value,
    };

    match filter.value() {
        None | Some(SqlValue::Null) => Err(missing_operand(filter)),
        Some(SqlValue::Text(text)) => text.parse().map_err(|_| invalid(text.clone())),
        Some(other) => Err(invalid(other.to_string())),
    }
}

fn missing_operand(filter: &Filter) -> QueryError {
    QueryError::MissingOperand {
        field: filter.field().to_string(),
        operator: filter.operator(),
    }
}
