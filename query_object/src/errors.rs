//! Error types for query translation and execution
//!
//! Variants fall into two classes. Usage errors are caller contract
//! violations and are always raised before any statement is executed.
//! Data errors come from operand content or from the database itself.

use crate::filter::FilterOperator;
use crate::validation::ValidationError;
use thiserror::Error;
use type_mapping::CoercionError;

#[derive(Error, Debug)]
pub enum QueryError {
    #[error("Invalid field: {0}")]
    UnknownField(String),

    #[error("IN values empty for field '{0}'")]
    EmptyInList(String),

    #[error("{operator} on field '{field}' expects {expected} operand(s), got {actual}")]
    InvalidArity {
        field: String,
        operator: FilterOperator,
        expected: usize,
        actual: usize,
    },

    #[error("{operator} on field '{field}' requires a value")]
    MissingOperand {
        field: String,
        operator: FilterOperator,
    },

    #[error("Invalid interval '{value}' for field '{field}': expected '<n> day|week|month|year'")]
    InvalidInterval { field: String, value: String },

    #[error("Invalid sort: {0}")]
    InvalidSortDirection(String),

    #[error("Invalid order clause: '{0}'")]
    InvalidOrderClause(String),

    #[error("No changes")]
    EmptyChangeSet,

    #[error("Column '{0}' is stamped automatically and cannot be assigned")]
    ReservedColumn(String),

    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(#[from] ValidationError),

    #[error("Field '{0}' is declared as both a date and a timestamp field")]
    OverlappingFieldSets(String),

    #[error("Invalid value for field '{field}': {source}")]
    Coercion {
        field: String,
        #[source]
        source: CoercionError,
    },

    #[error("No rows updated in {table} where {pk_column} = {pk_value}")]
    NoRowsUpdated {
        table: String,
        pk_column: String,
        pk_value: String,
    },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl QueryError {
    /// True for caller-side contract violations detected before execution
    pub fn is_usage_error(&self) -> bool {
        matches!(
            self,
            QueryError::UnknownField(_)
                | QueryError::EmptyInList(_)
                | QueryError::InvalidArity { .. }
                | QueryError::MissingOperand { .. }
                | QueryError::InvalidInterval { .. }
                | QueryError::InvalidSortDirection(_)
                | QueryError::InvalidOrderClause(_)
                | QueryError::EmptyChangeSet
                | QueryError::ReservedColumn(_)
                | QueryError::InvalidIdentifier(_)
                | QueryError::OverlappingFieldSets(_)
        )
    }

    /// True for failures caused by operand content or the database
    pub fn is_data_error(&self) -> bool {
        !self.is_usage_error()
    }

    pub(crate) fn coercion(field: &str, source: CoercionError) -> Self {
        QueryError::Coercion {
            field: field.to_string(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classes() {
        assert!(QueryError::UnknownField("x".into()).is_usage_error());
        assert!(QueryError::EmptyChangeSet.is_usage_error());
        assert!(QueryError::InvalidSortDirection("SIDEWAYS".into()).is_usage_error());

        let no_rows = QueryError::NoRowsUpdated {
            table: "users".into(),
            pk_column: "id".into(),
            pk_value: "101".into(),
        };
        assert!(no_rows.is_data_error());
        assert!(QueryError::Database(sqlx::Error::RowNotFound).is_data_error());
        assert!(QueryError::coercion(
            "created",
            CoercionError::InvalidDate {
                value: "x".into()
            }
        )
        .is_data_error());
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            QueryError::UnknownField("secret".into()).to_string(),
            "Invalid field: secret"
        );
        let arity = QueryError::InvalidArity {
            field: "price".into(),
            operator: FilterOperator::Between,
            expected: 2,
            actual: 3,
        };
        assert_eq!(
            arity.to_string(),
            "BETWEEN on field 'price' expects 2 operand(s), got 3"
        );
    }
}
