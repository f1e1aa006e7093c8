//! Convenience re-exports for common query-object usage

// Translation
pub use crate::allow_list::{AllowList, FieldSets};
pub use crate::dialect::{PostgresDialect, SqlDialect};
pub use crate::filter::{DateInterval, Filter, FilterOperator, IntervalUnit, Logic};
pub use crate::translator::{OrderSpec, QueryRequest, QueryTranslator, SortOrder, TranslatedQuery};
pub use crate::update::{ChangeSet, UpdateColumns, UpdateRequest};

// Execution
pub use crate::generic_executor::GenericExecutor;
pub use crate::result::QueryResult;
pub use crate::row_mapper::{FromRowMapper, MapRowToMap, RowMapper};
pub use crate::traits::QueryStore;

// Errors and validation
pub use crate::errors::QueryError;
pub use crate::validation::{ValidatedFieldName, ValidatedTableName, ValidationError};

// Values
pub use type_mapping::{Record, SqlValue};

// Common external dependencies that are frequently used
pub use async_trait::async_trait;
pub use serde::{Deserialize, Serialize};
pub use sqlx::{FromRow, PgConnection, Row};
