//! Query Object - allow-listed query translation for QueryHaus
//!
//! This crate turns filter predicates, field selection, ordering and
//! pagination into parameterized PostgreSQL, executes the data and count
//! queries on a caller-owned connection and maps the rows.

/// Full statement text is only traced with the `debug-logging` feature
#[cfg(feature = "debug-logging")]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        tracing::debug!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
macro_rules! debug_log {
    ($($arg:tt)*) => {};
}

pub mod allow_list;
pub mod binder;
pub mod dialect;
pub mod errors;
pub mod filter;
pub mod generic_executor;
pub mod prelude;
pub mod result;
pub mod row_mapper;
pub mod traits;
pub mod translator;
pub mod update;
pub mod validation;

pub use allow_list::{AllowList, FieldSets};
pub use dialect::{PostgresDialect, SqlDialect};
pub use errors::QueryError;
pub use filter::{DateInterval, Filter, FilterOperator, IntervalUnit, Logic};
pub use generic_executor::GenericExecutor;
pub use result::QueryResult;
pub use row_mapper::{FromRowMapper, MapRowToMap, RowMapper};
pub use traits::QueryStore;
pub use translator::{BoundParam, OrderSpec, QueryRequest, QueryTranslator, SortOrder, TranslatedQuery};
pub use update::{ChangeSet, UpdateColumns, UpdateRequest, UpdateStatement};
pub use validation::{ValidatedFieldName, ValidatedTableName, ValidationError};

pub use type_mapping::{Coercion, Record, SqlValue};
