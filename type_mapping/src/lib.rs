//! Unified value mapping between Rust types and PostgreSQL
//! This crate provides the operand and cell value model used across the queryhaus ecosystem

pub mod coerce;
pub mod record;
pub mod serialize;
pub mod types;

pub use coerce::{parse_date, parse_timestamp, Coercion, CoercionError};
pub use record::Record;
pub use serialize::{json_to_sql_value, sql_value_to_json};
pub use types::SqlValue;
