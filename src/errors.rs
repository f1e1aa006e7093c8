//! Error types for the QueryHaus crate
//!
//! This module contains the facade error; translation and execution errors
//! from `query-object` and configuration errors pass through unchanged.

use config::ConfigError;
use query_object::QueryError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum QueryHausError {
    #[error("Database connection error: {0}")]
    DatabaseConnection(#[from] sqlx::Error),

    #[error("Connection attempt timed out after {0} seconds")]
    ConnectTimeout(u64),

    #[error(transparent)]
    Query(#[from] QueryError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl QueryHausError {
    /// True when the caller broke the query contract (bad field, bad arity, ...)
    pub fn is_usage_error(&self) -> bool {
        matches!(self, QueryHausError::Query(e) if e.is_usage_error())
    }
}
