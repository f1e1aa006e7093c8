//! Trait definitions
//!
//! `QueryStore` is the execution surface: query with pagination and total,
//! and update-by-key. Both borrow the caller's connection for one call.

use crate::errors::QueryError;
use crate::result::QueryResult;
use crate::translator::QueryRequest;
use crate::update::UpdateRequest;
use async_trait::async_trait;
use sqlx::PgConnection;

#[async_trait]
pub trait QueryStore<T: Send>: Send + Sync {
    /// Run the data query and the matching count on `conn`.
    ///
    /// Validation and coercion failures are returned before any statement
    /// is sent.
    async fn query(
        &self,
        conn: &mut PgConnection,
        request: &QueryRequest,
    ) -> Result<QueryResult<T>, QueryError>;

    /// Update one row by key, stamping the changed-at column.
    ///
    /// Returns the affected-row count; zero rows is `QueryError::NoRowsUpdated`.
    async fn update(
        &self,
        conn: &mut PgConnection,
        request: &UpdateRequest,
    ) -> Result<u64, QueryError>;
}
