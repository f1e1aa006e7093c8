//! Core QueryHaus functionality
//!
//! `QueryHaus` owns one live PostgreSQL connection and the executor built
//! from the translator configuration. There is no pooling: every call
//! borrows the single connection exclusively.

use std::time::Duration;

use config::{AppConfig, DatabaseConfig, TranslatorConfig, UpdateColumnPolicy};
use query_object::{
    AllowList, FieldSets, GenericExecutor, QueryRequest, QueryResult, QueryStore,
    QueryTranslator, UpdateColumns, UpdateRequest,
};
use sqlx::postgres::PgConnectOptions;
use sqlx::{ConnectOptions, Connection, PgConnection};
use type_mapping::Record;

use crate::errors::QueryHausError;

/// Connection handle plus the configured executor
pub struct QueryHaus {
    conn: PgConnection,
    executor: GenericExecutor,
}

impl std::fmt::Debug for QueryHaus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryHaus")
            .field("executor", &self.executor)
            .finish_non_exhaustive()
    }
}

impl QueryHaus {
    /// Connect and build the executor from a complete configuration
    pub async fn new(config: &AppConfig) -> Result<Self, QueryHausError> {
        let executor = build_executor(&config.translator)?;
        let conn = Self::connect(&config.database).await?;
        Ok(Self { conn, executor })
    }

    /// Open one connection, bounded by `connection_timeout_seconds`
    pub async fn connect(config: &DatabaseConfig) -> Result<PgConnection, QueryHausError> {
        config.validate()?;

        let mut options = PgConnectOptions::new()
            .host(&config.host)
            .port(config.port)
            .database(&config.database)
            .username(&config.username)
            .password(&config.password);

        if config.statement_timeout_ms > 0 {
            options = options.options([("statement_timeout", config.statement_timeout_ms)]);
        }

        debug_log!(
            "Connecting to {}:{}/{} as {}",
            config.host,
            config.port,
            config.database,
            config.username
        );

        let timeout = Duration::from_secs(config.connection_timeout_seconds);
        let conn = tokio::time::timeout(timeout, options.connect())
            .await
            .map_err(|_| QueryHausError::ConnectTimeout(config.connection_timeout_seconds))??;

        tracing::debug!(
            host = %config.host,
            database = %config.database,
            statement_timeout_ms = config.statement_timeout_ms,
            "Connected"
        );

        Ok(conn)
    }

    /// Wrap a connection the caller opened
    pub fn from_connection(conn: PgConnection, executor: GenericExecutor) -> Self {
        Self { conn, executor }
    }

    pub fn executor(&self) -> &GenericExecutor {
        &self.executor
    }

    /// Lend the connection, e.g. to begin a transaction
    pub fn connection(&mut self) -> &mut PgConnection {
        &mut self.conn
    }

    /// Run a query with the configured executor
    pub async fn query(
        &mut self,
        request: &QueryRequest,
    ) -> Result<QueryResult<Record>, QueryHausError> {
        Ok(self.executor.query(&mut self.conn, request).await?)
    }

    /// Run an update with the configured executor
    pub async fn update(&mut self, request: &UpdateRequest) -> Result<u64, QueryHausError> {
        Ok(self.executor.update(&mut self.conn, request).await?)
    }

    /// Check database connection health
    pub async fn health_check(&mut self) -> Result<(), QueryHausError> {
        sqlx::query("SELECT 1").fetch_one(&mut self.conn).await?;
        trace_log!("Health check passed");
        Ok(())
    }

    /// Close the connection gracefully
    pub async fn close(self) -> Result<(), QueryHausError> {
        self.conn.close().await?;
        Ok(())
    }
}

/// Build a `GenericExecutor` from translator configuration
pub fn build_executor(config: &TranslatorConfig) -> Result<GenericExecutor, QueryHausError> {
    config.validate()?;

    let allow_list: AllowList = config
        .fields
        .iter()
        .map(|field| (field.name.as_str(), field.column.as_str()))
        .collect();
    let field_sets = FieldSets::new(&config.date_fields, &config.timestamp_fields)?;

    let translator = QueryTranslator::new(allow_list)
        .with_field_sets(field_sets)
        .with_default_page_size(config.default_page_size);

    let update_columns = match config.update_columns {
        UpdateColumnPolicy::AllowList => UpdateColumns::AllowList,
        UpdateColumnPolicy::Physical => UpdateColumns::Physical,
    };

    Ok(GenericExecutor::new(translator)
        .with_changed_at_column(config.changed_at_column.as_str())
        .with_update_columns(update_columns))
}
