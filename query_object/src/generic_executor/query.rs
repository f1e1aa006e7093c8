//! QueryStore implementation for the generic executor

use super::core::GenericExecutor;
use crate::binder::{bind_query, bind_scalar, coerce_params};
use crate::errors::QueryError;
use crate::result::QueryResult;
use crate::row_mapper::RowMapper;
use crate::traits::QueryStore;
use crate::translator::QueryRequest;
use crate::update::UpdateRequest;
use async_trait::async_trait;
use sqlx::PgConnection;

#[async_trait]
impl<T, M> QueryStore<T> for GenericExecutor<M>
where
    T: Send,
    M: RowMapper<T>,
{
    async fn query(
        &self,
        conn: &mut PgConnection,
        request: &QueryRequest,
    ) -> Result<QueryResult<T>, QueryError> {
        let translated = self.translator.translate(request)?;
        let values = coerce_params(&translated.params)?;

        tracing::debug!(
            table = %request.table,
            filters = request.filters.len(),
            params = values.len(),
            "Executing query"
        );
        debug_log!("Data SQL: {}", translated.data_sql);
        debug_log!("Count SQL: {}", translated.count_sql);

        let rows = bind_query(sqlx::query(&translated.data_sql), values.clone())
            .fetch_all(&mut *conn)
            .await?;

        let data = rows
            .iter()
            .map(|row| self.mapper.map_row(row))
            .collect::<Result<Vec<T>, sqlx::Error>>()?;

        let total: i64 = bind_scalar(sqlx::query_scalar(&translated.count_sql), values)
            .fetch_one(&mut *conn)
            .await?;

        tracing::debug!(
            table = %request.table,
            rows = data.len(),
            total,
            "Query complete"
        );

        Ok(QueryResult::new(data, total))
    }

    async fn update(
        &self,
        conn: &mut PgConnection,
        request: &UpdateRequest,
    ) -> Result<u64, QueryError> {
        let statement = self.update_statement(request)?;
        let values = coerce_params(&statement.params)?;

        tracing::debug!(
            table = %request.table,
            changes = request.changes.len(),
            params = values.len(),
            "Executing update"
        );
        debug_log!("Update SQL: {}", statement.sql);

        let affected = bind_query(sqlx::query(&statement.sql), values)
            .execute(&mut *conn)
            .await?
            .rows_affected();

        if affected == 0 {
            return Err(QueryError::NoRowsUpdated {
                table: request.table.clone(),
                pk_column: request.pk_column.clone(),
                pk_value: request.pk_value.to_string(),
            });
        }

        tracing::debug!(table = %request.table, affected, "Update complete");

        Ok(affected)
    }
}
