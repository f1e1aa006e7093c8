use crate::row_mapper::MapRowToMap;
use crate::translator::{QueryRequest, QueryTranslator, TranslatedQuery};
use crate::update::{UpdateColumns, UpdateRequest, UpdateStatement, DEFAULT_CHANGED_AT_COLUMN};
use crate::errors::QueryError;
use chrono::Utc;

/// Executes translated queries on a caller-owned connection.
///
/// Holds no connection and no per-call state, so one executor can serve any
/// number of sequential calls.
#[derive(Clone)]
pub struct GenericExecutor<M = MapRowToMap> {
    pub(crate) translator: QueryTranslator,
    pub(crate) mapper: M,
    pub(crate) changed_at_column: String,
    pub(crate) update_columns: UpdateColumns,
}

impl<M> std::fmt::Debug for GenericExecutor<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenericExecutor")
            .field("fields", &self.translator.allow_list().len())
            .field("dialect", &self.translator.dialect())
            .field("changed_at_column", &self.changed_at_column)
            .field("update_columns", &self.update_columns)
            .finish()
    }
}

impl GenericExecutor<MapRowToMap> {
    pub fn new(translator: QueryTranslator) -> Self {
        Self {
            translator,
            mapper: MapRowToMap,
            changed_at_column: DEFAULT_CHANGED_AT_COLUMN.to_string(),
            update_columns: UpdateColumns::default(),
        }
    }
}

impl<M> GenericExecutor<M> {
    /// Swap the row mapper, keeping the rest of the configuration
    pub fn with_row_mapper<N>(self, mapper: N) -> GenericExecutor<N> {
        GenericExecutor {
            translator: self.translator,
            mapper,
            changed_at_column: self.changed_at_column,
            update_columns: self.update_columns,
        }
    }

    pub fn with_changed_at_column(mut self, column: impl Into<String>) -> Self {
        self.changed_at_column = column.into();
        self
    }

    pub fn with_update_columns(mut self, update_columns: UpdateColumns) -> Self {
        self.update_columns = update_columns;
        self
    }

    pub fn translator(&self) -> &QueryTranslator {
        &self.translator
    }

    pub fn changed_at_column(&self) -> &str {
        &self.changed_at_column
    }

    pub fn update_columns(&self) -> UpdateColumns {
        self.update_columns
    }

    /// Translate without executing
    pub fn translate(&self, request: &QueryRequest) -> Result<TranslatedQuery, QueryError> {
        self.translator.translate(request)
    }

    /// Build the UPDATE statement stamped with the current instant
    pub fn update_statement(&self, request: &UpdateRequest) -> Result<UpdateStatement, QueryError> {
        self.translator.build_update(
            request,
            self.update_columns,
            &self.changed_at_column,
            Utc::now(),
        )
    }
}
