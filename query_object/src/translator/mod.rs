//! Query translation
//!
//! `QueryTranslator` turns a `QueryRequest` into the data statement, the
//! matching COUNT statement and one shared parameter list. Every field name
//! is resolved through the allow-list before any SQL leaves this module.

pub mod ordering;
pub mod pagination;
pub mod request;
pub mod where_clause;


pub use ordering::{OrderSpec, SortOrder};
pub use pagination::{Pagination, DEFAULT_PAGE_SIZE};
pub use request::QueryRequest;
pub use where_clause::{BoundParam, WhereClause};

use crate::allow_list::{AllowList, FieldSets};
use crate::dialect::{PostgresDialect, SqlDialect};
use crate::errors::QueryError;
use crate::filter::Filter;
use std::sync::Arc;

/// Generated statements for one query call
#[derive(Debug, Clone, PartialEq)]
pub struct TranslatedQuery {
    /// Paginated, ordered projection
    pub data_sql: String,
    /// `COUNT(*)` over the identical WHERE clause
    pub count_sql: String,
    /// Parameters shared by both statements
    pub params: Vec<BoundParam>,
}

/// Allow-listed SQL translator. Immutable once built; cheap to clone.
#[derive(Debug, Clone)]
pub struct QueryTranslator {
    allow_list: Arc<AllowList>,
    field_sets: Arc<FieldSets>,
    dialect: Arc<dyn SqlDialect>,
    default_page_size: i64,
}

impl QueryTranslator {
    pub fn new(allow_list: AllowList) -> Self {
        Self {
            allow_list: Arc::new(allow_list),
            field_sets: Arc::new(FieldSets::empty()),
            dialect: Arc::new(PostgresDialect),
            default_page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Set the date/timestamp field sets
    pub fn with_field_sets(mut self, field_sets: FieldSets) -> Self {
        self.field_sets = Arc::new(field_sets);
        self
    }

    pub fn with_dialect<D: SqlDialect + 'static>(mut self, dialect: D) -> Self {
        self.dialect = Arc::new(dialect);
        self
    }

    /// Page size used when `top <= 0`; non-positive values keep the default
    pub fn with_default_page_size(mut self, page_size: i64) -> Self {
        if page_size > 0 {
            self.default_page_size = page_size;
        }
        self
    }

    pub fn allow_list(&self) -> &AllowList {
        &self.allow_list
    }

    pub fn field_sets(&self) -> &FieldSets {
        &self.field_sets
    }

    pub fn dialect(&self) -> &dyn SqlDialect {
        self.dialect.as_ref()
    }

    pub fn default_page_size(&self) -> i64 {
        self.default_page_size
    }

    /// Build the WHERE clause and its parameters
    pub fn build_where_clause(&self, filters: &[Filter]) -> Result<WhereClause, QueryError> {
        where_clause::build_where_clause(
            &self.allow_list,
            &self.field_sets,
            self.dialect.as_ref(),
            filters,
        )
    }

    /// Build the projection: the listed fields, or every allow-listed column
    pub fn build_select_clause(&self, fields: &[String]) -> Result<String, QueryError> {
        if fields.is_empty() {
            return Ok(self.allow_list.columns().collect::<Vec<_>>().join(", "));
        }

        let columns = fields
            .iter()
            .map(|field| self.allow_list.resolve(field))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(columns.join(", "))
    }

    /// Build ORDER BY from an order token; blank or absent yields ""
    pub fn build_order_clause(&self, order: Option<&str>) -> Result<String, QueryError> {
        let Some(spec) = order.map(OrderSpec::parse).transpose()?.flatten() else {
            return Ok(String::new());
        };
        let column = self.allow_list.resolve(&spec.field)?;

        Ok(format!("ORDER BY {} {}", column, spec.direction.to_sql()))
    }

    /// Build LIMIT/OFFSET
    pub fn build_limit_clause(&self, skip: i64, top: i64) -> String {
        Pagination::from_skip_top(skip, top, self.default_page_size).to_sql(self.dialect.as_ref())
    }

    /// Translate a request into its data and count statements
    pub fn translate(&self, request: &QueryRequest) -> Result<TranslatedQuery, QueryError> {
        let where_clause = self.build_where_clause(&request.filters)?;
        let select_clause = self.build_select_clause(&request.select)?;
        let order_clause = self.build_order_clause(request.order.as_deref())?;
        let limit_clause = self.build_limit_clause(request.skip, request.top);

        let from_where = format!("FROM {} {}", request.table, where_clause.sql);

        let mut data_sql = String::with_capacity(
            select_clause.len() + from_where.len() + order_clause.len() + limit_clause.len() + 16,
        );
        data_sql.push_str("SELECT ");
        data_sql.push_str(&select_clause);
        data_sql.push(' ');
        data_sql.push_str(&from_where);
        if !order_clause.is_empty() {
            data_sql.push(' ');
            data_sql.push_str(&order_clause);
        }
        data_sql.push(' ');
        data_sql.push_str(&limit_clause);

        let count_sql = format!("SELECT COUNT(*) {}", from_where);

        Ok(TranslatedQuery {
            data_sql,
            count_sql,
            params: where_clause.params,
        })
    }
}
