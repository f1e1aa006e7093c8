//! Query request
//!
//! Bundles the inputs of one `query` call: table, selection, filters,
//! order token and pagination.

use crate::filter::Filter;

/// Inputs of a single query call.
///
/// `table` is a physical table name and is NOT checked against anything; it
/// must come from trusted code, never from request input. Use
/// [`ValidatedTableName`](crate::validation::ValidatedTableName) upstream if
/// it does.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryRequest {
    pub table: String,
    pub select: Vec<String>,
    pub filters: Vec<Filter>,
    pub order: Option<String>,
    pub skip: i64,
    pub top: i64,
}

impl QueryRequest {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            ..Self::default()
        }
    }

    /// Logical fields to project; empty selects every allow-listed column
    pub fn select<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.select = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Append a filter
    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    /// Append filters in order
    pub fn filters(mut self, filters: impl IntoIterator<Item = Filter>) -> Self {
        self.filters.extend(filters);
        self
    }

    /// Order token, e.g. `"created DESC"`
    pub fn order_by(mut self, order: impl Into<String>) -> Self {
        self.order = Some(order.into());
        self
    }

    pub fn skip(mut self, skip: i64) -> Self {
        self.skip = skip;
        self
    }

    pub fn top(mut self, top: i64) -> Self {
        self.top = top;
        self
    }
}
