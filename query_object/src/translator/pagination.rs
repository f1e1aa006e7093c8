//! Pagination bounds
//!
//! `top <= 0` falls back to the default page size; `skip <= 0` drops the
//! offset entirely.

use crate::dialect::SqlDialect;

pub const DEFAULT_PAGE_SIZE: i64 = 25;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub limit: i64,
    pub offset: Option<i64>,
}

impl Pagination {
    pub fn from_skip_top(skip: i64, top: i64, default_page_size: i64) -> Self {
        Self {
            limit: if top > 0 { top } else { default_page_size },
            offset: (skip > 0).then_some(skip),
        }
    }

    pub fn to_sql(&self, dialect: &dyn SqlDialect) -> String {
        dialect.limit_offset(self.limit, self.offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::PostgresDialect;

    #[test]
    fn test_defaults() {
        assert_eq!(
            Pagination::from_skip_top(0, 0, DEFAULT_PAGE_SIZE),
            Pagination { limit: 25, offset: None }
        );
        assert_eq!(
            Pagination::from_skip_top(-5, -1, DEFAULT_PAGE_SIZE),
            Pagination { limit: 25, offset: None }
        );
    }

    #[test]
    fn test_explicit_bounds() {
        let pagination = Pagination::from_skip_top(30, 10, DEFAULT_PAGE_SIZE);
        assert_eq!(pagination.to_sql(&PostgresDialect), "LIMIT 10 OFFSET 30");
    }
}
