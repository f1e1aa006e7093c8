//! SQL dialect seam
//!
//! Placeholders, pagination, current-date interval arithmetic and
//! case-insensitive LIKE are the only dialect-specific fragments the
//! translator emits. Everything else is plain SQL.

use crate::filter::DateInterval;
use std::fmt::Debug;

pub trait SqlDialect: Debug + Send + Sync {
    /// Render the placeholder for the 1-based parameter `index`
    fn placeholder(&self, index: usize) -> String;

    /// Case-insensitive LIKE of `column` against the bound pattern
    fn case_insensitive_like(&self, column: &str, placeholder: &str) -> String;

    /// `column` falls between today and today + `interval`
    fn date_within_future(&self, column: &str, interval: &DateInterval) -> String;

    /// `column` falls between today - `interval` and today
    fn date_within_past(&self, column: &str, interval: &DateInterval) -> String;

    /// Pagination clause
    fn limit_offset(&self, limit: i64, offset: Option<i64>) -> String;
}

/// PostgreSQL dialect
#[derive(Debug, Clone, Copy, Default)]
pub struct PostgresDialect;

impl SqlDialect for PostgresDialect {
    fn placeholder(&self, index: usize) -> String {
        format!("${}", index)
    }

    fn case_insensitive_like(&self, column: &str, placeholder: &str) -> String {
        format!("LOWER({}) LIKE LOWER({})", column, placeholder)
    }

    // The interval is embedded, not bound. `DateInterval` only renders
    // `<digits> <unit>`, which keeps the literal free of quotes.
    fn date_within_future(&self, column: &str, interval: &DateInterval) -> String {
        format!(
            "{} BETWEEN CURRENT_DATE AND CURRENT_DATE + INTERVAL '{}'",
            column, interval
        )
    }

    fn date_within_past(&self, column: &str, interval: &DateInterval) -> String {
        format!(
            "{} BETWEEN CURRENT_DATE - INTERVAL '{}' AND CURRENT_DATE",
            column, interval
        )
    }

    fn limit_offset(&self, limit: i64, offset: Option<i64>) -> String {
        match offset {
            Some(offset) => format!("LIMIT {} OFFSET {}", limit, offset),
            None => format!("LIMIT {}", limit),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_postgres_fragments() {
        let dialect = PostgresDialect;

        assert_eq!(dialect.placeholder(3), "$3");
        assert_eq!(
            dialect.case_insensitive_like("name", "$1"),
            "LOWER(name) LIKE LOWER($1)"
        );
        assert_eq!(
            dialect.date_within_future("due_on", &DateInterval::days(7)),
            "due_on BETWEEN CURRENT_DATE AND CURRENT_DATE + INTERVAL '7 days'"
        );
        assert_eq!(
            dialect.date_within_past("due_on", &DateInterval::months(1)),
            "due_on BETWEEN CURRENT_DATE - INTERVAL '1 month' AND CURRENT_DATE"
        );
        assert_eq!(dialect.limit_offset(25, None), "LIMIT 25");
        assert_eq!(dialect.limit_offset(10, Some(40)), "LIMIT 10 OFFSET 40");
    }
}
