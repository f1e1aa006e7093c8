//! Order clause parsing
//!
//! An order token is `"field"` or `"field ASC|DESC"`; the direction is
//! case-insensitive and defaults to ascending.

use crate::errors::QueryError;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn to_sql(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

impl FromStr for SortOrder {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "ASC" => Ok(SortOrder::Asc),
            "DESC" => Ok(SortOrder::Desc),
            other => Err(QueryError::InvalidSortDirection(other.to_string())),
        }
    }
}

/// A single ORDER BY item over a logical field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderSpec {
    pub field: String,
    pub direction: SortOrder,
}

impl OrderSpec {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortOrder::Asc,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortOrder::Desc,
        }
    }

    /// Parse an order token. Blank input means "no ordering".
    pub fn parse(token: &str) -> Result<Option<Self>, QueryError> {
        let mut parts = token.split_whitespace();
        let Some(field) = parts.next() else {
            return Ok(None);
        };
        let direction = match parts.next() {
            Some(direction) => direction.parse()?,
            None => SortOrder::Asc,
        };
        if parts.next().is_some() {
            return Err(QueryError::InvalidOrderClause(token.trim().to_string()));
        }

        Ok(Some(Self {
            field: field.to_string(),
            direction,
        }))
    }
}

impl fmt::Display for OrderSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field, self.direction.to_sql())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tokens() {
        assert_eq!(OrderSpec::parse("created DESC").unwrap(), Some(OrderSpec::desc("created")));
        assert_eq!(OrderSpec::parse("created desc").unwrap(), Some(OrderSpec::desc("created")));
        assert_eq!(OrderSpec::parse("  name ").unwrap(), Some(OrderSpec::asc("name")));
        assert_eq!(OrderSpec::parse("").unwrap(), None);
        assert_eq!(OrderSpec::parse("   ").unwrap(), None);
    }

    #[test]
    fn test_parse_rejects_bad_direction() {
        let err = OrderSpec::parse("name; DROP").unwrap_err();
        assert!(matches!(err, QueryError::InvalidSortDirection(ref d) if d == "DROP"));

        let err = OrderSpec::parse("name sideways").unwrap_err();
        assert!(matches!(err, QueryError::InvalidSortDirection(ref d) if d == "SIDEWAYS"));
    }

    #[test]
    fn test_parse_rejects_extra_tokens() {
        let err = OrderSpec::parse("name ASC, id").unwrap_err();
        assert!(matches!(err, QueryError::InvalidOrderClause(_)));
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        let spec = OrderSpec::desc("created");
        assert_eq!(OrderSpec::parse(&spec.to_string()).unwrap(), Some(spec));
    }
}
