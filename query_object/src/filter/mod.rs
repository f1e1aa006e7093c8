//! Filter model
//!
//! A `Filter` is one predicate: a logical field, an operator, its operand(s)
//! and the logic joining it to the predicates before it. Filters are plain
//! values; nothing is validated until translation.

pub mod interval;

pub use interval::{DateInterval, IntervalUnit, ParseIntervalError};

use serde::{Deserialize, Serialize};
use std::fmt;
use type_mapping::SqlValue;

/// Filter operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FilterOperator {
    Eq,      // =
    Ne,      // <>
    Gt,      // >
    Lt,      // <
    Ge,      // >=
    Le,      // <=
    Like,    // LOWER(col) LIKE LOWER(%v%)
    In,      // IN (...)
    Between, // BETWEEN a AND b
    DateWithinFutureInterval,
    DateWithinPastInterval,
}

impl FilterOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterOperator::Eq => "EQ",
            FilterOperator::Ne => "NE",
            FilterOperator::Gt => "GT",
            FilterOperator::Lt => "LT",
            FilterOperator::Ge => "GE",
            FilterOperator::Le => "LE",
            FilterOperator::Like => "LIKE",
            FilterOperator::In => "IN",
            FilterOperator::Between => "BETWEEN",
            FilterOperator::DateWithinFutureInterval => "DATE_WITHIN_FUTURE_INTERVAL",
            FilterOperator::DateWithinPastInterval => "DATE_WITHIN_PAST_INTERVAL",
        }
    }
}

impl fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a filter is joined to the clause built so far
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Logic {
    #[default]
    And,
    Or,
}

impl Logic {
    /// Keyword with surrounding spaces, ready to append to a clause
    pub fn keyword(&self) -> &'static str {
        match self {
            Logic::And => " AND ",
            Logic::Or => " OR ",
        }
    }
}

/// Single predicate in the WHERE clause
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Filter {
    field: String,
    operator: FilterOperator,
    #[serde(default)]
    value: Option<SqlValue>,
    #[serde(default)]
    values: Vec<SqlValue>,
    #[serde(default)]
    logic: Logic,
}

impl Filter {
    /// Create a filter from raw parts, joined with AND
    pub fn new(
        field: impl Into<String>,
        operator: FilterOperator,
        value: Option<SqlValue>,
        values: Vec<SqlValue>,
    ) -> Self {
        Self {
            field: field.into(),
            operator,
            value,
            values,
            logic: Logic::And,
        }
    }

    fn single(field: impl Into<String>, operator: FilterOperator, value: SqlValue) -> Self {
        Self::new(field, operator, Some(value), Vec::new())
    }

    fn list(field: impl Into<String>, operator: FilterOperator, values: Vec<SqlValue>) -> Self {
        Self::new(field, operator, None, values)
    }

    /// Equal condition
    pub fn eq(field: impl Into<String>, value: impl Into<SqlValue>) -> Self {
        Self::single(field, FilterOperator::Eq, value.into())
    }

    /// Not equal condition
    pub fn ne(field: impl Into<String>, value: impl Into<SqlValue>) -> Self {
        Self::single(field, FilterOperator::Ne, value.into())
    }

    /// Greater than condition
    pub fn gt(field: impl Into<String>, value: impl Into<SqlValue>) -> Self {
        Self::single(field, FilterOperator::Gt, value.into())
    }

    /// Less than condition
    pub fn lt(field: impl Into<String>, value: impl Into<SqlValue>) -> Self {
        Self::single(field, FilterOperator::Lt, value.into())
    }

    /// Greater than or equal condition
    pub fn ge(field: impl Into<String>, value: impl Into<SqlValue>) -> Self {
        Self::single(field, FilterOperator::Ge, value.into())
    }

    /// Less than or equal condition
    pub fn le(field: impl Into<String>, value: impl Into<SqlValue>) -> Self {
        Self::single(field, FilterOperator::Le, value.into())
    }

    /// Case-insensitive containment; the pattern is wrapped in `%` at translation
    pub fn like(field: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self::single(field, FilterOperator::Like, SqlValue::Text(pattern.into()))
    }

    /// IN condition
    pub fn in_values<I, V>(field: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<SqlValue>,
    {
        Self::list(
            field,
            FilterOperator::In,
            values.into_iter().map(Into::into).collect(),
        )
    }

    /// BETWEEN condition, inclusive on both ends
    pub fn between(
        field: impl Into<String>,
        start: impl Into<SqlValue>,
        end: impl Into<SqlValue>,
    ) -> Self {
        Self::list(
            field,
            FilterOperator::Between,
            vec![start.into(), end.into()],
        )
    }

    /// Date between today and today + interval
    pub fn date_within_future(field: impl Into<String>, interval: DateInterval) -> Self {
        Self::single(
            field,
            FilterOperator::DateWithinFutureInterval,
            SqlValue::Text(interval.to_string()),
        )
    }

    /// Date between today - interval and today
    pub fn date_within_past(field: impl Into<String>, interval: DateInterval) -> Self {
        Self::single(
            field,
            FilterOperator::DateWithinPastInterval,
            SqlValue::Text(interval.to_string()),
        )
    }

    /// Copy of this filter joined with OR instead of AND
    pub fn or(&self) -> Self {
        Self {
            logic: Logic::Or,
            ..self.clone()
        }
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn operator(&self) -> FilterOperator {
        self.operator
    }

    pub fn value(&self) -> Option<&SqlValue> {
        self.value.as_ref()
    }

    pub fn values(&self) -> &[SqlValue] {
        &self.values
    }

    pub fn logic(&self) -> Logic {
        self.logic
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_factories_default_to_and() {
        let filters = [
            Filter::eq("status", "active"),
            Filter::ne("status", "deleted"),
            Filter::gt("age", 18),
            Filter::lt("age", 65),
            Filter::ge("score", 1.5),
            Filter::le("score", 9.5),
            Filter::like("name", "ann"),
            Filter::in_values("id", [1, 2, 3]),
            Filter::between("created", "2024-01-01", "2024-12-31"),
            Filter::date_within_future("due", DateInterval::days(7)),
            Filter::date_within_past("due", DateInterval::months(1)),
        ];

        for filter in &filters {
            assert_eq!(filter.logic(), Logic::And);
        }
        assert_eq!(filters[0].operator(), FilterOperator::Eq);
        assert_eq!(filters[7].values().len(), 3);
        assert!(filters[7].value().is_none());
        assert_eq!(filters[9].value(), Some(&SqlValue::Text("7 days".into())));
    }

    #[test]
    fn test_or_copies_everything_but_logic() {
        let original = Filter::between("price", 10, 20);
        let flipped = original.or();

        assert_eq!(original.logic(), Logic::And);
        assert_eq!(flipped.logic(), Logic::Or);
        assert_eq!(flipped.field(), "price");
        assert_eq!(flipped.operator(), FilterOperator::Between);
        assert_eq!(flipped.values(), original.values());
    }

    #[test]
    fn test_no_validation_at_construction() {
        let filter = Filter::in_values("anything", Vec::<i32>::new());
        assert!(filter.values().is_empty());

        let filter = Filter::new("x", FilterOperator::Between, None, vec![SqlValue::Int(1)]);
        assert_eq!(filter.values().len(), 1);
    }

    #[test]
    fn test_deserialize_from_json() {
        let filter: Filter = serde_json::from_value(json!({
            "field": "status",
            "operator": "IN",
            "values": ["a", "b"],
            "logic": "OR"
        }))
        .unwrap();

        assert_eq!(filter.operator(), FilterOperator::In);
        assert_eq!(filter.logic(), Logic::Or);
        assert_eq!(filter.values()[1], SqlValue::Text("b".into()));

        let filter: Filter =
            serde_json::from_value(json!({"field": "deleted_at", "operator": "EQ"})).unwrap();
        assert_eq!(filter.logic(), Logic::And);
        assert!(filter.value().is_none());
    }

    #[test]
    fn test_operator_names() {
        assert_eq!(FilterOperator::Ge.to_string(), "GE");
        assert_eq!(
            FilterOperator::DateWithinPastInterval.to_string(),
            "DATE_WITHIN_PAST_INTERVAL"
        );
    }
}
