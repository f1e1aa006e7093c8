//! Allow-list and field typing
//!
//! The allow-list is the only gate deciding which logical fields can be
//! filtered, selected or sorted on, and which physical column each maps to.

use crate::errors::QueryError;
use std::collections::{HashMap, HashSet};
use type_mapping::Coercion;

/// Ordered mapping from logical field names to physical column names
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AllowList {
    entries: Vec<(String, String)>,
    index: HashMap<String, usize>,
}

impl AllowList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a mapping. Re-adding a logical name replaces its column in place.
    pub fn with_field(mut self, logical: impl Into<String>, column: impl Into<String>) -> Self {
        self.insert(logical.into(), column.into());
        self
    }

    fn insert(&mut self, logical: String, column: String) {
        match self.index.get(&logical) {
            Some(&position) => self.entries[position].1 = column,
            None => {
                self.index.insert(logical.clone(), self.entries.len());
                self.entries.push((logical, column));
            }
        }
    }

    /// Resolve a logical field to its physical column
    pub fn resolve(&self, logical: &str) -> Result<&str, QueryError> {
        self.index
            .get(logical)
            .map(|&position| self.entries[position].1.as_str())
            .ok_or_else(|| QueryError::UnknownField(logical.to_string()))
    }

    pub fn contains(&self, logical: &str) -> bool {
        self.index.contains_key(logical)
    }

    /// Physical columns in allow-list order
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(_, column)| column.as_str())
    }

    /// Logical names in allow-list order
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(logical, _)| logical.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for AllowList
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut allow_list = AllowList::new();
        for (logical, column) in iter {
            allow_list.insert(logical.into(), column.into());
        }
        allow_list
    }
}

/// Logical fields whose string operands are parsed as dates or timestamps
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldSets {
    date_fields: HashSet<String>,
    timestamp_fields: HashSet<String>,
}

impl FieldSets {
    /// Build the two sets; a field may not appear in both
    pub fn new<D, T>(date_fields: D, timestamp_fields: T) -> Result<Self, QueryError>
    where
        D: IntoIterator,
        D::Item: Into<String>,
        T: IntoIterator,
        T::Item: Into<String>,
    {
        let date_fields: HashSet<String> = date_fields.into_iter().map(Into::into).collect();
        let timestamp_fields: HashSet<String> =
            timestamp_fields.into_iter().map(Into::into).collect();

        if let Some(overlap) = date_fields.intersection(&timestamp_fields).min() {
            return Err(QueryError::OverlappingFieldSets(overlap.clone()));
        }

        Ok(Self {
            date_fields,
            timestamp_fields,
        })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Coercion applied to string operands of `field`
    pub fn coercion_for(&self, field: &str) -> Coercion {
        if self.date_fields.contains(field) {
            Coercion::Date
        } else if self.timestamp_fields.contains(field) {
            Coercion::Timestamp
        } else {
            Coercion::None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn users() -> AllowList {
        AllowList::new()
            .with_field("id", "id_col")
            .with_field("status", "status")
            .with_field("created", "created_col")
    }

    #[test]
    fn test_resolve_known_and_unknown() {
        let allow_list = users();
        assert_eq!(allow_list.resolve("created").unwrap(), "created_col");

        let err = allow_list.resolve("password").unwrap_err();
        assert!(matches!(err, QueryError::UnknownField(ref f) if f == "password"));
    }

    #[test]
    fn test_order_is_preserved() {
        let allow_list = users();
        assert_eq!(
            allow_list.columns().collect::<Vec<_>>(),
            vec!["id_col", "status", "created_col"]
        );
        assert_eq!(
            allow_list.fields().collect::<Vec<_>>(),
            vec!["id", "status", "created"]
        );
    }

    #[test]
    fn test_readding_replaces_in_place() {
        let allow_list = users().with_field("id", "user_id");
        assert_eq!(allow_list.len(), 3);
        assert_eq!(allow_list.columns().next(), Some("user_id"));
    }

    #[test]
    fn test_from_iterator() {
        let allow_list: AllowList = vec![("a", "col_a"), ("b", "col_b")].into_iter().collect();
        assert!(allow_list.contains("b"));
        assert!(!allow_list.contains("col_b"));
    }

    #[test]
    fn test_field_sets() {
        let sets = FieldSets::new(["birthday"], ["created"]).unwrap();
        assert_eq!(sets.coercion_for("birthday"), Coercion::Date);
        assert_eq!(sets.coercion_for("created"), Coercion::Timestamp);
        assert_eq!(sets.coercion_for("status"), Coercion::None);
    }

    #[test]
    fn test_field_sets_must_be_disjoint() {
        let err = FieldSets::new(["created", "birthday"], ["created"]).unwrap_err();
        assert!(matches!(err, QueryError::OverlappingFieldSets(ref f) if f == "created"));
    }
}
