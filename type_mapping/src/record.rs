//! Ordered row representation
//!
//! A `Record` keeps the column order of the result set and keys every
//! value by its lower-cased column label.

use crate::types::SqlValue;
use serde::ser::{Serialize, SerializeMap, Serializer};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    columns: Vec<(String, SqlValue)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            columns: Vec::with_capacity(capacity),
        }
    }

    /// Insert a column. The label is lower-cased; a repeated label keeps its
    /// first position and takes the newer value.
    pub fn insert(&mut self, label: &str, value: SqlValue) {
        let key = label.to_lowercase();
        match self.columns.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, slot)) => *slot = value,
            None => self.columns.push((key, value)),
        }
    }

    /// Look up a column by label (case-insensitive)
    pub fn get(&self, label: &str) -> Option<&SqlValue> {
        let key = label.to_lowercase();
        self.columns
            .iter()
            .find(|(existing, _)| *existing == key)
            .map(|(_, value)| value)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(label, _)| label.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SqlValue)> {
        self.columns.iter().map(|(label, value)| (label.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Convert into a JSON object preserving column order
    pub fn into_json(self) -> serde_json::Map<String, serde_json::Value> {
        self.columns
            .into_iter()
            .map(|(label, value)| (label, crate::serialize::sql_value_to_json(&value)))
            .collect()
    }
}

impl IntoIterator for Record {
    type Item = (String, SqlValue);
    type IntoIter = std::vec::IntoIter<(String, SqlValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.columns.into_iter()
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.columns.len()))?;
        for (label, value) in &self.columns {
            map.serialize_entry(label, value)?;
        }
        map.end()
    }
}
