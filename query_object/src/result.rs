use serde::{Deserialize, Serialize};

/// One page of mapped rows plus the unpaginated match count
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResult<T> {
    pub data: Vec<T>,
    pub total: i64,
}

impl<T> QueryResult<T> {
    pub fn new(data: Vec<T>, total: i64) -> Self {
        Self { data, total }
    }

    /// Number of rows on this page
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Map every row, keeping the total
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> QueryResult<U> {
        QueryResult {
            data: self.data.into_iter().map(f).collect(),
            total: self.total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_serializes_data_and_total() {
        let result = QueryResult::new(vec!["a", "b"], 42);
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({"data": ["a", "b"], "total": 42})
        );
    }

    #[test]
    fn test_map_keeps_total() {
        let result = QueryResult::new(vec![1, 2, 3], 30).map(|n| n * 10);
        assert_eq!(result.data, vec![10, 20, 30]);
        assert_eq!(result.total, 30);
        assert_eq!(result.len(), 3);
    }
}
