//! SQL identifier validation
//!
//! Physical names that reach SQL text without going through an allow-list
//! (primary-key columns, the changed-at column, physical update columns)
//! must be plain identifiers.

use std::fmt;
use thiserror::Error;

/// PostgreSQL identifier length limit (NAMEDATALEN - 1)
const MAX_IDENTIFIER_LENGTH: usize = 63;

// Words PostgreSQL reserves outright, plus the statement verbs
const RESERVED_KEYWORDS: &[&str] = &[
    "ALL", "ALTER", "ANALYSE", "ANALYZE", "AND", "ANY", "ARRAY", "AS", "ASC",
    "ASYMMETRIC", "BOTH", "CASE", "CAST", "CHECK", "COLLATE", "COLUMN",
    "CONSTRAINT", "CREATE", "CURRENT_DATE", "CURRENT_ROLE", "CURRENT_TIME",
    "CURRENT_TIMESTAMP", "CURRENT_USER", "DEFAULT", "DEFERRABLE", "DELETE",
    "DESC", "DISTINCT", "DO", "DROP", "ELSE", "END", "EXCEPT", "FALSE",
    "FETCH", "FOR", "FOREIGN", "FROM", "GRANT", "GROUP", "HAVING", "IN",
    "INITIALLY", "INSERT", "INTERSECT", "INTO", "LATERAL", "LEADING", "LIMIT",
    "LOCALTIME", "LOCALTIMESTAMP", "NOT", "NULL", "OFFSET", "ON", "ONLY", "OR",
    "ORDER", "PLACING", "PRIMARY", "REFERENCES", "RETURNING", "SELECT",
    "SESSION_USER", "SOME", "SYMMETRIC", "TABLE", "THEN", "TO", "TRAILING",
    "TRUE", "UNION", "UNIQUE", "UPDATE", "USER", "USING", "VARIADIC", "WHEN",
    "WHERE", "WINDOW", "WITH",
];

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Name cannot be empty")]
    Empty,

    #[error("Name '{name}' is too long: {length} characters (max {max_length})")]
    TooLong {
        name: String,
        length: usize,
        max_length: usize,
    },

    #[error("Name '{0}' must start with a letter or underscore")]
    InvalidStartCharacter(String),

    #[error("Invalid characters in name '{0}': only alphanumeric characters and underscores are allowed")]
    InvalidCharacters(String),

    #[error("Name '{0}' is a reserved SQL keyword")]
    ReservedKeyword(String),
}

fn validate_identifier(name: &str) -> Result<(), ValidationError> {
    let Some(first) = name.chars().next() else {
        return Err(ValidationError::Empty);
    };

    if name.len() > MAX_IDENTIFIER_LENGTH {
        return Err(ValidationError::TooLong {
            name: name.to_string(),
            length: name.len(),
            max_length: MAX_IDENTIFIER_LENGTH,
        });
    }

    if !first.is_ascii_alphabetic() && first != '_' {
        return Err(ValidationError::InvalidStartCharacter(name.to_string()));
    }

    if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(ValidationError::InvalidCharacters(name.to_string()));
    }

    if RESERVED_KEYWORDS.contains(&name.to_ascii_uppercase().as_str()) {
        return Err(ValidationError::ReservedKeyword(name.to_string()));
    }

    Ok(())
}

/// A table name that is safe to splice into SQL.
///
/// The executor trusts its `table` argument; callers that take table names
/// from less trusted sources can validate them with this first.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ValidatedTableName(String);

impl ValidatedTableName {
    pub fn new(name: &str) -> Result<Self, ValidationError> {
        validate_identifier(name)?;
        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for ValidatedTableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A column name that is safe to splice into SQL
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ValidatedFieldName(String);

impl ValidatedFieldName {
    pub fn new(name: &str) -> Result<Self, ValidationError> {
        validate_identifier(name)?;
        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for ValidatedFieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_names() {
        let long = "a".repeat(63);
        let valid_names = ["users", "changed_at", "UserProfiles", "_private", "col2", long.as_str()];

        for name in valid_names {
            assert!(
                ValidatedFieldName::new(name).is_ok(),
                "Should accept valid name: {}",
                name
            );
        }
    }

    #[test]
    fn test_invalid_names() {
        let test_cases = [
            ("", ValidationError::Empty),
            (
                "1st",
                ValidationError::InvalidStartCharacter("1st".to_string()),
            ),
            (
                "id; DROP TABLE users",
                ValidationError::InvalidCharacters("id; DROP TABLE users".to_string()),
            ),
            (
                "name\"",
                ValidationError::InvalidCharacters("name\"".to_string()),
            ),
            ("select", ValidationError::ReservedKeyword("select".to_string())),
            ("Order", ValidationError::ReservedKeyword("Order".to_string())),
        ];

        for (name, expected) in test_cases {
            assert_eq!(ValidatedFieldName::new(name).unwrap_err(), expected);
        }
    }

    #[test]
    fn test_too_long_name() {
        match ValidatedTableName::new(&"a".repeat(64)).unwrap_err() {
            ValidationError::TooLong {
                length, max_length, ..
            } => {
                assert_eq!(length, 64);
                assert_eq!(max_length, 63);
            }
            other => panic!("Expected TooLong error, got {:?}", other),
        }
    }

    #[test]
    fn test_common_column_names_are_not_reserved() {
        for name in ["name", "date", "status", "key", "text", "timestamp", "type"] {
            assert!(ValidatedFieldName::new(name).is_ok(), "{} rejected", name);
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(ValidatedTableName::new("users").unwrap().to_string(), "users");
        assert_eq!(ValidatedFieldName::new("id").unwrap().as_str(), "id");
    }
}
