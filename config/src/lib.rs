//! # Configuration Management for QueryHaus
//!
//! This crate provides the configuration structures for QueryHaus: the
//! database connection and the translator (allow-list, date and timestamp
//! fields, paging and update settings).
//!
//! ## TOML File Configuration
//! ```toml
//! [database]
//! host = "localhost"
//! port = 5432
//! database = "myapp"
//! username = "postgres"
//! password = "password"
//! connection_timeout_seconds = 30
//! statement_timeout_ms = 5000
//!
//! [translator]
//! date_fields = ["birthday"]
//! timestamp_fields = ["created"]
//! default_page_size = 25
//! changed_at_column = "changed_at"
//! update_columns = "allow_list"
//!
//! [[translator.fields]]
//! name = "id"
//! column = "user_id"
//!
//! [[translator.fields]]
//! name = "created"
//! column = "created_at"
//! ```
//!
//! Load configuration:
//! ```rust,no_run
//! use config::AppConfig;
//!
//! // Load from QUERYHAUS_CONFIG or ./queryhaus.toml
//! let config = AppConfig::load()?;
//!
//! // Or load from custom path
//! let config = AppConfig::from_file("config/production.toml")?;
//! # Ok::<(), config::ConfigError>(())
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::{env, path::Path};
use thiserror::Error;

const DEFAULT_CONFIG_PATH: &str = "./queryhaus.toml";
const CONFIG_PATH_VAR: &str = "QUERYHAUS_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Environment variable error: {0}")]
    Env(#[from] env::VarError),
    #[error("Dotenvy error: {0}")]
    Dotenvy(#[from] dotenvy::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub translator: TranslatorConfig,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub username: String,
    pub password: String,
    #[serde(default = "default_connection_timeout_seconds")]
    pub connection_timeout_seconds: u64,
    /// Server-side `statement_timeout`; 0 leaves the server default
    #[serde(default)]
    pub statement_timeout_ms: u64,
}

/// One allow-list entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldMapping {
    /// Logical name used by callers
    pub name: String,
    /// Physical column name
    pub column: String,
}

/// How update change keys are interpreted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateColumnPolicy {
    #[default]
    AllowList,
    Physical,
}

/// Translator configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslatorConfig {
    /// Allow-list in projection order
    pub fields: Vec<FieldMapping>,
    #[serde(default)]
    pub date_fields: Vec<String>,
    #[serde(default)]
    pub timestamp_fields: Vec<String>,
    #[serde(default = "default_page_size")]
    pub default_page_size: i64,
    #[serde(default = "default_changed_at_column")]
    pub changed_at_column: String,
    #[serde(default)]
    pub update_columns: UpdateColumnPolicy,
}

fn default_connection_timeout_seconds() -> u64 {
    30
}

fn default_page_size() -> i64 {
    25
}

fn default_changed_at_column() -> String {
    "changed_at".to_string()
}

impl AppConfig {
    /// Load configuration from the TOML file named by `QUERYHAUS_CONFIG`
    /// (environment or `.env`), falling back to `./queryhaus.toml`
    pub fn load() -> Result<Self, ConfigError> {
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                return Err(e.into());
            }
        }

        if let Some(config_path) = config_path_from(env::var(CONFIG_PATH_VAR))? {
            Self::from_file(&config_path)
        } else if Path::new(DEFAULT_CONFIG_PATH).exists() {
            Self::from_file(DEFAULT_CONFIG_PATH)
        } else {
            Err(ConfigError::Invalid(format!(
                "Config path must be specified as {} or in {} file",
                CONFIG_PATH_VAR, DEFAULT_CONFIG_PATH
            )))
        }
    }

    /// Load configuration from TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.database.validate()?;
        self.translator.validate()
    }
}

impl DatabaseConfig {
    /// Create a new database configuration
    pub fn new(
        host: String,
        port: u16,
        database: String,
        username: String,
        password: String,
        connection_timeout_seconds: u64,
        statement_timeout_ms: u64,
    ) -> Self {
        Self {
            host,
            port,
            database,
            username,
            password,
            connection_timeout_seconds,
            statement_timeout_ms,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.host.is_empty() {
            return Err(ConfigError::Invalid(
                "Database host cannot be empty".to_string(),
            ));
        }
        if self.port == 0 {
            return Err(ConfigError::Invalid(
                "Database port cannot be zero".to_string(),
            ));
        }
        if self.database.is_empty() {
            return Err(ConfigError::Invalid(
                "Database name cannot be empty".to_string(),
            ));
        }
        if self.username.is_empty() {
            return Err(ConfigError::Invalid(
                "Database username cannot be empty".to_string(),
            ));
        }
        if self.connection_timeout_seconds == 0 {
            return Err(ConfigError::Invalid(
                "Database connection_timeout_seconds must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

impl TranslatorConfig {
    /// Configuration with the given allow-list and default settings
    pub fn new(fields: Vec<FieldMapping>) -> Self {
        Self {
            fields,
            date_fields: Vec::new(),
            timestamp_fields: Vec::new(),
            default_page_size: default_page_size(),
            changed_at_column: default_changed_at_column(),
            update_columns: UpdateColumnPolicy::default(),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fields.is_empty() {
            return Err(ConfigError::Invalid(
                "Translator fields cannot be empty".to_string(),
            ));
        }

        let mut names = HashSet::with_capacity(self.fields.len());
        for field in &self.fields {
            if field.name.is_empty() || field.column.is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "Translator field '{}' needs both a name and a column",
                    field.name
                )));
            }
            if !names.insert(field.name.as_str()) {
                return Err(ConfigError::Invalid(format!(
                    "Translator field '{}' is declared twice",
                    field.name
                )));
            }
        }

        for name in self.date_fields.iter().chain(&self.timestamp_fields) {
            if !names.contains(name.as_str()) {
                return Err(ConfigError::Invalid(format!(
                    "Coerced field '{}' is not in the translator fields",
                    name
                )));
            }
        }

        if let Some(name) = self
            .date_fields
            .iter()
            .find(|name| self.timestamp_fields.contains(name))
        {
            return Err(ConfigError::Invalid(format!(
                "Field '{}' cannot be both a date and a timestamp field",
                name
            )));
        }

        if self.default_page_size <= 0 {
            return Err(ConfigError::Invalid(
                "Translator default_page_size must be greater than 0".to_string(),
            ));
        }
        if self.changed_at_column.is_empty() {
            return Err(ConfigError::Invalid(
                "Translator changed_at_column cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}

// Unset falls through to the default file; a non-UTF-8 value is an error
fn config_path_from(var: Result<String, env::VarError>) -> Result<Option<String>, ConfigError> {
    match var {
        Ok(path) => Ok(Some(path)),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = r#"
        [database]
        host = "localhost"
        port = 5432
        database = "app"
        username = "postgres"
        password = "secret"

        [translator]
        date_fields = ["birthday"]
        timestamp_fields = ["created"]

        [[translator.fields]]
        name = "id"
        column = "user_id"

        [[translator.fields]]
        name = "created"
        column = "created_at"

        [[translator.fields]]
        name = "birthday"
        column = "birth_date"
    "#;

    #[test]
    fn test_parse_with_defaults() {
        let config = AppConfig::from_toml_str(VALID).unwrap();

        assert_eq!(config.database.connection_timeout_seconds, 30);
        assert_eq!(config.database.statement_timeout_ms, 0);
        assert_eq!(config.translator.default_page_size, 25);
        assert_eq!(config.translator.changed_at_column, "changed_at");
        assert_eq!(config.translator.update_columns, UpdateColumnPolicy::AllowList);
        assert_eq!(
            config.translator.fields[1],
            FieldMapping {
                name: "created".to_string(),
                column: "created_at".to_string()
            }
        );
    }

    #[test]
    fn test_physical_update_policy() {
        let content = VALID.replace(
            "[translator]",
            "[translator]\nupdate_columns = \"physical\"",
        );
        let config = AppConfig::from_toml_str(&content).unwrap();
        assert_eq!(config.translator.update_columns, UpdateColumnPolicy::Physical);
    }

    #[test]
    fn test_duplicate_field_rejected() {
        let content = format!("{}\n[[translator.fields]]\nname = \"id\"\ncolumn = \"other\"\n", VALID);
        let err = AppConfig::from_toml_str(&content).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(ref msg) if msg.contains("declared twice")));
    }

    #[test]
    fn test_overlapping_field_sets_rejected() {
        let content = VALID.replace(r#"date_fields = ["birthday"]"#, r#"date_fields = ["created"]"#);
        let err = AppConfig::from_toml_str(&content).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(ref msg) if msg.contains("both")));
    }

    #[test]
    fn test_unknown_coerced_field_rejected() {
        let content = VALID.replace(r#"date_fields = ["birthday"]"#, r#"date_fields = ["ghost"]"#);
        assert!(AppConfig::from_toml_str(&content).is_err());
    }

    #[test]
    fn test_database_validation() {
        let content = VALID.replace("port = 5432", "port = 0");
        let err = AppConfig::from_toml_str(&content).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(ref msg) if msg.contains("port")));
    }

    #[test]
    fn test_page_size_must_be_positive() {
        let mut translator = TranslatorConfig::new(vec![FieldMapping {
            name: "id".to_string(),
            column: "id".to_string(),
        }]);
        assert!(translator.validate().is_ok());

        translator.default_page_size = 0;
        assert!(translator.validate().is_err());
    }

    #[test]
    fn test_malformed_toml() {
        let err = AppConfig::from_toml_str("[database\nhost=").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[test]
    fn test_config_path_variable() {
        assert_eq!(
            config_path_from(Ok("/etc/queryhaus.toml".to_string())).unwrap(),
            Some("/etc/queryhaus.toml".to_string())
        );
        assert_eq!(config_path_from(Err(env::VarError::NotPresent)).unwrap(), None);

        let err = config_path_from(Err(env::VarError::NotUnicode(
            std::ffi::OsString::from("queryhaus.toml"),
        )))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Env(env::VarError::NotUnicode(_))));
    }
}
