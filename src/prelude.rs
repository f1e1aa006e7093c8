//! Convenience re-exports for common QueryHaus usage
//!
//! # Example
//!
//! ```rust
//! use queryhaus::prelude::*;
//!
//! let filters = vec![Filter::eq("status", "active"), Filter::gt("age", 30).or()];
//! ```

// Core QueryHaus components
pub use crate::core::{QueryHaus, build_executor};
pub use crate::errors::QueryHausError;

// Re-export centralized config
pub use config::{AppConfig, DatabaseConfig, FieldMapping, TranslatorConfig, UpdateColumnPolicy};

// Re-export commonly used query-object types for convenience
pub use query_object::prelude::*;

// Common external dependencies
pub use anyhow;
pub use async_trait;
pub use sqlx;
pub use tokio;

// Commonly used sqlx types
pub use sqlx::{Connection, Postgres, Transaction};
