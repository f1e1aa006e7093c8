//! # QueryHaus
//!
//! Allow-listed query and update translation for PostgreSQL. Typed filter
//! predicates, field selection, ordering and pagination become one
//! parameterized data query plus the matching COUNT query; rows come back
//! through a row mapper together with the total.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use queryhaus::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = AppConfig::load()?;
//!     let mut queryhaus = QueryHaus::new(&config).await?;
//!
//!     let request = QueryRequest::new("users")
//!         .select(["id", "name"])
//!         .filter(Filter::eq("status", "active"))
//!         .filter(Filter::date_within_past("created", DateInterval::days(30)))
//!         .order_by("created DESC")
//!         .top(10);
//!
//!     let page = queryhaus.query(&request).await?;
//!     println!("{} of {} users", page.data.len(), page.total);
//!
//!     let changes = ChangeSet::new().set("name", "Jane");
//!     queryhaus
//!         .update(&UpdateRequest::new("users", "id", changes, 101))
//!         .await?;
//!
//!     queryhaus.close().await?;
//!     Ok(())
//! }
//! ```

/// Conditional debug logging macros
/// These macros only compile in code when the `debug-logging` feature is enabled
#[cfg(feature = "debug-logging")]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        tracing::debug!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "debug-logging")]
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {
        tracing::trace!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {};
}

pub mod core;
pub mod errors;
pub mod prelude;

// Re-export the main public types for convenience
pub use crate::core::{QueryHaus, build_executor};
pub use crate::errors::QueryHausError;

// Re-export centralized config
pub use config::{AppConfig, DatabaseConfig, TranslatorConfig};

// Re-export member crates
pub use query_object;
pub use type_mapping;

// Re-export external dependencies used in public API
pub use async_trait;
pub use sqlx;
