mod core;
mod query;

pub use self::core::GenericExecutor;
