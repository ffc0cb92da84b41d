pub mod config;
pub mod error;
pub mod search;
pub mod tracing;

pub use config::IndexConfig;
pub use error::LoadError;
pub use search::{Entry, Symbol, Table};
