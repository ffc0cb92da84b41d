//! Search-data loading and lookup.
//!
//! Generated HTML documentation ships its search index as JavaScript files of
//! the form `var searchData=[...];`, one row per normalized token. This module
//! reads those files into an immutable [`Table`] and answers exact-key and
//! prefix lookups against it.

// Module declarations
pub(crate) mod entry;
pub(crate) mod literal;
pub(crate) mod table;
pub mod token;

// Public re-exports (used via lib.rs)
pub use entry::{Entry, Symbol};
pub use table::Table;
