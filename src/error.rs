//! Error handling types and utilities.

use std::path::PathBuf;

/// A specialized Result type for docsearch plumbing (config files, directories).
///
/// This is an alias for `anyhow::Result` with context added via `.context()` and
/// `.with_context()` methods throughout the codebase.
pub type Result<T> = anyhow::Result<T>;

/// Error returned when loading search data fails.
///
/// Any of these aborts the load: no partially-parsed table is ever returned.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The data file could not be read.
    #[error("failed to read search data at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The array literal itself could not be read.
    #[error("{source_name}: syntax error at byte {offset}: {message}")]
    Syntax {
        source_name: String,
        offset: usize,
        message: String,
    },
    /// A row or entry has the wrong shape or is missing a required field.
    #[error("{source_name}: malformed row {row}: {reason}")]
    MalformedData {
        source_name: String,
        row: usize,
        reason: String,
    },
    /// The same token appears in two rows.
    #[error("duplicate token '{token}' (first in {first}, again in {second})")]
    DuplicateToken {
        token: String,
        first: String,
        second: String,
    },
}
