//! Shared test fixtures and utilities for integration tests.
//!
//! # Available Fixtures
//!
//! - `sample_table`: the table loaded from `tests/fixtures/all_8.js`
//! - `search_dir`: a temp directory laid out like generated `html/search/`
//!
//! [`TempWorkspace`] provides the temp directory abstraction the directory
//! fixtures build on.

use docsearch::Table;
use rstest::fixture;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Search data generated for the `CppServer` documentation (letter `o`).
pub const ALL_8: &str = include_str!("../fixtures/all_8.js");

/// A temporary workspace directory for test isolation.
///
/// Cleaned up when dropped.
#[allow(dead_code)] // Methods used across different integration test crates
pub struct TempWorkspace {
    _temp: TempDir,
    root: PathBuf,
}

#[allow(dead_code)] // Methods used across different integration test crates
impl TempWorkspace {
    /// Creates a new empty temporary workspace.
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let root = temp.path().to_path_buf();
        Self { _temp: temp, root }
    }

    /// Returns the root path of this workspace.
    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Creates a file with the given content within this workspace.
    ///
    /// Parent directories are created automatically if they don't exist.
    ///
    /// # Panics
    /// Panics if file creation fails.
    pub fn create_file(&self, path: &str, content: &str) {
        let full_path = self.root.join(path);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).unwrap_or_else(|e| {
                panic!("Failed to create parent directory for '{}': {}", path, e)
            });
        }
        std::fs::write(&full_path, content)
            .unwrap_or_else(|e| panic!("Failed to write file '{}': {}", path, e));
    }
}

impl Default for TempWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

/// The fixture table, loaded with tracing enabled.
#[allow(dead_code)] // Used in table_test.rs
#[fixture]
pub fn sample_table() -> Table {
    docsearch::tracing::init();
    Table::load(ALL_8).expect("fixture search data should load")
}

/// A workspace holding `html/search/` with two `all_*` files, one
/// `functions_*` file and an unrelated script.
#[allow(dead_code)] // Used in open_test.rs
#[fixture]
pub fn search_dir() -> TempWorkspace {
    docsearch::tracing::init();
    let workspace = TempWorkspace::new();
    workspace.create_file("html/search/all_8.js", ALL_8);
    workspace.create_file(
        "html/search/all_0.js",
        "var searchData=\n[\n  ['accept',['accept',['../class_cpp_server_1_1_asio_1_1_t_c_p_server.html#a0',1,'CppServer::Asio::TCPServer::accept()']]]\n];\n",
    );
    workspace.create_file(
        "html/search/functions_0.js",
        "var searchData=\n[\n  ['accept',['accept',['../class_cpp_server_1_1_asio_1_1_t_c_p_server.html#a0',1,'CppServer::Asio::TCPServer::accept()']]]\n];\n",
    );
    workspace.create_file("html/search/search.js", "function SearchBox() {}\n");
    workspace
}
