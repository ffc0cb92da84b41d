//! Loader configuration.
//!
//! Generated documentation splits its search data across many files in one
//! directory (`all_0.js`, `all_1.js`, ..., `classes_0.js`, ...). A config
//! picks the directory and the file family that makes up one table.

use crate::error::Result;
use anyhow::Context;
use serde::Deserialize;
use std::path::{Path, PathBuf};

const DEFAULT_PREFIX: &str = "all_";
const DEFAULT_EXTENSION: &str = "js";

/// Where a table's source files live.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IndexConfig {
    /// Directory holding the generated search files.
    pub search_dir: PathBuf,
    /// File-name prefix selecting one family of files.
    #[serde(default = "default_prefix")]
    pub file_prefix: String,
    /// File extension, without the dot.
    #[serde(default = "default_extension")]
    pub extension: String,
}

fn default_prefix() -> String {
    DEFAULT_PREFIX.to_string()
}

fn default_extension() -> String {
    DEFAULT_EXTENSION.to_string()
}

impl IndexConfig {
    /// Config for the `all_*.js` family in `search_dir`.
    pub fn new(search_dir: impl Into<PathBuf>) -> Self {
        Self {
            search_dir: search_dir.into(),
            file_prefix: default_prefix(),
            extension: default_extension(),
        }
    }

    /// Parses a TOML config. Relative `search_dir` values are kept as written.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).context("Invalid search index config")
    }

    /// Reads a TOML config file. A relative `search_dir` resolves against
    /// the directory containing the file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config at {}", path.display()))?;
        let mut config = Self::from_toml_str(&text)
            .with_context(|| format!("Failed to parse config at {}", path.display()))?;

        if config.search_dir.is_relative()
            && let Some(parent) = path.parent()
        {
            config.search_dir = parent.join(&config.search_dir);
        }

        tracing::debug!(
            "Loaded search config from {} (dir: {}, prefix: '{}')",
            path.display(),
            config.search_dir.display(),
            config.file_prefix
        );
        Ok(config)
    }

    /// Whether a file name belongs to the configured family.
    pub fn matches(&self, file_name: &str) -> bool {
        let Some(stem) = file_name
            .strip_suffix(self.extension.as_str())
            .and_then(|rest| rest.strip_suffix('.'))
        else {
            return false;
        };
        stem.starts_with(self.file_prefix.as_str()) && stem.len() > self.file_prefix.len()
    }
}
