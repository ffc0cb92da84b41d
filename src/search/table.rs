//! The immutable token → entries lookup table.

use super::entry::{Entry, Symbol};
use super::literal::parse_document;
use super::token::{is_normalized, normalize};
use crate::config::IndexConfig;
use crate::error::LoadError;
use anyhow::Context;
use ignore::WalkBuilder;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::ops::Bound;
use std::path::{Path, PathBuf};
use std::time::Instant;
use xxhash_rust::xxh3::Xxh3;

/// Source name used for text passed to [`Table::load`].
const INLINE_SOURCE: &str = "<inline>";

/// A lookup table built once from generated search data.
///
/// Tokens are kept in sorted order so prefix lookups are a range scan.
/// Nothing mutates a table after construction, so it can be shared freely
/// between threads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    symbols: BTreeMap<String, Symbol>,
    /// xxh3 of the source bytes, in load order.
    digest: u64,
}

impl Table {
    /// Parses one search-data document.
    pub fn load(source: &str) -> Result<Self, LoadError> {
        Self::load_sources([(INLINE_SOURCE, source)])
    }

    /// Reads and parses one search-data file.
    pub fn load_file(path: &Path) -> Result<Self, LoadError> {
        let text = read_source(path)?;
        Self::load_sources([(path.display().to_string(), text)])
    }

    /// Parses several documents into one table.
    ///
    /// `sources` yields `(name, text)` pairs; names only appear in errors.
    /// A token may appear in only one row across all sources.
    pub fn load_sources<I, N, T>(sources: I) -> Result<Self, LoadError>
    where
        I: IntoIterator<Item = (N, T)>,
        N: AsRef<str>,
        T: AsRef<str>,
    {
        let mut builder = TableBuilder::default();
        for (name, text) in sources {
            builder.add_source(name.as_ref(), text.as_ref())?;
        }
        Ok(builder.finish())
    }

    /// Loads every file of the configured family in the search directory.
    pub fn open(config: &IndexConfig) -> crate::error::Result<Self> {
        let dir = &config.search_dir;
        let start = Instant::now();

        let mut files: Vec<PathBuf> = Vec::new();
        let walker = WalkBuilder::new(dir)
            .max_depth(Some(1))
            .standard_filters(false)
            .build();
        for entry in walker {
            let entry =
                entry.with_context(|| format!("Failed to list search directory {}", dir.display()))?;
            if !entry.file_type().is_some_and(|t| t.is_file()) {
                continue;
            }
            if entry.file_name().to_str().is_some_and(|name| config.matches(name)) {
                files.push(entry.into_path());
            }
        }
        files.sort();

        if files.is_empty() {
            tracing::warn!(
                "No '{}*.{}' files found in {}",
                config.file_prefix,
                config.extension,
                dir.display()
            );
        }

        let mut builder = TableBuilder::default();
        for path in &files {
            let text = read_source(path)?;
            builder
                .add_source(&path.display().to_string(), &text)
                .with_context(|| format!("Failed to load search data from {}", dir.display()))?;
        }
        let table = builder.finish();

        tracing::info!(
            "Loaded {} symbols from {} files in {} ({:?})",
            table.len(),
            files.len(),
            dir.display(),
            start.elapsed()
        );
        Ok(table)
    }

    /// Entries stored under exactly `token`, in source order.
    ///
    /// An unknown token yields an empty slice.
    pub fn lookup(&self, token: &str) -> &[Entry] {
        self.symbols
            .get(token)
            .map(|symbol| symbol.entries.as_slice())
            .unwrap_or_default()
    }

    /// The whole row stored under `token`.
    pub fn symbol(&self, token: &str) -> Option<&Symbol> {
        self.symbols.get(token)
    }

    /// Symbols whose token starts with `prefix`, in token order.
    pub fn lookup_prefix<'a>(&'a self, prefix: &str) -> impl Iterator<Item = &'a Symbol> {
        self.symbols
            .range::<str, _>((Bound::Included(prefix), Bound::Unbounded))
            .take_while(move |(token, _)| token.starts_with(prefix))
            .map(|(_, symbol)| symbol)
    }

    /// Looks up a raw identifier such as `operator=` or `onIdle`.
    ///
    /// The query is normalized the way tokens are, so it must not already
    /// be in token form (`operator_3d` would be escaped again).
    pub fn search(&self, query: &str) -> &[Entry] {
        self.lookup(&normalize(query.trim()))
    }

    /// Prefix form of [`Table::search`], for search-as-you-type.
    pub fn search_prefix(&self, query: &str) -> Vec<&Symbol> {
        let prefix = normalize(query.trim());
        self.lookup_prefix(&prefix).collect()
    }

    /// All tokens in sorted order.
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.symbols.keys().map(String::as_str)
    }

    /// All symbols in token order.
    pub fn symbols(&self) -> impl Iterator<Item = &Symbol> {
        self.symbols.values()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Identifies the data the table was built from.
    pub fn digest(&self) -> u64 {
        self.digest
    }
}

fn read_source(path: &Path) -> Result<String, LoadError> {
    std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[derive(Default)]
struct TableBuilder {
    symbols: BTreeMap<String, Symbol>,
    /// Source name each token came from, for duplicate reports.
    origins: HashMap<String, String>,
    hasher: Xxh3,
}

impl TableBuilder {
    fn add_source(&mut self, source_name: &str, text: &str) -> Result<(), LoadError> {
        let start = Instant::now();
        let document = parse_document(text).map_err(|err| LoadError::Syntax {
            source_name: source_name.to_string(),
            offset: err.offset,
            message: err.message,
        })?;

        let malformed = |row: usize, reason: String| LoadError::MalformedData {
            source_name: source_name.to_string(),
            row,
            reason,
        };

        let rows = document
            .as_array()
            .ok_or_else(|| malformed(0, "top-level value is not an array".to_string()))?;

        // Parse the whole source before touching the table
        let symbols = rows
            .iter()
            .enumerate()
            .map(|(row, value)| parse_row(value).map_err(|reason| malformed(row, reason)))
            .collect::<Result<Vec<_>, _>>()?;

        let count = symbols.len();
        for symbol in symbols {
            if let Some(first) = self.origins.get(&symbol.token) {
                return Err(LoadError::DuplicateToken {
                    token: symbol.token,
                    first: first.clone(),
                    second: source_name.to_string(),
                });
            }
            if !is_normalized(&symbol.token) {
                tracing::debug!(
                    "Token '{}' in {} is not in normalized form; only exact lookups reach it",
                    symbol.token,
                    source_name
                );
            }
            self.origins
                .insert(symbol.token.clone(), source_name.to_string());
            self.symbols.insert(symbol.token.clone(), symbol);
        }

        self.hasher.update(text.as_bytes());
        tracing::debug!(
            "Parsed {} symbols from {} in {:?}",
            count,
            source_name,
            start.elapsed()
        );
        Ok(())
    }

    fn finish(self) -> Table {
        Table {
            symbols: self.symbols,
            digest: self.hasher.digest(),
        }
    }
}

/// `[token, [label, entry, entry, ...]]`
fn parse_row(row: &Value) -> Result<Symbol, String> {
    let fields = row.as_array().ok_or("row is not an array")?;
    let [token, body] = fields.as_slice() else {
        return Err(format!(
            "expected [token, [label, entries...]], found {} fields",
            fields.len()
        ));
    };

    let token = token.as_str().ok_or("token is not a string")?;
    if token.is_empty() {
        return Err("token is empty".to_string());
    }

    let body = body.as_array().ok_or("symbol body is not an array")?;
    let (label, entries) = body.split_first().ok_or("symbol body is empty")?;
    let label = label.as_str().ok_or("label is not a string")?;
    if entries.is_empty() {
        return Err(format!("symbol '{}' has no entries", token));
    }

    let entries = entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            parse_entry(label, entry).map_err(|reason| format!("entry {} of '{}': {}", i, token, reason))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Symbol {
        token: token.to_string(),
        label: label.to_string(),
        entries,
    })
}

/// `[locator, flag, scope]`
fn parse_entry(label: &str, entry: &Value) -> Result<Entry, String> {
    let fields = entry.as_array().ok_or("entry is not an array")?;
    if fields.len() > 3 {
        return Err(format!("expected 3 fields, found {}", fields.len()));
    }

    let locator = string_field(fields, 0, "locator")?;
    let external = match fields.get(1) {
        None => return Err("missing flag".to_string()),
        Some(Value::Bool(local)) => !local,
        Some(flag) => match flag.as_i64() {
            Some(0) => true,
            Some(1) => false,
            _ => return Err(format!("flag must be 0 or 1, found {}", flag)),
        },
    };
    let scope = string_field(fields, 2, "scope")?;

    Ok(Entry {
        label: label.to_string(),
        locator: locator.to_string(),
        scope: scope.to_string(),
        external,
    })
}

fn string_field<'v>(fields: &'v [Value], index: usize, name: &str) -> Result<&'v str, String> {
    fields
        .get(index)
        .ok_or_else(|| format!("missing {}", name))?
        .as_str()
        .ok_or_else(|| format!("{} is not a string", name))
}
