//! Version tables
//!
//! A [`VersionTable`] maps version keys to opaque configuration blocks. The
//! `"None"` sentinel entry is mandatory and checked when the table is built,
//! so lookups that fall back to it cannot fail.

use std::collections::HashMap;

use serde_yaml::{Mapping, Value};

use crate::version::ParsedVersion;

/// Key of the catch-all entry every table must carry.
pub const SENTINEL_KEY: &str = "None";

/// Errors raised while building a [`VersionTable`] or loading conandata.
#[derive(thiserror::Error, Debug)]
pub enum TableError {
    /// The table has no `"None"` entry to fall back on.
    #[error("Version table has no \"{SENTINEL_KEY}\" entry")]
    MissingSentinel,

    /// The same key appears twice.
    #[error("Duplicate version key: {0}")]
    DuplicateKey(String),

    /// A value that should have been a mapping was something else.
    #[error("Expected a mapping for {0}")]
    NotAMapping(String),

    /// A mapping key that is neither a string nor a number.
    #[error("Unsupported version key: {0}")]
    UnsupportedKey(String),

    /// A named section is absent from the conandata root.
    #[error("Section '{0}' not found")]
    MissingSection(String),

    /// The document is not valid YAML.
    #[error("Invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The conandata file could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        /// File that failed to load.
        path: std::path::PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
}

/// Per-version configuration blocks, keyed by version string or `"None"`.
///
/// Keys keep their declaration order so the first declared version can be
/// reported as the default; lookup does not depend on it.
#[derive(Debug, Clone)]
pub struct VersionTable<T> {
    entries: Vec<(String, T)>,
    positions: HashMap<String, usize>,
    sentinel: usize,
}

impl<T> VersionTable<T> {
    /// Build a table from `(key, block)` pairs.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::DuplicateKey`] if a key repeats and
    /// [`TableError::MissingSentinel`] if there is no `"None"` entry.
    pub fn new<I, K>(entries: I) -> Result<Self, TableError>
    where
        I: IntoIterator<Item = (K, T)>,
        K: Into<String>,
    {
        let mut stored = Vec::new();
        let mut positions = HashMap::new();

        for (key, block) in entries {
            let key = key.into();
            if positions.contains_key(&key) {
                return Err(TableError::DuplicateKey(key));
            }
            positions.insert(key.clone(), stored.len());
            stored.push((key, block));
        }

        let sentinel = *positions
            .get(SENTINEL_KEY)
            .ok_or(TableError::MissingSentinel)?;

        Ok(Self {
            entries: stored,
            positions,
            sentinel,
        })
    }

    /// Look up a block by exact key.
    pub fn get(&self, key: &str) -> Option<&T> {
        self.get_key_value(key).map(|(_, block)| block)
    }

    /// Look up a block by exact key, returning the stored key alongside it.
    pub fn get_key_value(&self, key: &str) -> Option<(&str, &T)> {
        self.positions.get(key).map(|&i| self.entry(i))
    }

    /// Whether `key` is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.positions.contains_key(key)
    }

    /// The `"None"` entry.
    pub fn sentinel(&self) -> &T {
        &self.entries[self.sentinel].1
    }

    /// The `"None"` entry together with its key.
    pub fn sentinel_entry(&self) -> (&str, &T) {
        self.entry(self.sentinel)
    }

    /// All keys, in declaration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    /// All entries, in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.entries.iter().map(|(key, block)| (key.as_str(), block))
    }

    /// Entries whose key parses as a version. Other keys are skipped.
    pub fn versions(&self) -> impl Iterator<Item = (semver::Version, &str, &T)> {
        self.iter().filter_map(|(key, block)| match ParsedVersion::parse(key) {
            ParsedVersion::Version(v) => Some((v, key, block)),
            ParsedVersion::NotAVersion => None,
        })
    }

    /// First declared key other than the sentinel.
    pub fn default_version(&self) -> Option<&str> {
        self.keys().find(|key| *key != SENTINEL_KEY)
    }

    /// Number of entries, sentinel included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false: a table holds at least the sentinel.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn entry(&self, index: usize) -> (&str, &T) {
        let (key, block) = &self.entries[index];
        (key.as_str(), block)
    }
}

impl VersionTable<Value> {
    /// Build a table from a YAML mapping, cloning the blocks.
    ///
    /// Numeric keys (`5.2:` without quotes) are turned back into strings.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::UnsupportedKey`] for keys that are not strings or
    /// numbers, plus anything [`VersionTable::new`] rejects.
    pub fn from_mapping(mapping: &Mapping) -> Result<Self, TableError> {
        let entries = mapping
            .iter()
            .map(|(key, block)| Ok((key_to_string(key)?, block.clone())))
            .collect::<Result<Vec<_>, TableError>>()?;
        Self::new(entries)
    }

    /// Build a table from a YAML value that must be a mapping.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::NotAMapping`] if `value` is not a mapping.
    pub fn from_value(value: &Value, what: &str) -> Result<Self, TableError> {
        match value {
            Value::Mapping(mapping) => Self::from_mapping(mapping),
            _ => Err(TableError::NotAMapping(what.to_string())),
        }
    }
}

/// Render a YAML mapping key as a version-table key.
///
/// # Errors
///
/// Returns [`TableError::UnsupportedKey`] for anything but strings and numbers.
pub fn key_to_string(key: &Value) -> Result<String, TableError> {
    match key {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(TableError::UnsupportedKey(format!("{other:?}"))),
    }
}
