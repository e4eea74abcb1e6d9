//! Shared types for umbase.
//!
//! Recipes keep their per-version configuration in a `conandata.yml` table
//! keyed by version, with a `"None"` entry as the catch-all. This crate holds
//! the data side of that: build channels, version-key parsing, the table
//! itself and the YAML loader. Selection logic lives in `umbase-core`.

pub mod channel;
pub mod conandata;
pub mod table;
pub mod version;

// Re-exports
pub use channel::Channel;
pub use conandata::ConanData;
pub use table::{SENTINEL_KEY, TableError, VersionTable};
pub use version::ParsedVersion;

/// File name of the per-recipe data file.
pub const CONANDATA_FILE: &str = "conandata.yml";
