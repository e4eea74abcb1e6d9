//! Subcommand implementations

pub mod channel;
pub mod export;
pub mod resolve;
pub mod versions;

use anyhow::{Context, Result};
use serde_yaml::Value;
use std::path::Path;
use umbase_schema::{ConanData, VersionTable};

/// Load the version table at the root of `data`, or in `section` if given.
pub(crate) fn load_table(data: &Path, section: Option<&str>) -> Result<VersionTable<Value>> {
    let conandata = ConanData::from_path(data)?;
    let table = match section {
        Some(name) => conandata.section_table(name),
        None => conandata.version_table(),
    };
    table.with_context(|| format!("Invalid version table in {}", data.display()))
}
