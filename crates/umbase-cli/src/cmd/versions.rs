//! Versions command

use anyhow::Result;
use std::path::Path;
use umbase_schema::SENTINEL_KEY;
use umbase_schema::version::ParsedVersion;

use super::load_table;

/// List table keys in declaration order, marking the default and fallback.
pub fn versions(data: &Path, section: Option<&str>) -> Result<()> {
    let table = load_table(data, section)?;
    let default = table.default_version();

    for key in table.keys() {
        let note = if key == SENTINEL_KEY {
            " (fallback)"
        } else if Some(key) == default {
            " (default)"
        } else if ParsedVersion::parse(key) == ParsedVersion::NotAVersion {
            " (channel)"
        } else {
            ""
        };
        println!("{key}{note}");
    }

    Ok(())
}
