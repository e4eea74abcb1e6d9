//! Resolve command

use anyhow::{Context, Result};
use serde::Serialize;
use serde_yaml::Value;
use std::path::Path;
use umbase_core::{Diagnostic, resolve as resolve_block};
use umbase_schema::Channel;

use super::load_table;

#[derive(Serialize)]
struct Selection<'a> {
    key: &'a str,
    config: &'a Value,
    diagnostic: Option<&'a Diagnostic>,
}

/// Resolve the block for `version` on `channel` and print it.
pub fn resolve(
    data: &Path,
    section: Option<&str>,
    version: Option<&str>,
    channel: &str,
    json: bool,
) -> Result<()> {
    let table = load_table(data, section)?;
    let channel = Channel::parse(channel);
    let resolution = resolve_block(&table, version, &channel);

    if let Some(diagnostic) = &resolution.diagnostic {
        diagnostic.emit();
    }
    tracing::debug!(key = resolution.key, %channel, "selected");

    if json {
        let selection = Selection {
            key: resolution.key,
            config: resolution.block,
            diagnostic: resolution.diagnostic.as_ref(),
        };
        let out = serde_json::to_string_pretty(&selection)
            .context("Failed to serialize selection to JSON")?;
        println!("{out}");
    } else {
        let out = serde_yaml::to_string(resolution.block)
            .context("Failed to serialize selection to YAML")?;
        print!("{out}");
    }

    Ok(())
}
