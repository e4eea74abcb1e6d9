//! umbase - recipe version data tooling
#![allow(missing_docs)]
#![allow(clippy::missing_errors_doc)]
//!
//! Command-line front end over `umbase-core`: resolve which block of a
//! recipe's `conandata.yml` applies to a build, derive build channels from
//! git refs, and export changed recipes.

pub mod cmd;

pub use umbase_core::resolver;
pub use umbase_schema::{Channel, ConanData, VersionTable};

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "umbase")]
#[command(author, version, about = "umbase - recipe version data tooling")]
pub struct Cli {
    /// Show what would happen without making changes
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Log debug output (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print the data block a recipe build would use
    Resolve {
        /// Path to conandata.yml
        data: PathBuf,
        /// Resolve within a named section instead of the document root
        #[arg(long, short)]
        section: Option<String>,
        /// Version the recipe is built for
        #[arg(long, short = 'r', value_name = "VERSION")]
        recipe_version: Option<String>,
        /// Channel the recipe is built for
        #[arg(long, short, env = "UMBASE_CHANNEL", default_value = "stable")]
        channel: String,
        /// Print the selection as JSON, including the selected key and diagnostic
        #[arg(long)]
        json: bool,
    },
    /// Print the channel a git ref exports to
    Channel {
        /// Branch or ref name (e.g. main, dev, CURA-1234_feature)
        ref_name: String,
    },
    /// List the keys of a version table
    Versions {
        /// Path to conandata.yml
        data: PathBuf,
        /// List a named section instead of the document root
        #[arg(long, short)]
        section: Option<String>,
    },
    /// Export recipes touched by a set of changed files
    Export(ExportArgs),
}

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Changed files; recipes are found from paths under recipes/
    pub files: Vec<PathBuf>,
    /// Export every recipe in this directory instead
    #[arg(long, value_name = "RECIPES_DIR", conflicts_with = "files")]
    pub all: Option<PathBuf>,
    /// User namespace for the exported references
    #[arg(long, env = "UMBASE_USER", default_value = "ultimaker")]
    pub user: String,
    /// Git ref being built; determines the channel
    #[arg(long, env = "UMBASE_REF_NAME")]
    pub ref_name: String,
    /// Package-manager executable
    #[arg(long, env = "UMBASE_CONAN", default_value = umbase_core::export::CONAN_PROGRAM)]
    pub conan: String,
}
