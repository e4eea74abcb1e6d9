//! umbase - recipe version data tooling

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use umbase_cli::cmd;
use umbase_cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins; otherwise warnings only, or debug with -v
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if cli.verbose { "debug" } else { "warn" }));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Resolve {
            data,
            section,
            recipe_version,
            channel,
            json,
        } => cmd::resolve::resolve(
            &data,
            section.as_deref(),
            recipe_version.as_deref(),
            &channel,
            json,
        ),
        Commands::Channel { ref_name } => cmd::channel::channel(&ref_name),
        Commands::Versions { data, section } => cmd::versions::versions(&data, section.as_deref()),
        Commands::Export(args) => cmd::export::export(&args, cli.dry_run),
    }
}
