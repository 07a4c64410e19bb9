//! # amcompat CLI Entry Point
//!
//! Assembles subcommands and dispatches to handler modules.

use std::path::PathBuf;
use std::sync::Arc;

use amcompat_dispatch::VersionDispatcher;
use clap::Parser;

/// Alertmanager compatibility toolkit.
///
/// Decodes captured alerts and silences responses from any supported
/// server generation into the canonical record format.
#[derive(Parser, Debug)]
#[command(name = "amcompat", version, about)]
struct Cli {
    /// YAML file of explicit decoder aliases to apply at startup.
    #[arg(long, global = true)]
    aliases: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Decode a captured response body.
    Decode(amcompat_cli::decode::DecodeArgs),
    /// List supported versions per resource kind.
    Versions(amcompat_cli::versions::VersionsArgs),
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so decoded JSON on stdout stays pipeable.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let registry = amcompat_cli::build_registry(cli.aliases.as_deref())?;
    tracing::debug!(decoders = registry.len(), "registry ready");

    match cli.command {
        Commands::Decode(args) => {
            let dispatcher = VersionDispatcher::new(Arc::new(registry));
            amcompat_cli::decode::run(&args, &dispatcher)
        }
        Commands::Versions(args) => amcompat_cli::versions::run(&args, &registry),
    }
}
