//! # Decode Subcommand
//!
//! Decodes a captured response body as a given server version would have
//! sent it.

use std::io::Read;
use std::path::PathBuf;

use amcompat_core::ResourceKind;
use amcompat_dispatch::VersionDispatcher;
use anyhow::Context;
use clap::Args;

/// Arguments for the decode subcommand.
#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Resource kind of the payload (alert or silence).
    #[arg(long)]
    pub kind: ResourceKind,

    /// Version string the server reported (e.g. 0.5).
    #[arg(long)]
    pub server_version: String,

    /// Print compact JSON instead of pretty-printed.
    #[arg(long)]
    pub compact: bool,

    /// Captured response body; `-` reads stdin.
    pub file: PathBuf,
}

/// Decode `raw` and render the canonical records as JSON.
pub fn decode_to_json(
    dispatcher: &VersionDispatcher,
    kind: ResourceKind,
    version: &str,
    raw: &[u8],
) -> anyhow::Result<serde_json::Value> {
    let value = match kind {
        ResourceKind::Alert => serde_json::to_value(dispatcher.decode_alerts(version, raw)?)?,
        ResourceKind::Silence => serde_json::to_value(dispatcher.decode_silences(version, raw)?)?,
    };
    Ok(value)
}

/// Run the decode subcommand, writing JSON to stdout.
pub fn run(args: &DecodeArgs, dispatcher: &VersionDispatcher) -> anyhow::Result<()> {
    let raw = if args.file.as_os_str() == "-" {
        let mut buf = Vec::new();
        std::io::stdin()
            .read_to_end(&mut buf)
            .context("reading payload from stdin")?;
        buf
    } else {
        std::fs::read(&args.file)
            .with_context(|| format!("reading payload from {}", args.file.display()))?
    };

    let value = decode_to_json(dispatcher, args.kind, &args.server_version, &raw)?;
    let rendered = if args.compact {
        serde_json::to_string(&value)?
    } else {
        serde_json::to_string_pretty(&value)?
    };
    println!("{rendered}");
    Ok(())
}
