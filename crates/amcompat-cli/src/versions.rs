//! # Versions Subcommand
//!
//! Lists the registry contents, one line per resource kind.

use amcompat_core::ResourceKind;
use amcompat_registry::DecoderRegistry;
use clap::Args;

/// Arguments for the versions subcommand.
#[derive(Args, Debug)]
pub struct VersionsArgs {
    /// Only list this resource kind.
    #[arg(long)]
    pub kind: Option<ResourceKind>,
}

/// Render the registry as `kind: v1, v2, ...` lines.
pub fn render(registry: &DecoderRegistry, only: Option<ResourceKind>) -> String {
    ResourceKind::all()
        .iter()
        .filter(|kind| only.map_or(true, |only| only == **kind))
        .map(|kind| {
            let versions: Vec<&str> = registry
                .versions(*kind)
                .into_iter()
                .map(|v| v.as_str())
                .collect();
            if versions.is_empty() {
                format!("{kind}: (none)")
            } else {
                format!("{kind}: {}", versions.join(", "))
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Run the versions subcommand, writing to stdout.
pub fn run(args: &VersionsArgs, registry: &DecoderRegistry) -> anyhow::Result<()> {
    println!("{}", render(registry, args.kind));
    Ok(())
}
