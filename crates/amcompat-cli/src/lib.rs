//! # amcompat-cli — Compatibility Layer Command-Line Interface
//!
//! A developer tool for working with captured server responses. It builds
//! the same registry a host process would (built-in generations plus an
//! optional alias file) and exposes it from the shell.
//!
//! ## Subcommands
//!
//! - `decode` — decode a captured alerts or silences body and print the
//!   canonical records as JSON
//! - `versions` — list which versions each resource kind can decode
//!
//! ## Crate Policy
//!
//! - CLI construction (argument parsing) is separated from the handlers.
//! - Handlers delegate to the library crates; no decoding logic here.

pub mod decode;
pub mod versions;

use std::path::Path;

use amcompat_registry::{AliasConfig, DecoderRegistry};
use anyhow::Context;

/// Build the startup registry: every built-in generation, then the aliases
/// from `aliases` if given.
pub fn build_registry(aliases: Option<&Path>) -> anyhow::Result<DecoderRegistry> {
    let mut registry = amcompat_mapper::builtin_registry();
    if let Some(path) = aliases {
        let config = AliasConfig::load(path)?;
        registry
            .apply_aliases(&config)
            .with_context(|| format!("applying aliases from {}", path.display()))?;
    }
    Ok(registry)
}
