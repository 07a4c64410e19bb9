//! # Alias Configuration
//!
//! Declares which already-registered decoders should also serve another
//! version. This is how a deployment deliberately closes a compatibility
//! gap, e.g. decoding 0.6.x silences with the 0.5 decoder, while keeping
//! every such decision in one reviewable file.
//!
//! ```yaml
//! aliases:
//!   - kind: silence
//!     from: "0.5"
//!     to: "0.6.1"
//! ```
//!
//! An empty or absent `aliases` list changes nothing.

use std::path::Path;

use amcompat_core::{ResourceKind, VersionId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error loading an alias configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("cannot read alias config '{path}': {source}")]
    Io {
        /// Path that failed to load.
        path: String,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid alias configuration YAML.
    #[error("invalid alias config: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// One explicit alias: reuse the `kind` decoder of `from` for `to`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AliasEntry {
    /// Resource kind being aliased.
    pub kind: ResourceKind,
    /// Version whose decoder is reused.
    pub from: VersionId,
    /// Version that gains the decoder.
    pub to: VersionId,
}

/// Ordered list of aliases applied after all generations have registered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AliasConfig {
    /// Aliases, applied in file order.
    #[serde(default)]
    pub aliases: Vec<AliasEntry>,
}

impl AliasConfig {
    /// Parse alias configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        // An empty document deserializes as unit, not as an empty mapping.
        if s.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(s)?)
    }

    /// Load alias configuration from a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml_str(&content)
    }
}
