//! # Version Identifiers and Resource Kinds
//!
//! `VersionId` names one schema generation of the alert-management service
//! (e.g. `"0.4"`, `"0.6.2"`). It is compared by exact string equality only.
//! Decoders are never assumed to be forward or backward compatible with a
//! version they were not registered under.
//!
//! `ResourceKind` is the closed set of resources this layer decodes. Every
//! `match` on it must be exhaustive, so adding a kind forces every registry
//! table and dispatcher path to handle it at compile time.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque schema-generation identifier reported by a server.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VersionId(String);

impl VersionId {
    /// Wrap a version string. No normalization is applied.
    pub fn new(version: impl Into<String>) -> Self {
        Self(version.into())
    }

    /// Access the raw version string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for VersionId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for VersionId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl Borrow<str> for VersionId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for VersionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VersionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The category of data being decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    /// Alert groups served by the alerts endpoint.
    Alert,
    /// Silences served by the silences endpoint.
    Silence,
}

impl ResourceKind {
    /// Returns every resource kind in canonical order.
    pub fn all() -> &'static [ResourceKind] {
        &[Self::Alert, Self::Silence]
    }

    /// Returns the snake_case identifier, matching the serde format.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Alert => "alert",
            Self::Silence => "silence",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ResourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "alert" | "alerts" => Ok(Self::Alert),
            "silence" | "silences" => Ok(Self::Silence),
            other => Err(format!("unknown resource kind: {other:?}")),
        }
    }
}
