//! # Canonical Silence Record
//!
//! The version-independent silence shape. Silence IDs are numeric in the
//! oldest generation and opaque strings afterwards; canonically they are
//! always strings.

use serde::{Deserialize, Serialize};

use crate::temporal::Timestamp;

/// A single label matcher of a silence.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Matcher {
    /// Label name.
    pub name: String,
    /// Value or regular expression to match.
    pub value: String,
    /// Whether `value` is a regular expression.
    pub is_regex: bool,
}

/// A silence muting every alert its matchers select.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Silence {
    /// Server-assigned silence ID.
    pub id: String,
    /// Label matchers. Never empty.
    pub matchers: Vec<Matcher>,
    /// Start of the silenced window.
    pub starts_at: Timestamp,
    /// End of the silenced window.
    pub ends_at: Timestamp,
    /// When the silence was created or last updated.
    pub created_at: Timestamp,
    /// Author.
    pub created_by: String,
    /// Free-form comment.
    pub comment: String,
}

impl Silence {
    /// Returns true if `at` falls inside the silenced window.
    pub fn is_active_at(&self, at: &Timestamp) -> bool {
        self.starts_at <= *at && *at < self.ends_at
    }
}
