//! # Canonical Alert Record
//!
//! The version-independent alert shape the dashboard operates on. Every
//! alert decoder, regardless of generation, produces `Alert` values with the
//! same field semantics:
//!
//! - `labels` is never empty; an alert without labels cannot be identified.
//! - `ends_at` is `None` when the server reported the zero-time sentinel.
//! - `state` is reported by the server for newer generations and derived
//!   from the silenced/inhibited flags for older ones.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::temporal::Timestamp;

/// Alert processing state as seen by the alert-management service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertState {
    /// Firing and not suppressed.
    Active,
    /// Silenced or inhibited.
    Suppressed,
    /// Received but not yet evaluated against silences and inhibitions.
    Unprocessed,
}

impl AlertState {
    /// Returns the snake_case identifier, matching the serde format.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Suppressed => "suppressed",
            Self::Unprocessed => "unprocessed",
        }
    }

    /// Parse the state string used on the wire.
    pub fn from_wire(s: &str) -> Option<Self> {
        match s {
            "active" => Some(Self::Active),
            "suppressed" => Some(Self::Suppressed),
            "unprocessed" => Some(Self::Unprocessed),
            _ => None,
        }
    }
}

impl fmt::Display for AlertState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single alert, as delivered to one receiver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    /// Identifying labels.
    pub labels: BTreeMap<String, String>,
    /// Informational annotations.
    pub annotations: BTreeMap<String, String>,
    /// When the alert started firing.
    pub starts_at: Timestamp,
    /// When the alert resolved or is expected to resolve.
    pub ends_at: Option<Timestamp>,
    /// Link back to the rule that generated the alert.
    pub generator_url: String,
    /// Name of the receiver the alert was routed to.
    pub receiver: String,
    /// Processing state.
    pub state: AlertState,
    /// IDs of the silences muting this alert.
    pub silenced_by: Vec<String>,
    /// Fingerprints of the alerts inhibiting this alert, when the server
    /// reports them.
    pub inhibited_by: Vec<String>,
    /// Whether the alert is inhibited. Older generations report the flag
    /// without naming the inhibiting alerts.
    pub inhibited: bool,
}

impl Alert {
    /// Returns true if at least one silence mutes this alert.
    pub fn is_silenced(&self) -> bool {
        !self.silenced_by.is_empty()
    }

    /// Stable content fingerprint computed from the label set.
    ///
    /// Lowercase hex SHA-256 over `name=value\n` lines in label-name order.
    /// Two alerts with the same labels share a fingerprint regardless of the
    /// generation they were decoded from.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        for (name, value) in &self.labels {
            hasher.update(name.as_bytes());
            hasher.update(b"=");
            hasher.update(value.as_bytes());
            hasher.update(b"\n");
        }
        hasher
            .finalize()
            .iter()
            .map(|b| format!("{b:02x}"))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alert(labels: &[(&str, &str)]) -> Alert {
        Alert {
            labels: labels
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            annotations: BTreeMap::new(),
            starts_at: Timestamp::parse("startsAt", "2018-01-01T00:00:00Z").unwrap(),
            ends_at: None,
            generator_url: String::new(),
            receiver: "default".to_string(),
            state: AlertState::Active,
            silenced_by: Vec::new(),
            inhibited_by: Vec::new(),
            inhibited: false,
        }
    }

    #[test]
    fn fingerprint_ignores_label_insertion_order() {
        let a = alert(&[("alertname", "Down"), ("job", "node")]);
        let b = alert(&[("job", "node"), ("alertname", "Down")]);
        assert_eq!(a.fingerprint(), b.fingerprint());
    }

    #[test]
    fn fingerprint_distinguishes_label_values() {
        let a = alert(&[("alertname", "Down"), ("job", "node")]);
        let b = alert(&[("alertname", "Down"), ("job", "blackbox")]);
        assert_ne!(a.fingerprint(), b.fingerprint());
    }

    #[test]
    fn fingerprint_is_hex_sha256() {
        let fp = alert(&[("alertname", "Down")]).fingerprint();
        assert_eq!(fp.len(), 64);
        assert!(fp.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn state_wire_strings() {
        for state in [AlertState::Active, AlertState::Suppressed, AlertState::Unprocessed] {
            assert_eq!(AlertState::from_wire(state.as_str()), Some(state));
        }
        assert_eq!(AlertState::from_wire("firing"), None);
    }

    #[test]
    fn serializes_camel_case() {
        let json = serde_json::to_value(alert(&[("alertname", "Down")])).unwrap();
        assert!(json.get("startsAt").is_some());
        assert!(json.get("silencedBy").is_some());
        assert_eq!(json["endsAt"], serde_json::Value::Null);
    }
}
