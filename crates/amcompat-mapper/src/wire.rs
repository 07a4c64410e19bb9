//! Wire structures shared by every generation: the response envelope, the
//! alert-group tree, and the conversion into canonical records.

use std::collections::BTreeMap;

use amcompat_core::{Alert, AlertState, DecodeError, Matcher, Timestamp};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

const STATUS_SUCCESS: &str = "success";

/// `{"status": "...", "data": ..., "error": "..."}`
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    status: String,
    data: Option<T>,
    #[serde(default)]
    error: Option<String>,
}

/// Parse the response envelope and return its `data` member.
pub(crate) fn open_envelope<T: DeserializeOwned>(raw: &[u8]) -> Result<T, DecodeError> {
    let envelope: Envelope<T> = serde_json::from_slice(raw)?;
    if envelope.status != STATUS_SUCCESS {
        return Err(DecodeError::Rejected(match envelope.error {
            Some(error) => format!("{}: {error}", envelope.status),
            None => envelope.status,
        }));
    }
    envelope.data.ok_or(DecodeError::MissingField { field: "data" })
}

/// A list field whose key must be present but whose value may be `null`,
/// which servers send for an empty list.
pub(crate) fn nullable_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// One alert group: alerts sharing group labels, split by route.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "A: Deserialize<'de>"))]
pub(crate) struct AlertGroup<A> {
    #[serde(deserialize_with = "nullable_list")]
    pub blocks: Vec<AlertBlock<A>>,
}

#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "A: Deserialize<'de>"))]
pub(crate) struct AlertBlock<A> {
    #[serde(rename = "routeOpts")]
    pub route_opts: RouteOpts,
    #[serde(deserialize_with = "nullable_list")]
    pub alerts: Vec<A>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RouteOpts {
    pub receiver: String,
}

/// Fields every generation's alert object carries.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AlertCommon {
    pub labels: BTreeMap<String, String>,
    #[serde(default)]
    pub annotations: BTreeMap<String, String>,
    pub starts_at: Timestamp,
    #[serde(default)]
    pub ends_at: Option<Timestamp>,
    #[serde(default, rename = "generatorURL")]
    pub generator_url: String,
}

/// Suppression details, already normalized by the generation module.
pub(crate) struct Suppression {
    pub state: AlertState,
    pub silenced_by: Vec<String>,
    pub inhibited_by: Vec<String>,
    pub inhibited: bool,
}

impl Suppression {
    /// Older generations only report flags; the state follows from them.
    pub fn from_flags(silenced_by: Vec<String>, inhibited: bool) -> Self {
        let state = if inhibited || !silenced_by.is_empty() {
            AlertState::Suppressed
        } else {
            AlertState::Active
        };
        Self {
            state,
            silenced_by,
            inhibited_by: Vec::new(),
            inhibited,
        }
    }
}

/// Flatten alert groups into canonical alerts, mapping each wire alert
/// with `to_canonical`.
pub(crate) fn flatten_groups<A>(
    groups: Vec<AlertGroup<A>>,
    mut to_canonical: impl FnMut(A, &str) -> Result<Alert, DecodeError>,
) -> Result<Vec<Alert>, DecodeError> {
    let mut alerts = Vec::new();
    for group in groups {
        for block in group.blocks {
            let receiver = block.route_opts.receiver;
            if receiver.is_empty() {
                return Err(DecodeError::MissingField { field: "routeOpts.receiver" });
            }
            for alert in block.alerts {
                alerts.push(to_canonical(alert, &receiver)?);
            }
        }
    }
    Ok(alerts)
}

/// Assemble a canonical alert, rejecting empty label sets.
pub(crate) fn canonical_alert(
    common: AlertCommon,
    receiver: &str,
    suppression: Suppression,
) -> Result<Alert, DecodeError> {
    if common.labels.is_empty() {
        return Err(DecodeError::MissingField { field: "labels" });
    }
    Ok(Alert {
        labels: common.labels,
        annotations: common.annotations,
        starts_at: common.starts_at,
        ends_at: common.ends_at.and_then(Timestamp::into_option),
        generator_url: common.generator_url,
        receiver: receiver.to_string(),
        state: suppression.state,
        silenced_by: suppression.silenced_by,
        inhibited_by: suppression.inhibited_by,
        inhibited: suppression.inhibited,
    })
}

/// Silence matcher as sent by every generation.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WireMatcher {
    pub name: String,
    pub value: String,
    #[serde(default)]
    pub is_regex: bool,
}

/// Convert matchers, rejecting an empty list or an unnamed matcher.
pub(crate) fn canonical_matchers(matchers: Vec<WireMatcher>) -> Result<Vec<Matcher>, DecodeError> {
    if matchers.is_empty() {
        return Err(DecodeError::MissingField { field: "matchers" });
    }
    matchers
        .into_iter()
        .map(|m| {
            if m.name.is_empty() {
                return Err(DecodeError::MissingField { field: "matchers.name" });
            }
            Ok(Matcher {
                name: m.name,
                value: m.value,
                is_regex: m.is_regex,
            })
        })
        .collect()
}

/// Reject an empty string where the canonical record needs a value.
pub(crate) fn required(field: &'static str, value: String) -> Result<String, DecodeError> {
    if value.is_empty() {
        Err(DecodeError::MissingField { field })
    } else {
        Ok(value)
    }
}
