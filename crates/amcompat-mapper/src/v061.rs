//! # Generation 0.6.1
//!
//! Alerts replace the 0.4/0.5 flags with a `status` object reporting the
//! processing state directly. `silencedBy` and `inhibitedBy` are single
//! strings, empty when unset.
//!
//! No silence decoder is registered for this generation.

use std::sync::Arc;

use amcompat_core::{Alert, AlertDecoder, AlertState, DecodeError};
use amcompat_registry::DecoderRegistry;
use serde::Deserialize;

use crate::wire::{canonical_alert, flatten_groups, open_envelope, AlertCommon, AlertGroup, Suppression};

/// Version string reported by servers of this generation.
pub const VERSION: &str = "0.6.1";

#[derive(Debug, Deserialize)]
struct WireAlert {
    #[serde(flatten)]
    common: AlertCommon,
    status: WireStatus,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireStatus {
    state: String,
    silenced_by: String,
    inhibited_by: String,
}

fn non_empty(value: String) -> Vec<String> {
    if value.is_empty() {
        Vec::new()
    } else {
        vec![value]
    }
}

/// Alert decoder for 0.6.1 servers.
#[derive(Debug, Default, Clone, Copy)]
pub struct AlertMapper;

impl AlertDecoder for AlertMapper {
    fn decode(&self, raw: &[u8]) -> Result<Vec<Alert>, DecodeError> {
        let groups: Vec<AlertGroup<WireAlert>> = open_envelope(raw)?;
        flatten_groups(groups, |alert, receiver| {
            let status = alert.status;
            let state = AlertState::from_wire(&status.state).ok_or_else(|| {
                DecodeError::InvalidField {
                    field: "status.state",
                    reason: format!("unknown alert state {:?}", status.state),
                }
            })?;
            let inhibited_by = non_empty(status.inhibited_by);
            let suppression = Suppression {
                state,
                silenced_by: non_empty(status.silenced_by),
                inhibited: !inhibited_by.is_empty(),
                inhibited_by,
            };
            canonical_alert(alert.common, receiver, suppression)
        })
    }
}

/// Register the 0.6.1 alert decoder.
pub fn register(registry: &mut DecoderRegistry) {
    registry.register_alert_decoder(VERSION, Arc::new(AlertMapper));
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn alerts_payload(alert: Value) -> Vec<u8> {
        json!({
            "status": "success",
            "data": [{
                "labels": {"alertname": "HighLatency"},
                "groupKey": "{}:{alertname=\"HighLatency\"}",
                "blocks": [{"routeOpts": {"receiver": "web"}, "alerts": [alert]}]
            }]
        })
        .to_string()
        .into_bytes()
    }

    fn minimal_alert() -> Value {
        json!({
            "labels": {"alertname": "HighLatency", "service": "api"},
            "annotations": {"dashboard": "http://grafana/d/api"},
            "startsAt": "2017-04-20T10:00:00.5Z",
            "endsAt": "0001-01-01T00:00:00Z",
            "generatorURL": "http://prometheus/graph?g0.expr=latency",
            "status": {"state": "active", "silencedBy": "", "inhibitedBy": ""}
        })
    }

    #[test]
    fn decodes_minimal_alert() {
        let alerts = AlertMapper.decode(&alerts_payload(minimal_alert())).unwrap();
        assert_eq!(alerts.len(), 1);
        let alert = &alerts[0];
        assert_eq!(alert.labels["service"], "api");
        assert_eq!(alert.starts_at.to_string(), "2017-04-20T10:00:00.500Z");
        assert_eq!(alert.ends_at, None);
        assert_eq!(alert.state, AlertState::Active);
        assert!(alert.silenced_by.is_empty());
        assert!(alert.inhibited_by.is_empty());
        assert!(!alert.inhibited);
    }

    #[test]
    fn status_carries_suppression() {
        let mut alert = minimal_alert();
        alert["status"] = json!({
            "state": "suppressed",
            "silencedBy": "0a1b2c",
            "inhibitedBy": "fp-123"
        });
        let alerts = AlertMapper.decode(&alerts_payload(alert)).unwrap();
        assert_eq!(alerts[0].state, AlertState::Suppressed);
        assert_eq!(alerts[0].silenced_by, vec!["0a1b2c".to_string()]);
        assert_eq!(alerts[0].inhibited_by, vec!["fp-123".to_string()]);
        assert!(alerts[0].inhibited);
    }

    #[test]
    fn unprocessed_state_is_kept() {
        let mut alert = minimal_alert();
        alert["status"] = json!({"state": "unprocessed", "silencedBy": "", "inhibitedBy": ""});
        let alerts = AlertMapper.decode(&alerts_payload(alert)).unwrap();
        assert_eq!(alerts[0].state, AlertState::Unprocessed);
    }

    #[test]
    fn missing_suppression_fields_fail() {
        for field in ["silencedBy", "inhibitedBy"] {
            let mut alert = minimal_alert();
            alert["status"].as_object_mut().unwrap().remove(field);
            assert!(
                matches!(AlertMapper.decode(&alerts_payload(alert)), Err(DecodeError::Json(_))),
                "status without {field} should not decode"
            );
        }
    }

    #[test]
    fn unknown_state_fails() {
        let mut alert = minimal_alert();
        alert["status"]["state"] = json!("firing");
        let err = AlertMapper.decode(&alerts_payload(alert)).unwrap_err();
        assert!(matches!(err, DecodeError::InvalidField { field: "status.state", .. }));
    }

    #[test]
    fn missing_status_fails() {
        let mut alert = minimal_alert();
        alert.as_object_mut().unwrap().remove("status");
        assert!(matches!(
            AlertMapper.decode(&alerts_payload(alert)),
            Err(DecodeError::Json(_))
        ));
    }

    #[test]
    fn legacy_flags_alone_are_not_enough() {
        let alert = json!({
            "labels": {"alertname": "HighLatency"},
            "startsAt": "2017-04-20T10:00:00Z",
            "inhibited": false,
            "silenced": ""
        });
        assert!(AlertMapper.decode(&alerts_payload(alert)).is_err());
    }
}
