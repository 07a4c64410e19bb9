//! # Generation 0.4
//!
//! - Alerts carry `inhibited: bool` and `silenced: u64`, where `0` means
//!   "not silenced" and any other value is the numeric ID of the silence.
//! - Silence IDs are numeric. The silences endpoint wraps the list:
//!   `{"silences": [...], "totalSilences": n}`.

use std::sync::Arc;

use amcompat_core::{Alert, AlertDecoder, DecodeError, Silence, SilenceDecoder, Timestamp};
use amcompat_registry::DecoderRegistry;
use serde::Deserialize;

use crate::wire::{
    canonical_alert, canonical_matchers, flatten_groups, nullable_list, open_envelope, required,
    AlertCommon, AlertGroup, Suppression, WireMatcher,
};

/// Version string reported by servers of this generation.
pub const VERSION: &str = "0.4";

#[derive(Debug, Deserialize)]
struct WireAlert {
    #[serde(flatten)]
    common: AlertCommon,
    inhibited: bool,
    silenced: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SilenceList {
    #[serde(deserialize_with = "nullable_list")]
    silences: Vec<WireSilence>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireSilence {
    id: u64,
    matchers: Vec<WireMatcher>,
    starts_at: Timestamp,
    ends_at: Timestamp,
    created_at: Timestamp,
    created_by: String,
    #[serde(default)]
    comment: String,
}

/// Alert decoder for 0.4 servers.
#[derive(Debug, Default, Clone, Copy)]
pub struct AlertMapper;

impl AlertDecoder for AlertMapper {
    fn decode(&self, raw: &[u8]) -> Result<Vec<Alert>, DecodeError> {
        let groups: Vec<AlertGroup<WireAlert>> = open_envelope(raw)?;
        flatten_groups(groups, |alert, receiver| {
            let silenced_by = match alert.silenced {
                0 => Vec::new(),
                id => vec![id.to_string()],
            };
            canonical_alert(
                alert.common,
                receiver,
                Suppression::from_flags(silenced_by, alert.inhibited),
            )
        })
    }
}

/// Silence decoder for 0.4 servers.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilenceMapper;

impl SilenceDecoder for SilenceMapper {
    fn decode(&self, raw: &[u8]) -> Result<Vec<Silence>, DecodeError> {
        let list: SilenceList = open_envelope(raw)?;
        list.silences
            .into_iter()
            .map(|s| {
                if s.id == 0 {
                    return Err(DecodeError::MissingField { field: "id" });
                }
                Ok(Silence {
                    id: s.id.to_string(),
                    matchers: canonical_matchers(s.matchers)?,
                    starts_at: s.starts_at,
                    ends_at: s.ends_at,
                    created_at: s.created_at,
                    created_by: required("createdBy", s.created_by)?,
                    comment: s.comment,
                })
            })
            .collect()
    }
}

/// Register the 0.4 alert and silence decoders.
pub fn register(registry: &mut DecoderRegistry) {
    registry.register_alert_decoder(VERSION, Arc::new(AlertMapper));
    registry.register_silence_decoder(VERSION, Arc::new(SilenceMapper));
}

#[cfg(test)]
mod tests {
    use super::*;
    use amcompat_core::AlertState;
    use serde_json::{json, Value};

    fn alerts_payload(alert: Value) -> Vec<u8> {
        json!({
            "status": "success",
            "data": [{
                "labels": {"alertname": "NodeDown"},
                "blocks": [{
                    "routeOpts": {"receiver": "ops", "groupBy": ["alertname"]},
                    "alerts": [alert]
                }]
            }]
        })
        .to_string()
        .into_bytes()
    }

    fn minimal_alert() -> Value {
        json!({
            "labels": {"alertname": "NodeDown", "instance": "web1"},
            "annotations": {"summary": "web1 is down"},
            "startsAt": "2017-03-14T12:00:00+01:00",
            "endsAt": "0001-01-01T00:00:00Z",
            "generatorURL": "http://prometheus/graph",
            "inhibited": false,
            "silenced": 0
        })
    }

    fn silences_payload(silence: Value) -> Vec<u8> {
        json!({
            "status": "success",
            "data": {"silences": [silence], "totalSilences": 1}
        })
        .to_string()
        .into_bytes()
    }

    fn minimal_silence() -> Value {
        json!({
            "id": 7,
            "matchers": [{"name": "instance", "value": "web1", "isRegex": false}],
            "startsAt": "2017-03-14T12:00:00Z",
            "endsAt": "2017-03-14T14:00:00Z",
            "createdAt": "2017-03-14T11:59:00Z",
            "createdBy": "ops@example.com",
            "comment": "maintenance"
        })
    }

    #[test]
    fn decodes_minimal_alert() {
        let alerts = AlertMapper.decode(&alerts_payload(minimal_alert())).unwrap();
        assert_eq!(alerts.len(), 1);
        let alert = &alerts[0];
        assert_eq!(alert.labels["instance"], "web1");
        assert_eq!(alert.annotations["summary"], "web1 is down");
        assert_eq!(alert.starts_at.to_string(), "2017-03-14T11:00:00Z");
        assert_eq!(alert.ends_at, None);
        assert_eq!(alert.receiver, "ops");
        assert_eq!(alert.state, AlertState::Active);
        assert!(alert.silenced_by.is_empty());
        assert!(!alert.inhibited);
    }

    #[test]
    fn numeric_silence_id_becomes_silenced_by() {
        let mut alert = minimal_alert();
        alert["silenced"] = json!(42);
        let alerts = AlertMapper.decode(&alerts_payload(alert)).unwrap();
        assert_eq!(alerts[0].silenced_by, vec!["42".to_string()]);
        assert_eq!(alerts[0].state, AlertState::Suppressed);
    }

    #[test]
    fn inhibited_flag_suppresses() {
        let mut alert = minimal_alert();
        alert["inhibited"] = json!(true);
        let alerts = AlertMapper.decode(&alerts_payload(alert)).unwrap();
        assert!(alerts[0].inhibited);
        assert!(alerts[0].inhibited_by.is_empty());
        assert_eq!(alerts[0].state, AlertState::Suppressed);
    }

    #[test]
    fn missing_starts_at_fails() {
        let mut alert = minimal_alert();
        alert.as_object_mut().unwrap().remove("startsAt");
        let err = AlertMapper.decode(&alerts_payload(alert)).unwrap_err();
        assert!(matches!(err, DecodeError::Json(_)));
    }

    #[test]
    fn missing_silenced_flag_fails() {
        let mut alert = minimal_alert();
        alert.as_object_mut().unwrap().remove("silenced");
        assert!(AlertMapper.decode(&alerts_payload(alert)).is_err());
    }

    #[test]
    fn string_silenced_is_a_newer_schema() {
        let mut alert = minimal_alert();
        alert["silenced"] = json!("6f2f3c2e");
        assert!(AlertMapper.decode(&alerts_payload(alert)).is_err());
    }

    #[test]
    fn empty_labels_fail() {
        let mut alert = minimal_alert();
        alert["labels"] = json!({});
        let err = AlertMapper.decode(&alerts_payload(alert)).unwrap_err();
        assert!(matches!(err, DecodeError::MissingField { field: "labels" }));
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let mut alert = minimal_alert();
        alert["fingerprint"] = json!("abc");
        alert["futureField"] = json!({"nested": true});
        assert_eq!(AlertMapper.decode(&alerts_payload(alert)).unwrap().len(), 1);
    }

    #[test]
    fn empty_group_list_decodes_to_nothing() {
        let raw = json!({"status": "success", "data": []}).to_string();
        assert!(AlertMapper.decode(raw.as_bytes()).unwrap().is_empty());
    }

    #[test]
    fn decodes_minimal_silence() {
        let silences = SilenceMapper.decode(&silences_payload(minimal_silence())).unwrap();
        assert_eq!(silences.len(), 1);
        let silence = &silences[0];
        assert_eq!(silence.id, "7");
        assert_eq!(silence.matchers.len(), 1);
        assert_eq!(silence.matchers[0].name, "instance");
        assert_eq!(silence.created_by, "ops@example.com");
        assert_eq!(silence.comment, "maintenance");
        assert_eq!(silence.created_at.to_string(), "2017-03-14T11:59:00Z");
    }

    #[test]
    fn null_silence_list_is_empty() {
        let raw = json!({"status": "success", "data": {"silences": null, "totalSilences": 0}});
        let silences = SilenceMapper.decode(raw.to_string().as_bytes()).unwrap();
        assert!(silences.is_empty());
    }

    #[test]
    fn missing_silence_list_fails() {
        let raw = json!({"status": "success", "data": {"totalSilences": 0}});
        assert!(matches!(
            SilenceMapper.decode(raw.to_string().as_bytes()),
            Err(DecodeError::Json(_))
        ));
    }

    #[test]
    fn silence_missing_created_by_fails() {
        let mut silence = minimal_silence();
        silence.as_object_mut().unwrap().remove("createdBy");
        assert!(SilenceMapper.decode(&silences_payload(silence)).is_err());
    }

    #[test]
    fn silence_without_matchers_fails() {
        let mut silence = minimal_silence();
        silence["matchers"] = json!([]);
        let err = SilenceMapper.decode(&silences_payload(silence)).unwrap_err();
        assert!(matches!(err, DecodeError::MissingField { field: "matchers" }));
    }

    #[test]
    fn silence_with_zero_id_fails() {
        let mut silence = minimal_silence();
        silence["id"] = json!(0);
        let err = SilenceMapper.decode(&silences_payload(silence)).unwrap_err();
        assert!(matches!(err, DecodeError::MissingField { field: "id" }));
    }
}
