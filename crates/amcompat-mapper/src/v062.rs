//! # Generation 0.6.2
//!
//! Same alert tree as 0.6.1, but `silencedBy` and `inhibitedBy` became
//! lists (which the server may send as `null`).
//!
//! No silence decoder is registered for this generation.

use std::sync::Arc;

use amcompat_core::{Alert, AlertDecoder, AlertState, DecodeError};
use amcompat_registry::DecoderRegistry;
use serde::Deserialize;

use crate::wire::{
    canonical_alert, flatten_groups, nullable_list, open_envelope, AlertCommon, AlertGroup,
    Suppression,
};

/// Version string reported by servers of this generation.
pub const VERSION: &str = "0.6.2";

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
    #[serde(deserialize_with = "nullable_list")]
    silenced_by: Vec<String>,
    #[serde(deserialize_with = "nullable_list")]
    inhibited_by: Vec<String>,
}

/// Alert decoder for 0.6.2 servers.
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
            let inhibited_by = status.inhibited_by;
            let suppression = Suppression {
                state,
                silenced_by: status.silenced_by,
                inhibited: !inhibited_by.is_empty(),
                inhibited_by,
            };
            canonical_alert(alert.common, receiver, suppression)
        })
    }
}

/// Register the 0.6.2 alert decoder.
pub fn register(registry: &mut DecoderRegistry) {
    registry.register_alert_decoder(VERSION, Arc::new(AlertMapper));
}
