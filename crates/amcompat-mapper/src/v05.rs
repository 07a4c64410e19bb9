//! # Generation 0.5
//!
//! - Alerts keep the 0.4 flags, but `silenced` is now the silence ID string
//!   (empty when not silenced).
//! - Silence IDs are opaque strings, the silences endpoint returns a bare
//!   list, and creation time is reported as `updatedAt`.

use std::sync::Arc;

use amcompat_core::{Alert, AlertDecoder, DecodeError, Silence, SilenceDecoder, Timestamp};
use amcompat_registry::DecoderRegistry;
use serde::Deserialize;

use crate::wire::{
    canonical_alert, canonical_matchers, flatten_groups, open_envelope, required, AlertCommon,
    AlertGroup, Suppression, WireMatcher,
};

/// Version string reported by servers of this generation.
pub const VERSION: &str = "0.5";

#[derive(Debug, Deserialize)]
struct WireAlert {
    #[serde(flatten)]
    common: AlertCommon,
    inhibited: bool,
    silenced: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireSilence {
    id: String,
    matchers: Vec<WireMatcher>,
    starts_at: Timestamp,
    ends_at: Timestamp,
    updated_at: Timestamp,
    created_by: String,
    #[serde(default)]
    comment: String,
}

/// Alert decoder for 0.5 servers.
#[derive(Debug, Default, Clone, Copy)]
pub struct AlertMapper;

impl AlertDecoder for AlertMapper {
    fn decode(&self, raw: &[u8]) -> Result<Vec<Alert>, DecodeError> {
        let groups: Vec<AlertGroup<WireAlert>> = open_envelope(raw)?;
        flatten_groups(groups, |alert, receiver| {
            let silenced_by = if alert.silenced.is_empty() {
                Vec::new()
            } else {
                vec![alert.silenced]
            };
            canonical_alert(
                alert.common,
                receiver,
                Suppression::from_flags(silenced_by, alert.inhibited),
            )
        })
    }
}

/// Silence decoder for 0.5 servers.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilenceMapper;

impl SilenceDecoder for SilenceMapper {
    fn decode(&self, raw: &[u8]) -> Result<Vec<Silence>, DecodeError> {
        let silences: Vec<WireSilence> = open_envelope(raw)?;
        silences
            .into_iter()
            .map(|s| {
                Ok(Silence {
                    id: required("id", s.id)?,
                    matchers: canonical_matchers(s.matchers)?,
                    starts_at: s.starts_at,
                    ends_at: s.ends_at,
                    created_at: s.updated_at,
                    created_by: required("createdBy", s.created_by)?,
                    comment: s.comment,
                })
            })
            .collect()
    }
}

/// Register the 0.5 alert and silence decoders.
pub fn register(registry: &mut DecoderRegistry) {
    registry.register_alert_decoder(VERSION, Arc::new(AlertMapper));
    registry.register_silence_decoder(VERSION, Arc::new(SilenceMapper));
}
