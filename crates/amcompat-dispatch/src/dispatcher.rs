//! # Dispatcher
//!
//! Looks up the decoder for `(kind, version)` and runs it. This is the only
//! place that turns "which generation is this server" into "which code
//! runs"; nothing downstream branches on version.

use std::sync::Arc;

use amcompat_core::{Alert, DecodeError, ResourceKind, Silence, VersionId};
use amcompat_registry::DecoderRegistry;

use crate::error::DispatchError;

/// Decodes payloads by routing them to the registered decoder for the
/// server's version.
#[derive(Debug, Clone)]
pub struct VersionDispatcher {
    registry: Arc<DecoderRegistry>,
}

impl VersionDispatcher {
    /// Create a dispatcher over a fully built registry.
    pub fn new(registry: Arc<DecoderRegistry>) -> Self {
        Self { registry }
    }

    /// The registry this dispatcher reads from.
    pub fn registry(&self) -> &DecoderRegistry {
        &self.registry
    }

    /// Returns true if a decoder is registered for `(kind, version)`.
    pub fn supports(&self, kind: ResourceKind, version: &str) -> bool {
        self.registry.contains(kind, version)
    }

    /// Decode an alerts response body from a server running `version`.
    ///
    /// # Errors
    ///
    /// [`DispatchError::UnsupportedVersion`] if no alert decoder is
    /// registered for `version`; [`DispatchError::MalformedPayload`] if the
    /// decoder rejects `raw`.
    pub fn decode_alerts(&self, version: &str, raw: &[u8]) -> Result<Vec<Alert>, DispatchError> {
        let decoder = self
            .registry
            .alert_decoder(version)
            .ok_or_else(|| unsupported(ResourceKind::Alert, version))?;
        finish(ResourceKind::Alert, version, decoder.decode(raw))
    }

    /// Decode a silences response body from a server running `version`.
    ///
    /// # Errors
    ///
    /// [`DispatchError::UnsupportedVersion`] if no silence decoder is
    /// registered for `version`; [`DispatchError::MalformedPayload`] if the
    /// decoder rejects `raw`.
    pub fn decode_silences(
        &self,
        version: &str,
        raw: &[u8],
    ) -> Result<Vec<Silence>, DispatchError> {
        let decoder = self
            .registry
            .silence_decoder(version)
            .ok_or_else(|| unsupported(ResourceKind::Silence, version))?;
        finish(ResourceKind::Silence, version, decoder.decode(raw))
    }
}

fn unsupported(kind: ResourceKind, version: &str) -> DispatchError {
    tracing::debug!(%kind, version, "no decoder registered");
    DispatchError::UnsupportedVersion {
        kind,
        version: VersionId::from(version),
    }
}

fn finish<R>(
    kind: ResourceKind,
    version: &str,
    result: Result<Vec<R>, DecodeError>,
) -> Result<Vec<R>, DispatchError> {
    match result {
        Ok(records) => {
            tracing::debug!(%kind, version, records = records.len(), "decoded payload");
            Ok(records)
        }
        Err(source) => {
            tracing::warn!(%kind, version, error = %source, "decoder rejected payload");
            Err(DispatchError::MalformedPayload {
                kind,
                version: VersionId::from(version),
                source,
            })
        }
    }
}
