//! # Dispatch Errors

use amcompat_core::{DecodeError, ResourceKind, VersionId};
use thiserror::Error;

/// Error returned by [`VersionDispatcher`](crate::VersionDispatcher).
#[derive(Error, Debug)]
pub enum DispatchError {
    /// No decoder is registered for this resource kind and version.
    #[error("{kind} decoding is not supported for server version '{version}'")]
    UnsupportedVersion {
        /// Resource kind that was requested.
        kind: ResourceKind,
        /// Version the server reported.
        version: VersionId,
    },

    /// The registered decoder rejected the payload.
    #[error("malformed {kind} payload from server version '{version}': {source}")]
    MalformedPayload {
        /// Resource kind that was decoded.
        kind: ResourceKind,
        /// Version whose decoder ran.
        version: VersionId,
        /// Structural failure reported by the decoder.
        #[source]
        source: DecodeError,
    },
}

impl DispatchError {
    /// Resource kind the failed call was for.
    pub fn kind(&self) -> ResourceKind {
        match self {
            Self::UnsupportedVersion { kind, .. } | Self::MalformedPayload { kind, .. } => *kind,
        }
    }

    /// Version the failed call was for.
    pub fn version(&self) -> &VersionId {
        match self {
            Self::UnsupportedVersion { version, .. } | Self::MalformedPayload { version, .. } => {
                version
            }
        }
    }

    /// Whether fetching the payload again could change the outcome.
    ///
    /// An unsupported version stays unsupported; a malformed response may
    /// be a one-off.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::UnsupportedVersion { .. } => false,
            Self::MalformedPayload { .. } => true,
        }
    }
}
