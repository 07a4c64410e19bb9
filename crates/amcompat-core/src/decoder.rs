//! # Decoder Capabilities
//!
//! Defines the contract every generation-specific decoder satisfies. The
//! registry stores capabilities behind these traits and the dispatcher
//! invokes them without knowing which generation it is talking to.
//!
//! ## Invariants
//!
//! - Decoders are stateless. `decode` is a pure function of its input and
//!   may be called concurrently from any number of threads; the
//!   `Send + Sync` bounds make this a compile-time requirement.
//! - Unknown fields in the payload are ignored.
//! - A mandatory canonical field that is absent or empty is an error, never
//!   a default value.

use std::fmt::Debug;

use crate::alert::Alert;
use crate::error::DecodeError;
use crate::silence::Silence;

/// Turns one generation's alerts payload into canonical alerts.
pub trait AlertDecoder: Debug + Send + Sync {
    /// Decode a raw alerts response body.
    fn decode(&self, raw: &[u8]) -> Result<Vec<Alert>, DecodeError>;
}

/// Turns one generation's silences payload into canonical silences.
pub trait SilenceDecoder: Debug + Send + Sync {
    /// Decode a raw silences response body.
    fn decode(&self, raw: &[u8]) -> Result<Vec<Silence>, DecodeError>;
}
