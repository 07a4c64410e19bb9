//! # Decode Errors
//!
//! Structural failures a decoder reports when it cannot turn a raw payload
//! into canonical records. Every variant names what was wrong so the
//! dispatcher can wrap it without losing context.
//!
//! A decoder never substitutes a zero value for a mandatory field. A field
//! that is absent, null, or empty where the canonical shape requires data is
//! reported here instead.

use thiserror::Error;

/// Error produced by a generation-specific decoder.
#[derive(Error, Debug)]
pub enum DecodeError {
    /// The payload is not valid JSON, or does not match the generation's
    /// schema (wrong type, missing required key).
    #[error("invalid payload: {0}")]
    Json(#[from] serde_json::Error),

    /// A field the canonical record requires was present but empty.
    #[error("missing required field '{field}'")]
    MissingField {
        /// Wire name of the missing field.
        field: &'static str,
    },

    /// A field was present but its value is outside the generation's schema.
    #[error("invalid value for field '{field}': {reason}")]
    InvalidField {
        /// Wire name of the offending field.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// The server envelope reported a non-success status.
    #[error("server reported status '{0}'")]
    Rejected(String),
}
