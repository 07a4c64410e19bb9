//! # Temporal Types — Server Timestamps Normalized to UTC
//!
//! Defines `Timestamp`, the instant type used by every canonical record.
//!
//! Alert-management servers emit RFC 3339 timestamps with whatever offset
//! the server runs in, and with nanosecond precision. All of them are
//! converted to UTC at parse time so records from different servers compare
//! and sort correctly.
//!
//! ## Unset Sentinel
//!
//! Servers encode "no end time" as the Go zero time,
//! `0001-01-01T00:00:00Z`. It parses as a valid instant; [`Timestamp::is_unset`]
//! recognizes it so decoders can map it to `None` instead of displaying a
//! date two thousand years in the past.

use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::DecodeError;

/// Unix seconds of `0001-01-01T00:00:00Z`.
const UNSET_EPOCH_SECS: i64 = -62_135_596_800;

/// A UTC instant parsed from a server payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Wrap a `chrono::DateTime<Utc>`.
    pub fn from_utc(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Parse an RFC 3339 timestamp, accepting any offset and converting to UTC.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::InvalidField`] naming `field` if the string is
    /// not valid RFC 3339.
    pub fn parse(field: &'static str, s: &str) -> Result<Self, DecodeError> {
        parse_rfc3339(s).map_err(|reason| DecodeError::InvalidField { field, reason })
    }

    /// Returns true for the zero-time sentinel servers use for "not set".
    pub fn is_unset(&self) -> bool {
        self.0.timestamp() == UNSET_EPOCH_SECS && self.0.timestamp_subsec_nanos() == 0
    }

    /// `None` for the unset sentinel, `Some(self)` otherwise.
    pub fn into_option(self) -> Option<Self> {
        if self.is_unset() {
            None
        } else {
            Some(self)
        }
    }

    /// Access the inner `DateTime<Utc>`.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Render as RFC 3339 with a `Z` suffix, keeping sub-second digits only
    /// when present.
    pub fn to_rfc3339(&self) -> String {
        self.0.to_rfc3339_opts(SecondsFormat::AutoSi, true)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_rfc3339())
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_rfc3339())
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        parse_rfc3339(&s).map_err(<D::Error as serde::de::Error>::custom)
    }
}

/// Parse RFC 3339 with any offset into a UTC `Timestamp`.
fn parse_rfc3339(s: &str) -> Result<Timestamp, String> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| Timestamp(dt.with_timezone(&Utc)))
        .map_err(|e| format!("invalid RFC 3339 timestamp {s:?}: {e}"))
}
