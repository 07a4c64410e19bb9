//! # amcompat-dispatch — Version Dispatcher
//!
//! The single entry point callers use to decode a fetched payload. Given
//! the version string a server reported and the raw response body, the
//! dispatcher looks up the registered decoder for that exact version and
//! returns canonical records.
//!
//! ## Error Model
//!
//! Exactly two outcomes besides success:
//!
//! - [`DispatchError::UnsupportedVersion`] — nothing is registered for the
//!   `(kind, version)` pair. No decoder runs. Retrying cannot help; surface
//!   it as a compatibility problem.
//! - [`DispatchError::MalformedPayload`] — the registered decoder rejected
//!   the payload. The decoder's error is kept as the source. The next fetch
//!   may succeed.
//!
//! ## Concurrency
//!
//! `VersionDispatcher` is a cheap handle over a frozen registry. Clone it
//! into as many tasks or threads as needed; decoding is synchronous, pure
//! and performs no I/O.

pub mod dispatcher;
pub mod error;

pub use dispatcher::VersionDispatcher;
pub use error::DispatchError;
