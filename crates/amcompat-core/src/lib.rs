//! # amcompat-core — Foundational Types for the Compatibility Layer
//!
//! This crate is the bedrock of the Alertmanager compatibility workspace.
//! It defines the version-independent vocabulary every other crate speaks:
//! which schema generation a server runs, which resource is being decoded,
//! what a decoded alert or silence looks like, and the contract a decoder
//! must satisfy. Every other crate in the workspace depends on
//! `amcompat-core`; it depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Opaque version keys.** `VersionId` is a newtype over the version
//!    string reported by the server. It is a lookup key only; there is no
//!    ordering and no "closest match".
//!
//! 2. **One canonical shape per resource.** `Alert` and `Silence` are the
//!    only records downstream code sees. Every generation-specific decoder
//!    produces exactly these types.
//!
//! 3. **Capabilities split by resource kind.** `AlertDecoder` and
//!    `SilenceDecoder` are separate traits so a generation can support one
//!    without the other.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `amcompat-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod alert;
pub mod decoder;
pub mod error;
pub mod silence;
pub mod temporal;
pub mod version;

// Re-export primary types for ergonomic imports.
pub use alert::{Alert, AlertState};
pub use decoder::{AlertDecoder, SilenceDecoder};
pub use error::DecodeError;
pub use silence::{Matcher, Silence};
pub use temporal::Timestamp;
pub use version::{ResourceKind, VersionId};
