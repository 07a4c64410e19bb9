//! # amcompat-registry — Decoder Capability Registry
//!
//! A table from `(ResourceKind, VersionId)` to the decoder capability that
//! understands that generation's payload for that resource.
//!
//! ## Lifecycle
//!
//! The registry is an ordinary value owned by the host process. It is built
//! once at startup by calling each generation's registration function in a
//! fixed order, optionally extended with explicit aliases, and then frozen
//! behind an `Arc` and handed to the dispatcher. There is no global
//! instance; tests build independent registries freely.
//!
//! ## Invariants
//!
//! - At most one capability per key. Registering a key twice is a
//!   programming error and panics at startup.
//! - Lookups are by exact key. There is no fallback to a neighbouring
//!   version; reusing a decoder under another version requires an explicit
//!   registration or alias.
//! - Once frozen, the registry is only read, so concurrent lookups need no
//!   synchronization.
//!
//! ## Crate Policy
//!
//! - Depends only on `amcompat-core` internally.
//! - Knows nothing about any concrete schema generation.

pub mod config;
pub mod registry;

pub use config::{AliasConfig, AliasEntry, ConfigError};
pub use registry::{Capability, DecoderRegistry, RegistryError};
