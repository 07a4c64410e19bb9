//! # Decoder Registry
//!
//! Two tables, one per resource kind, each mapping an exact version string
//! to a shared decoder capability. Splitting by kind lets a generation
//! change its alert schema while keeping silences untouched, or support one
//! resource without the other.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;

use amcompat_core::{AlertDecoder, ResourceKind, SilenceDecoder, VersionId};
use thiserror::Error;

use crate::config::AliasConfig;

/// Error raised while building a registry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// Two registrations claimed the same `(kind, version)` key.
    #[error("duplicate {kind} decoder registration for version '{version}'")]
    DuplicateRegistration {
        /// Resource kind of the conflicting key.
        kind: ResourceKind,
        /// Version of the conflicting key.
        version: VersionId,
    },

    /// An alias referenced a version with no decoder to reuse.
    #[error("cannot alias {kind} decoder: nothing registered for version '{version}'")]
    UnknownSource {
        /// Resource kind of the alias.
        kind: ResourceKind,
        /// Source version that has no registration.
        version: VersionId,
    },
}

/// A registered capability, borrowed from the registry.
#[derive(Debug, Clone, Copy)]
pub enum Capability<'a> {
    /// Alert decoding capability.
    Alert(&'a Arc<dyn AlertDecoder>),
    /// Silence decoding capability.
    Silence(&'a Arc<dyn SilenceDecoder>),
}

impl Capability<'_> {
    /// The resource kind this capability decodes.
    pub fn kind(&self) -> ResourceKind {
        match self {
            Self::Alert(_) => ResourceKind::Alert,
            Self::Silence(_) => ResourceKind::Silence,
        }
    }
}

/// Table of decoder capabilities keyed by `(ResourceKind, VersionId)`.
///
/// ## Thread Safety
///
/// `DecoderRegistry` is `Send + Sync`. Build it mutably at startup, then
/// share it read-only (typically inside an `Arc`).
#[derive(Debug, Default)]
pub struct DecoderRegistry {
    alerts: HashMap<VersionId, Arc<dyn AlertDecoder>>,
    silences: HashMap<VersionId, Arc<dyn SilenceDecoder>>,
}

impl DecoderRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the alert decoder for `version`.
    ///
    /// # Panics
    ///
    /// Panics if an alert decoder is already registered for `version`.
    /// Conflicting registrations make dispatch ambiguous and must stop
    /// startup.
    pub fn register_alert_decoder(
        &mut self,
        version: impl Into<VersionId>,
        capability: Arc<dyn AlertDecoder>,
    ) {
        if let Err(e) = self.try_register_alert_decoder(version, capability) {
            panic!("{e}");
        }
    }

    /// Register the silence decoder for `version`.
    ///
    /// # Panics
    ///
    /// Panics if a silence decoder is already registered for `version`.
    pub fn register_silence_decoder(
        &mut self,
        version: impl Into<VersionId>,
        capability: Arc<dyn SilenceDecoder>,
    ) {
        if let Err(e) = self.try_register_silence_decoder(version, capability) {
            panic!("{e}");
        }
    }

    /// Fallible form of [`register_alert_decoder`](Self::register_alert_decoder).
    ///
    /// The existing entry is left untouched on conflict.
    pub fn try_register_alert_decoder(
        &mut self,
        version: impl Into<VersionId>,
        capability: Arc<dyn AlertDecoder>,
    ) -> Result<(), RegistryError> {
        insert_unique(&mut self.alerts, ResourceKind::Alert, version.into(), capability)
    }

    /// Fallible form of [`register_silence_decoder`](Self::register_silence_decoder).
    pub fn try_register_silence_decoder(
        &mut self,
        version: impl Into<VersionId>,
        capability: Arc<dyn SilenceDecoder>,
    ) -> Result<(), RegistryError> {
        insert_unique(&mut self.silences, ResourceKind::Silence, version.into(), capability)
    }

    /// Register the alert decoder stored under `from` under `to` as well.
    ///
    /// Both keys then resolve to the same capability instance.
    pub fn alias_alert_decoder(
        &mut self,
        from: &str,
        to: impl Into<VersionId>,
    ) -> Result<(), RegistryError> {
        let capability = self
            .alerts
            .get(from)
            .cloned()
            .ok_or_else(|| RegistryError::UnknownSource {
                kind: ResourceKind::Alert,
                version: VersionId::from(from),
            })?;
        insert_unique(&mut self.alerts, ResourceKind::Alert, to.into(), capability)
    }

    /// Register the silence decoder stored under `from` under `to` as well.
    pub fn alias_silence_decoder(
        &mut self,
        from: &str,
        to: impl Into<VersionId>,
    ) -> Result<(), RegistryError> {
        let capability = self
            .silences
            .get(from)
            .cloned()
            .ok_or_else(|| RegistryError::UnknownSource {
                kind: ResourceKind::Silence,
                version: VersionId::from(from),
            })?;
        insert_unique(&mut self.silences, ResourceKind::Silence, to.into(), capability)
    }

    /// Kind-generic form of the `alias_*_decoder` methods.
    pub fn alias(
        &mut self,
        kind: ResourceKind,
        from: &str,
        to: impl Into<VersionId>,
    ) -> Result<(), RegistryError> {
        match kind {
            ResourceKind::Alert => self.alias_alert_decoder(from, to),
            ResourceKind::Silence => self.alias_silence_decoder(from, to),
        }
    }

    /// Apply every alias in `config`, in order.
    ///
    /// Stops at the first failing entry. Entries applied before the failure
    /// stay registered; callers treat any error here as fatal to startup.
    pub fn apply_aliases(&mut self, config: &AliasConfig) -> Result<(), RegistryError> {
        for entry in &config.aliases {
            self.alias(entry.kind, entry.from.as_str(), entry.to.clone())?;
            tracing::info!(
                kind = %entry.kind,
                from = %entry.from,
                to = %entry.to,
                "aliased decoder"
            );
        }
        Ok(())
    }

    /// Look up the alert decoder registered for exactly `version`.
    pub fn alert_decoder(&self, version: &str) -> Option<&Arc<dyn AlertDecoder>> {
        self.alerts.get(version)
    }

    /// Look up the silence decoder registered for exactly `version`.
    pub fn silence_decoder(&self, version: &str) -> Option<&Arc<dyn SilenceDecoder>> {
        self.silences.get(version)
    }

    /// Look up the capability registered for `(kind, version)`.
    pub fn lookup(&self, kind: ResourceKind, version: &str) -> Option<Capability<'_>> {
        match kind {
            ResourceKind::Alert => self.alert_decoder(version).map(Capability::Alert),
            ResourceKind::Silence => self.silence_decoder(version).map(Capability::Silence),
        }
    }

    /// Returns true if a capability is registered for `(kind, version)`.
    pub fn contains(&self, kind: ResourceKind, version: &str) -> bool {
        match kind {
            ResourceKind::Alert => self.alerts.contains_key(version),
            ResourceKind::Silence => self.silences.contains_key(version),
        }
    }

    /// Versions registered for `kind`, sorted lexically.
    pub fn versions(&self, kind: ResourceKind) -> Vec<&VersionId> {
        let mut versions: Vec<&VersionId> = match kind {
            ResourceKind::Alert => self.alerts.keys().collect(),
            ResourceKind::Silence => self.silences.keys().collect(),
        };
        versions.sort();
        versions
    }

    /// Total number of registered `(kind, version)` keys.
    pub fn len(&self) -> usize {
        self.alerts.len() + self.silences.len()
    }

    /// Returns true if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn insert_unique<T: ?Sized>(
    table: &mut HashMap<VersionId, Arc<T>>,
    kind: ResourceKind,
    version: VersionId,
    capability: Arc<T>,
) -> Result<(), RegistryError> {
    match table.entry(version) {
        Entry::Occupied(occupied) => Err(RegistryError::DuplicateRegistration {
            kind,
            version: occupied.key().clone(),
        }),
        Entry::Vacant(vacant) => {
            tracing::debug!(%kind, version = %vacant.key(), "registered decoder");
            vacant.insert(capability);
            Ok(())
        }
    }
}
