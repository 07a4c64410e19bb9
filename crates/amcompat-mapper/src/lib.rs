//! # amcompat-mapper — Schema Generation Decoders
//!
//! One module per schema generation of the alert-management service. Each
//! module owns the wire types for that generation, the decoders that map
//! them onto the canonical records, and a `register` function that adds
//! those decoders to a [`DecoderRegistry`] under the generation's version
//! string.
//!
//! ## Generations
//!
//! | Module | Version | Alerts | Silences |
//! |--------|---------|--------|----------|
//! | [`v04`]  | `0.4`   | yes | yes |
//! | [`v05`]  | `0.5`   | yes | yes |
//! | [`v061`] | `0.6.1` | yes | no  |
//! | [`v062`] | `0.6.2` | yes | no  |
//!
//! The 0.6.x generations register no silence decoder. Deployments that
//! know the 0.5 silence schema still applies can close the gap explicitly
//! with an alias (see `amcompat_registry::AliasConfig`).
//!
//! ## Adding a Generation
//!
//! Add a module with its wire types, decoders and a `register` function,
//! then call it from [`register_all`]. Nothing else changes: the dispatcher
//! finds the new decoders through the registry.

pub mod v04;
pub mod v05;
pub mod v061;
pub mod v062;

mod wire;

use amcompat_registry::DecoderRegistry;

/// Register every known generation's decoders, oldest first.
///
/// # Panics
///
/// Panics if `registry` already holds a decoder for any key these
/// generations claim.
pub fn register_all(registry: &mut DecoderRegistry) {
    v04::register(registry);
    v05::register(registry);
    v061::register(registry);
    v062::register(registry);
    tracing::debug!(decoders = registry.len(), "registered built-in generations");
}

/// Build a registry holding exactly the built-in generations.
pub fn builtin_registry() -> DecoderRegistry {
    let mut registry = DecoderRegistry::new();
    register_all(&mut registry);
    registry
}

#[cfg(test)]
mod tests {
    use super::*;
    use amcompat_core::ResourceKind;

    fn versions(registry: &DecoderRegistry, kind: ResourceKind) -> Vec<&str> {
        registry
            .versions(kind)
            .into_iter()
            .map(|v| v.as_str())
            .collect()
    }

    #[test]
    fn builtin_registration_list() {
        let registry = builtin_registry();
        assert_eq!(
            versions(&registry, ResourceKind::Alert),
            vec!["0.4", "0.5", "0.6.1", "0.6.2"]
        );
        assert_eq!(versions(&registry, ResourceKind::Silence), vec!["0.4", "0.5"]);
        assert_eq!(registry.len(), 6);
    }

    #[test]
    #[should_panic(expected = "duplicate alert decoder registration for version '0.4'")]
    fn registering_all_twice_panics() {
        let mut registry = builtin_registry();
        register_all(&mut registry);
    }
}
