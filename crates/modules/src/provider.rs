//! Provider abstraction (resolution mechanics only).
//!
//! A [`ModuleProvider`] is the opaque result of resolving a registration:
//! it has validated its options and holds whatever connection handle it
//! needs, but exposes none of the engine's semantics. The cache eviction
//! policy, lock fencing protocol, event delivery guarantees and workflow
//! durability all live behind the framework modules these providers stand
//! in for.

use core::fmt;

use shopforge_config::ProviderRegistration;

use crate::error::ModuleResult;

/// A resolved provider instance.
pub trait ModuleProvider: Send + Sync + fmt::Debug {
    /// Unique instance id within the owning module.
    fn id(&self) -> &str;

    /// Resolution key this provider was built from.
    fn kind(&self) -> &'static str;
}

/// Factory registered in the [`ModuleRegistry`](crate::ModuleRegistry)
/// under a stable string key.
///
/// Swapping an implementation means changing the string in the startup
/// configuration, not recompiling the wiring.
pub trait ProviderFactory: Send + Sync {
    /// The key this factory resolves.
    fn resolve_key(&self) -> &'static str;

    /// Build a provider instance from its registration.
    ///
    /// Implementations validate the registration's options here; a bad
    /// option shape or value fails the whole boot.
    fn build(&self, registration: &ProviderRegistration) -> ModuleResult<Box<dyn ModuleProvider>>;
}
