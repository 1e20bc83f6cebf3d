//! `shopforge-modules` — string-keyed module resolution.
//!
//! Infrastructure subsystems (caching, locking, event bus, workflow
//! engine, file storage) are swappable by resolution identifier: a
//! [`ModuleRegistry`] maps stable string keys to provider factories, and
//! the loader resolves the startup configuration's registrations through
//! it at boot. Changing an implementation means changing a string in the
//! configuration, not the wiring.

pub mod builtin;
pub mod error;
pub mod loader;
pub mod provider;
pub mod registry;

pub use error::{ModuleError, ModuleResult};
pub use loader::{LoadedModule, LoadedModules, LoadedProvider, load};
pub use provider::{ModuleProvider, ProviderFactory};
pub use registry::ModuleRegistry;
