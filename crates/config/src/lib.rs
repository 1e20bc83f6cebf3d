//! `shopforge-config` — startup configuration assembly.
//!
//! Reads the process environment (after optional dotenv hydration), applies
//! fallback defaults, validates the registration invariants, and produces
//! the single immutable [`StartupConfig`] handed to the module loader.
//! Pure and synchronous: no IO beyond environment access, no retries.

pub mod assemble;
pub mod env;
pub mod error;
pub mod model;
pub mod validate;

pub use assemble::{Assembled, DEFAULT_SECRET, assemble};
pub use env::{AppEnv, EnvSource, MapEnv, ProcessEnv, hydrate};
pub use error::{ConfigError, ConfigResult, ConfigWarning};
pub use model::{
    HttpConfig, ModuleRegistration, ProjectConfig, ProviderRegistration, StartupConfig, resolve,
};
pub use validate::validate;
