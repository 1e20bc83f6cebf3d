//! Startup configuration model.
//!
//! One immutable record, assembled once from the environment at process
//! start and handed to the module loader. Nothing here is mutated at
//! runtime or written back out.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Module resolution keys emitted by the assembler.
pub mod resolve {
    /// Caching module (provider-based).
    pub const CACHING: &str = "caching";
    /// Distributed-locking module (provider-based).
    pub const LOCKING: &str = "locking";
    /// Event-bus module, resolved directly to its Redis implementation.
    pub const EVENT_BUS_REDIS: &str = "event-bus-redis";
    /// Workflow-engine module, resolved directly to its Redis implementation.
    pub const WORKFLOW_ENGINE_REDIS: &str = "workflow-engine-redis";
    /// File-storage module (provider-based, inactive unless configured).
    pub const FILE: &str = "file";

    /// Redis caching provider.
    pub const CACHING_REDIS: &str = "caching-redis";
    /// Redis locking provider.
    pub const LOCKING_REDIS: &str = "locking-redis";
    /// S3-compatible file-storage provider.
    pub const FILE_S3: &str = "file-s3";
}

/// The complete startup configuration record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartupConfig {
    /// Project-wide settings (datastore, cache, HTTP policy).
    pub project: ProjectConfig,
    /// Ordered infrastructure module registrations.
    pub modules: Vec<ModuleRegistration>,
}

impl StartupConfig {
    /// Look up a module registration by its resolution key.
    pub fn module(&self, resolve: &str) -> Option<&ModuleRegistration> {
        self.modules.iter().find(|m| m.resolve == resolve)
    }
}

/// Project-wide settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Primary datastore connection string.
    pub database_url: String,
    /// General-purpose key-value store connection string.
    pub redis_url: String,
    /// HTTP surface policy (CORS allow-lists and signing secrets).
    pub http: HttpConfig,
}

/// CORS allow-lists and signing secrets per HTTP surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Origins permitted on the storefront surface.
    pub store_cors: String,
    /// Origins permitted on the admin surface.
    pub admin_cors: String,
    /// Origins permitted on the auth surface.
    pub auth_cors: String,
    /// JWT signing secret.
    pub jwt_secret: String,
    /// Cookie signing secret.
    pub cookie_secret: String,
}

/// One infrastructure module registration.
///
/// A module either resolves directly to an implementation (empty provider
/// list, options on the module itself) or acts as a grouping with one or
/// more pluggable providers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleRegistration {
    /// Resolution identifier looked up by the loader.
    pub resolve: String,
    /// Module-level options (free-form, interpreted by the implementation).
    #[serde(default)]
    pub options: JsonValue,
    /// Pluggable providers registered under this module.
    #[serde(default)]
    pub providers: Vec<ProviderRegistration>,
}

impl ModuleRegistration {
    /// Module resolved directly to an implementation.
    pub fn direct(resolve: impl Into<String>, options: JsonValue) -> Self {
        Self {
            resolve: resolve.into(),
            options,
            providers: Vec::new(),
        }
    }

    /// Module grouping a provider list.
    pub fn with_providers(
        resolve: impl Into<String>,
        providers: Vec<ProviderRegistration>,
    ) -> Self {
        Self {
            resolve: resolve.into(),
            options: JsonValue::Null,
            providers,
        }
    }
}

/// A concrete provider registered under a module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderRegistration {
    /// Resolution identifier looked up by the loader.
    pub resolve: String,
    /// Unique instance id within the module.
    pub id: String,
    /// Whether this provider is the module default.
    #[serde(default)]
    pub is_default: bool,
    /// Provider-specific options (free-form, interpreted by the factory).
    #[serde(default)]
    pub options: JsonValue,
}
