//! Module resolution error model.

use thiserror::Error;

/// Result type used across the module layer.
pub type ModuleResult<T> = Result<T, ModuleError>;

/// Error raised while registering factories or resolving modules.
///
/// Resolution runs once at startup; every variant is fatal and aborts the
/// boot before any module is handed out.
#[derive(Debug, Error)]
pub enum ModuleError {
    /// No factory is registered under the requested resolution key.
    #[error("unknown resolution key `{key}`")]
    UnknownResolveKey {
        /// The key that failed to resolve.
        key: String,
    },

    /// A factory was registered twice under the same key.
    #[error("resolution key `{key}` registered more than once")]
    DuplicateRegistryKey {
        /// The duplicated key.
        key: String,
    },

    /// Provider options did not match the shape the factory expects.
    #[error("invalid options for `{key}`: {reason}")]
    InvalidOptions {
        /// Resolution key of the factory that rejected the options.
        key: String,
        /// Human-readable reason.
        reason: String,
    },

    /// A Redis connection URL failed to parse.
    #[cfg(feature = "redis")]
    #[error("invalid redis url for `{key}`")]
    InvalidRedisUrl {
        /// Resolution key of the provider holding the URL.
        key: String,
        /// Underlying parse error.
        source: redis::RedisError,
    },
}

impl ModuleError {
    pub fn invalid_options(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidOptions {
            key: key.into(),
            reason: reason.into(),
        }
    }
}
