//! Configuration error and warning model.

use thiserror::Error;

/// Result type used across the configuration layer.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Startup configuration error.
///
/// Every variant is fatal: a human must fix the environment (or the
/// registration data) before the platform is allowed to boot. Retrying is
/// never meaningful here.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment variable was absent (or blank).
    #[error("missing required configuration: {key}")]
    MissingVar {
        /// Name of the absent variable.
        key: &'static str,
    },

    /// A variable was present but its value could not be used.
    #[error("invalid configuration value for {key}: {reason}")]
    InvalidValue {
        /// Name of the offending variable.
        key: String,
        /// Human-readable reason.
        reason: String,
    },

    /// A module or provider registration carried an empty resolution
    /// identifier.
    #[error("empty resolution identifier in module `{module}`")]
    EmptyResolveId {
        /// Module the registration belongs to.
        module: String,
    },

    /// More than one provider in the same module list was flagged default.
    #[error("module `{module}` has more than one default provider")]
    DuplicateDefaultProvider {
        /// Offending module.
        module: String,
    },

    /// The same provider instance id appeared twice within one module.
    #[error("module `{module}` registers provider id `{id}` more than once")]
    DuplicateProviderId {
        /// Offending module.
        module: String,
        /// Duplicated instance id.
        id: String,
    },

    /// A dotenv file existed but could not be read or parsed.
    #[error("failed to load env file: {source}")]
    EnvFile {
        /// Underlying dotenv error.
        #[from]
        source: dotenvy::Error,
    },
}

impl ConfigError {
    pub fn invalid_value(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            key: key.into(),
            reason: reason.into(),
        }
    }
}

/// Non-fatal condition recorded during assembly.
///
/// Warnings are data, not log lines: the assembler returns them so the boot
/// path can log each one and tests can assert on them. They must never be
/// silently dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    /// A signing secret fell back to the insecure development default.
    InsecureDefaultSecret {
        /// Variable that was left unset.
        key: &'static str,
    },
}

impl core::fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InsecureDefaultSecret { key } => {
                write!(f, "{key} not set; using insecure dev default")
            }
        }
    }
}
