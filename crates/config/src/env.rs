//! Process environment access and dotenv hydration.
//!
//! Assembly never touches `std::env` directly: it goes through [`EnvSource`]
//! so tests can supply a fixed snapshot without mutating process state.

use std::collections::HashMap;
use std::env;

use crate::error::{ConfigError, ConfigResult};

/// Which environment-specific dotenv file to hydrate before assembly.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum AppEnv {
    /// Local development (the default when `APP_ENV` is unset).
    #[default]
    Development,
    /// Automated test runs.
    Test,
    /// Production deployments.
    Production,
}

impl AppEnv {
    /// Read `APP_ENV` from the process environment.
    ///
    /// Unknown values fall back to development rather than failing: the
    /// variable only selects which optional dotenv file is loaded.
    pub fn from_process() -> Self {
        match env::var("APP_ENV") {
            Ok(value) => Self::parse(&value),
            Err(_) => Self::Development,
        }
    }

    fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "test" => Self::Test,
            _ => Self::Development,
        }
    }

    /// Name used in the environment-specific dotenv file (`.env.<name>`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Test => "test",
            Self::Production => "production",
        }
    }
}

impl core::fmt::Display for AppEnv {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Load `.env.<app_env>` then `.env` into the process environment.
///
/// Variables already set in the process win over file contents, and a
/// missing file is not an error; an unreadable or malformed file is.
pub fn hydrate(app_env: AppEnv) -> ConfigResult<()> {
    load_env_file(&format!(".env.{app_env}"))?;
    load_env_file(".env")
}

fn load_env_file(path: &str) -> ConfigResult<()> {
    match dotenvy::from_filename(path) {
        Ok(_) => Ok(()),
        Err(dotenvy::Error::Io(err)) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(err) => Err(ConfigError::from(err)),
    }
}

/// Read access to an environment snapshot.
pub trait EnvSource {
    /// Raw value of `key`, if set.
    fn var(&self, key: &str) -> Option<String>;
}

/// The live process environment.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        env::var(key).ok()
    }
}

/// Fixed in-memory environment for tests and tooling.
#[derive(Debug, Default, Clone)]
pub struct MapEnv {
    vars: HashMap<String, String>,
}

impl MapEnv {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insertion.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(key.into(), value.into());
        self
    }

    pub fn remove(&mut self, key: &str) {
        self.vars.remove(key);
    }
}

impl EnvSource for MapEnv {
    fn var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}

impl<K, V> FromIterator<(K, V)> for MapEnv
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Fetch a required variable; blank values count as absent.
pub(crate) fn required(env: &dyn EnvSource, key: &'static str) -> ConfigResult<String> {
    optional(env, key).ok_or(ConfigError::MissingVar { key })
}

/// Fetch an optional variable, treating blank values as unset.
pub(crate) fn optional(env: &dyn EnvSource, key: &str) -> Option<String> {
    env.var(key).and_then(|value| {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}
