//! The configuration assembler.
//!
//! A pure transformation from an environment snapshot to the validated
//! [`StartupConfig`]: no network, no retries, executed exactly once at
//! process start. Missing required variables abort assembly immediately;
//! secrets falling back to the development default are recorded as
//! warnings and returned alongside the config.

use serde_json::json;

use crate::env::{EnvSource, optional, required};
use crate::error::{ConfigResult, ConfigWarning};
use crate::model::{
    HttpConfig, ModuleRegistration, ProjectConfig, ProviderRegistration, StartupConfig, resolve,
};
use crate::validate;

/// Placeholder used when a signing secret is unset. Development only.
pub const DEFAULT_SECRET: &str = "supersecret";

/// Assembly output: the immutable config plus the warnings recorded while
/// building it.
#[derive(Debug)]
pub struct Assembled {
    /// The validated startup configuration.
    pub config: StartupConfig,
    /// Non-fatal conditions observed during assembly.
    pub warnings: Vec<ConfigWarning>,
}

/// Assemble and validate the startup configuration from `env`.
pub fn assemble(env: &dyn EnvSource) -> ConfigResult<Assembled> {
    let mut warnings = Vec::new();

    let database_url = required(env, "DATABASE_URL")?;
    let redis_url = required(env, "REDIS_URL")?;

    let http = HttpConfig {
        store_cors: required(env, "STORE_CORS")?,
        admin_cors: required(env, "ADMIN_CORS")?,
        auth_cors: required(env, "AUTH_CORS")?,
        jwt_secret: secret(env, "JWT_SECRET", &mut warnings),
        cookie_secret: secret(env, "COOKIE_SECRET", &mut warnings),
    };

    let mut modules = vec![
        caching_module(env, &redis_url),
        locking_module(env, &redis_url),
        event_bus_module(env, &redis_url),
        workflow_engine_module(env, &redis_url),
    ];
    if let Some(file) = file_module(env)? {
        modules.push(file);
    }

    let config = StartupConfig {
        project: ProjectConfig {
            database_url,
            redis_url,
            http,
        },
        modules,
    };

    validate::validate(&config)?;

    Ok(Assembled { config, warnings })
}

fn secret(env: &dyn EnvSource, key: &'static str, warnings: &mut Vec<ConfigWarning>) -> String {
    match optional(env, key) {
        Some(value) => value,
        None => {
            warnings.push(ConfigWarning::InsecureDefaultSecret { key });
            DEFAULT_SECRET.to_string()
        }
    }
}

/// Per-module Redis URL, falling back to the shared `REDIS_URL`.
fn module_redis_url(env: &dyn EnvSource, key: &str, shared: &str) -> String {
    optional(env, key).unwrap_or_else(|| shared.to_string())
}

fn caching_module(env: &dyn EnvSource, shared_redis: &str) -> ModuleRegistration {
    let redis_url = module_redis_url(env, "CACHE_REDIS_URL", shared_redis);
    ModuleRegistration::with_providers(
        resolve::CACHING,
        vec![ProviderRegistration {
            resolve: resolve::CACHING_REDIS.into(),
            id: "caching-redis".into(),
            is_default: true,
            options: json!({ "redis_url": redis_url }),
        }],
    )
}

fn locking_module(env: &dyn EnvSource, shared_redis: &str) -> ModuleRegistration {
    let redis_url = module_redis_url(env, "LOCKING_REDIS_URL", shared_redis);
    ModuleRegistration::with_providers(
        resolve::LOCKING,
        vec![ProviderRegistration {
            resolve: resolve::LOCKING_REDIS.into(),
            id: "locking-redis".into(),
            is_default: true,
            options: json!({ "redis_url": redis_url }),
        }],
    )
}

fn event_bus_module(env: &dyn EnvSource, shared_redis: &str) -> ModuleRegistration {
    let redis_url = module_redis_url(env, "EVENTS_REDIS_URL", shared_redis);
    ModuleRegistration::direct(resolve::EVENT_BUS_REDIS, json!({ "redis_url": redis_url }))
}

fn workflow_engine_module(env: &dyn EnvSource, shared_redis: &str) -> ModuleRegistration {
    let redis_url = module_redis_url(env, "WE_REDIS_URL", shared_redis);
    ModuleRegistration::direct(
        resolve::WORKFLOW_ENGINE_REDIS,
        json!({ "redis": { "url": redis_url } }),
    )
}

/// File storage is inactive unless `S3_FILE_URL` is set; once it is, the
/// remaining `S3_*` variables become required.
fn file_module(env: &dyn EnvSource) -> ConfigResult<Option<ModuleRegistration>> {
    let Some(file_url) = optional(env, "S3_FILE_URL") else {
        return Ok(None);
    };

    let options = json!({
        "file_url": file_url,
        "access_key_id": required(env, "S3_ACCESS_KEY_ID")?,
        "secret_access_key": required(env, "S3_SECRET_ACCESS_KEY")?,
        "region": required(env, "S3_REGION")?,
        "bucket": required(env, "S3_BUCKET")?,
        "endpoint": required(env, "S3_ENDPOINT")?,
    });

    Ok(Some(ModuleRegistration::with_providers(
        resolve::FILE,
        vec![ProviderRegistration {
            resolve: resolve::FILE_S3.into(),
            id: "s3".into(),
            is_default: false,
            options,
        }],
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::MapEnv;
    use crate::error::ConfigError;

    fn complete_env() -> MapEnv {
        MapEnv::new()
            .with("DATABASE_URL", "postgres://localhost/shopforge")
            .with("REDIS_URL", "redis://localhost:6379")
            .with("STORE_CORS", "http://localhost:8000")
            .with("ADMIN_CORS", "http://localhost:7001")
            .with("AUTH_CORS", "http://localhost:9000")
            .with("JWT_SECRET", "jwt-secret")
            .with("COOKIE_SECRET", "cookie-secret")
    }

    #[test]
    fn assembles_four_modules_from_a_complete_environment() {
        let assembled = assemble(&complete_env()).unwrap();

        assert!(assembled.warnings.is_empty());
        let keys: Vec<&str> = assembled
            .config
            .modules
            .iter()
            .map(|m| m.resolve.as_str())
            .collect();
        assert_eq!(
            keys,
            vec![
                resolve::CACHING,
                resolve::LOCKING,
                resolve::EVENT_BUS_REDIS,
                resolve::WORKFLOW_ENGINE_REDIS,
            ]
        );
    }

    #[test]
    fn each_required_variable_fails_fast_when_missing() {
        for key in [
            "DATABASE_URL",
            "REDIS_URL",
            "STORE_CORS",
            "ADMIN_CORS",
            "AUTH_CORS",
        ] {
            let mut env = complete_env();
            env.remove(key);

            match assemble(&env) {
                Err(ConfigError::MissingVar { key: missing }) => assert_eq!(missing, key),
                other => panic!("expected MissingVar for {key}, got {other:?}"),
            }
        }
    }

    #[test]
    fn missing_admin_cors_fails_before_any_module_is_built() {
        let mut env = complete_env();
        env.remove("ADMIN_CORS");

        let err = assemble(&env).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::MissingVar { key: "ADMIN_CORS" }
        ));
    }

    #[test]
    fn unset_secrets_fall_back_and_record_a_warning() {
        let mut env = complete_env();
        env.remove("JWT_SECRET");

        let assembled = assemble(&env).unwrap();
        assert_eq!(assembled.config.project.http.jwt_secret, DEFAULT_SECRET);
        assert_eq!(assembled.config.project.http.cookie_secret, "cookie-secret");
        assert_eq!(
            assembled.warnings,
            vec![ConfigWarning::InsecureDefaultSecret { key: "JWT_SECRET" }]
        );
    }

    #[test]
    fn provided_secrets_are_used_verbatim_without_warning() {
        let assembled = assemble(&complete_env()).unwrap();
        assert_eq!(assembled.config.project.http.jwt_secret, "jwt-secret");
        assert_eq!(assembled.config.project.http.cookie_secret, "cookie-secret");
        assert!(assembled.warnings.is_empty());
    }

    #[test]
    fn dedicated_redis_urls_override_the_shared_one() {
        let env = complete_env()
            .with("CACHE_REDIS_URL", "redis://cache:6379")
            .with("EVENTS_REDIS_URL", "redis://events:6379");

        let assembled = assemble(&env).unwrap();
        let config = assembled.config;

        let caching = config.module(resolve::CACHING).unwrap();
        assert_eq!(
            caching.providers[0].options["redis_url"],
            "redis://cache:6379"
        );

        let events = config.module(resolve::EVENT_BUS_REDIS).unwrap();
        assert_eq!(events.options["redis_url"], "redis://events:6379");

        // Unset dedicated URLs fall back to REDIS_URL.
        let locking = config.module(resolve::LOCKING).unwrap();
        assert_eq!(
            locking.providers[0].options["redis_url"],
            "redis://localhost:6379"
        );
        let workflow = config.module(resolve::WORKFLOW_ENGINE_REDIS).unwrap();
        assert_eq!(workflow.options["redis"]["url"], "redis://localhost:6379");
    }

    #[test]
    fn file_module_appears_only_when_s3_is_configured() {
        let assembled = assemble(&complete_env()).unwrap();
        assert!(assembled.config.module(resolve::FILE).is_none());

        let env = complete_env()
            .with("S3_FILE_URL", "https://cdn.example.com")
            .with("S3_ACCESS_KEY_ID", "key")
            .with("S3_SECRET_ACCESS_KEY", "secret")
            .with("S3_REGION", "eu-west-1")
            .with("S3_BUCKET", "assets")
            .with("S3_ENDPOINT", "https://s3.eu-west-1.amazonaws.com");

        let assembled = assemble(&env).unwrap();
        let file = assembled.config.module(resolve::FILE).unwrap();
        assert_eq!(file.providers.len(), 1);
        assert_eq!(file.providers[0].resolve, resolve::FILE_S3);
        assert_eq!(file.providers[0].id, "s3");
        assert_eq!(file.providers[0].options["bucket"], "assets");
    }

    #[test]
    fn partially_configured_s3_fails_fast() {
        let env = complete_env().with("S3_FILE_URL", "https://cdn.example.com");

        match assemble(&env) {
            Err(ConfigError::MissingVar { key }) => assert!(key.starts_with("S3_")),
            other => panic!("expected MissingVar for S3 settings, got {other:?}"),
        }
    }

    #[test]
    fn assembly_is_deterministic_for_a_fixed_snapshot() {
        let env = complete_env().with("CACHE_REDIS_URL", "redis://cache:6379");

        let first = assemble(&env).unwrap();
        let second = assemble(&env).unwrap();
        assert_eq!(first.config, second.config);
        assert_eq!(first.warnings, second.warnings);
    }
}
