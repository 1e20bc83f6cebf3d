//! Redis-backed provider factories.
//!
//! `redis::Client::open` parses and validates the connection URL without
//! touching the network, so a malformed URL fails the boot while a live
//! connection remains the owning engine's concern.

use serde::Deserialize;

use shopforge_config::{ProviderRegistration, resolve};

use crate::error::{ModuleError, ModuleResult};
use crate::provider::{ModuleProvider, ProviderFactory};

/// Flat options shape: `{"redis_url": "..."}`.
#[derive(Debug, Deserialize)]
struct RedisOptions {
    redis_url: String,
}

/// Nested options shape used by the workflow engine: `{"redis": {"url": "..."}}`.
#[derive(Debug, Deserialize)]
struct NestedRedisOptions {
    redis: RedisUrl,
}

#[derive(Debug, Deserialize)]
struct RedisUrl {
    url: String,
}

/// A resolved Redis-backed provider: a validated client handle plus its
/// registration identity.
#[derive(Debug, Clone)]
pub struct RedisProvider {
    id: String,
    kind: &'static str,
    client: redis::Client,
}

impl RedisProvider {
    fn open(kind: &'static str, id: &str, url: &str) -> ModuleResult<Self> {
        let client = redis::Client::open(url).map_err(|source| ModuleError::InvalidRedisUrl {
            key: kind.to_string(),
            source,
        })?;
        Ok(Self {
            id: id.to_string(),
            kind,
            client,
        })
    }

    /// The validated (but unconnected) client handle.
    pub fn client(&self) -> &redis::Client {
        &self.client
    }
}

impl ModuleProvider for RedisProvider {
    fn id(&self) -> &str {
        &self.id
    }

    fn kind(&self) -> &'static str {
        self.kind
    }
}

fn flat_redis_url(key: &'static str, registration: &ProviderRegistration) -> ModuleResult<String> {
    let options: RedisOptions = serde_json::from_value(registration.options.clone())
        .map_err(|e| ModuleError::invalid_options(key, e.to_string()))?;
    Ok(options.redis_url)
}

/// `caching-redis` provider factory.
pub struct CachingRedisFactory;

impl ProviderFactory for CachingRedisFactory {
    fn resolve_key(&self) -> &'static str {
        resolve::CACHING_REDIS
    }

    fn build(&self, registration: &ProviderRegistration) -> ModuleResult<Box<dyn ModuleProvider>> {
        let url = flat_redis_url(self.resolve_key(), registration)?;
        Ok(Box::new(RedisProvider::open(
            self.resolve_key(),
            &registration.id,
            &url,
        )?))
    }
}

/// `locking-redis` provider factory.
pub struct LockingRedisFactory;

impl ProviderFactory for LockingRedisFactory {
    fn resolve_key(&self) -> &'static str {
        resolve::LOCKING_REDIS
    }

    fn build(&self, registration: &ProviderRegistration) -> ModuleResult<Box<dyn ModuleProvider>> {
        let url = flat_redis_url(self.resolve_key(), registration)?;
        Ok(Box::new(RedisProvider::open(
            self.resolve_key(),
            &registration.id,
            &url,
        )?))
    }
}

/// `event-bus-redis` module factory (resolved directly, no provider list).
pub struct EventBusRedisFactory;

impl ProviderFactory for EventBusRedisFactory {
    fn resolve_key(&self) -> &'static str {
        resolve::EVENT_BUS_REDIS
    }

    fn build(&self, registration: &ProviderRegistration) -> ModuleResult<Box<dyn ModuleProvider>> {
        let url = flat_redis_url(self.resolve_key(), registration)?;
        Ok(Box::new(RedisProvider::open(
            self.resolve_key(),
            &registration.id,
            &url,
        )?))
    }
}

/// `workflow-engine-redis` module factory (resolved directly, nested options).
pub struct WorkflowEngineRedisFactory;

impl ProviderFactory for WorkflowEngineRedisFactory {
    fn resolve_key(&self) -> &'static str {
        resolve::WORKFLOW_ENGINE_REDIS
    }

    fn build(&self, registration: &ProviderRegistration) -> ModuleResult<Box<dyn ModuleProvider>> {
        let options: NestedRedisOptions = serde_json::from_value(registration.options.clone())
            .map_err(|e| ModuleError::invalid_options(self.resolve_key(), e.to_string()))?;
        Ok(Box::new(RedisProvider::open(
            self.resolve_key(),
            &registration.id,
            &options.redis.url,
        )?))
    }
}

pub(crate) fn factories() -> Vec<Box<dyn ProviderFactory>> {
    vec![
        Box::new(CachingRedisFactory),
        Box::new(LockingRedisFactory),
        Box::new(EventBusRedisFactory),
        Box::new(WorkflowEngineRedisFactory),
    ]
}
