//! Module loader: startup configuration -> resolved modules.
//!
//! Walks the registrations in order and resolves each through the
//! registry. Runs exactly once at boot; the first failure aborts the whole
//! load so no partially wired module set ever escapes.

use shopforge_config::{ModuleRegistration, ProviderRegistration, StartupConfig};

use crate::error::ModuleResult;
use crate::provider::ModuleProvider;
use crate::registry::ModuleRegistry;

/// A provider resolved for a module, with its default flag.
#[derive(Debug)]
pub struct LoadedProvider {
    /// The resolved instance.
    pub provider: Box<dyn ModuleProvider>,
    /// Whether the registration flagged this provider as the default.
    pub is_default: bool,
}

/// One resolved module, keeping its registration identity.
#[derive(Debug)]
pub struct LoadedModule {
    /// Resolution key of the registration this module came from.
    pub resolve: String,
    /// Resolved providers, in registration order.
    pub providers: Vec<LoadedProvider>,
}

impl LoadedModule {
    /// The provider callers get when they do not ask for one by id: the
    /// flagged default, or the sole provider when there is exactly one.
    pub fn default_provider(&self) -> Option<&dyn ModuleProvider> {
        self.providers
            .iter()
            .find(|p| p.is_default)
            .or_else(|| match self.providers.as_slice() {
                [only] => Some(only),
                _ => None,
            })
            .map(|p| p.provider.as_ref())
    }

    /// Look up a provider by its instance id.
    pub fn provider(&self, id: &str) -> Option<&dyn ModuleProvider> {
        self.providers
            .iter()
            .find(|p| p.provider.id() == id)
            .map(|p| p.provider.as_ref())
    }
}

/// The full set of resolved modules, preserving registration order.
#[derive(Debug, Default)]
pub struct LoadedModules {
    modules: Vec<LoadedModule>,
}

impl LoadedModules {
    pub fn iter(&self) -> impl Iterator<Item = &LoadedModule> {
        self.modules.iter()
    }

    /// Look up a module by its resolution key.
    pub fn get(&self, resolve: &str) -> Option<&LoadedModule> {
        self.modules.iter().find(|m| m.resolve == resolve)
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

/// Resolve every module in `config` through `registry`.
pub fn load(registry: &ModuleRegistry, config: &StartupConfig) -> ModuleResult<LoadedModules> {
    let mut modules = Vec::with_capacity(config.modules.len());
    for registration in &config.modules {
        modules.push(load_module(registry, registration)?);
    }
    Ok(LoadedModules { modules })
}

fn load_module(
    registry: &ModuleRegistry,
    registration: &ModuleRegistration,
) -> ModuleResult<LoadedModule> {
    let providers = if registration.providers.is_empty() {
        // Direct resolution: the module key names the implementation and
        // the module-level options feed its factory.
        let synthetic = ProviderRegistration {
            resolve: registration.resolve.clone(),
            id: registration.resolve.clone(),
            is_default: true,
            options: registration.options.clone(),
        };
        vec![build_provider(registry, &synthetic)?]
    } else {
        registration
            .providers
            .iter()
            .map(|p| build_provider(registry, p))
            .collect::<ModuleResult<Vec<_>>>()?
    };

    tracing::info!(
        module = %registration.resolve,
        providers = providers.len(),
        "module resolved"
    );

    Ok(LoadedModule {
        resolve: registration.resolve.clone(),
        providers,
    })
}

fn build_provider(
    registry: &ModuleRegistry,
    registration: &ProviderRegistration,
) -> ModuleResult<LoadedProvider> {
    let factory = registry.get(&registration.resolve)?;
    let provider = factory.build(registration)?;
    Ok(LoadedProvider {
        provider,
        is_default: registration.is_default,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ModuleError;
    use crate::provider::ProviderFactory;
    use serde_json::json;
    use shopforge_config::{HttpConfig, ProjectConfig};

    #[derive(Debug)]
    struct NullProvider {
        id: String,
    }

    impl ModuleProvider for NullProvider {
        fn id(&self) -> &str {
            &self.id
        }

        fn kind(&self) -> &'static str {
            "null"
        }
    }

    struct NullFactory;

    impl ProviderFactory for NullFactory {
        fn resolve_key(&self) -> &'static str {
            "null"
        }

        fn build(
            &self,
            registration: &ProviderRegistration,
        ) -> ModuleResult<Box<dyn ModuleProvider>> {
            Ok(Box::new(NullProvider {
                id: registration.id.clone(),
            }))
        }
    }

    fn config(modules: Vec<ModuleRegistration>) -> StartupConfig {
        StartupConfig {
            project: ProjectConfig {
                database_url: "postgres://x".into(),
                redis_url: "redis://y".into(),
                http: HttpConfig {
                    store_cors: "*".into(),
                    admin_cors: "*".into(),
                    auth_cors: "*".into(),
                    jwt_secret: "s".into(),
                    cookie_secret: "s".into(),
                },
            },
            modules,
        }
    }

    fn null_registry() -> ModuleRegistry {
        let mut registry = ModuleRegistry::new();
        registry.register(Box::new(NullFactory)).unwrap();
        registry
    }

    #[test]
    fn direct_module_resolves_through_its_own_key() {
        let config = config(vec![ModuleRegistration::direct("null", json!(null))]);
        let loaded = load(&null_registry(), &config).unwrap();

        assert_eq!(loaded.len(), 1);
        let module = loaded.get("null").unwrap();
        let provider = module.default_provider().unwrap();
        assert_eq!(provider.id(), "null");
    }

    #[test]
    fn provider_list_resolves_in_order_with_flagged_default() {
        let config = config(vec![ModuleRegistration::with_providers(
            "caching",
            vec![
                ProviderRegistration {
                    resolve: "null".into(),
                    id: "cache-a".into(),
                    is_default: false,
                    options: json!(null),
                },
                ProviderRegistration {
                    resolve: "null".into(),
                    id: "cache-b".into(),
                    is_default: true,
                    options: json!(null),
                },
            ],
        )]);

        let loaded = load(&null_registry(), &config).unwrap();
        let module = loaded.get("caching").unwrap();

        let ids: Vec<&str> = module.providers.iter().map(|p| p.provider.id()).collect();
        assert_eq!(ids, vec!["cache-a", "cache-b"]);
        assert_eq!(module.default_provider().unwrap().id(), "cache-b");
        assert_eq!(module.provider("cache-a").unwrap().id(), "cache-a");
    }

    #[test]
    fn sole_unflagged_provider_is_the_default() {
        let config = config(vec![ModuleRegistration::with_providers(
            "file",
            vec![ProviderRegistration {
                resolve: "null".into(),
                id: "s3".into(),
                is_default: false,
                options: json!(null),
            }],
        )]);

        let loaded = load(&null_registry(), &config).unwrap();
        let module = loaded.get("file").unwrap();
        assert_eq!(module.default_provider().unwrap().id(), "s3");
    }

    #[test]
    fn unknown_resolution_key_fails_naming_the_key() {
        let config = config(vec![ModuleRegistration::direct(
            "caching-memcached",
            json!(null),
        )]);

        match load(&null_registry(), &config) {
            Err(ModuleError::UnknownResolveKey { key }) => {
                assert_eq!(key, "caching-memcached");
            }
            other => panic!("expected UnknownResolveKey, got {other:?}"),
        }
    }
}
