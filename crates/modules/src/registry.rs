//! String-keyed provider factory registry.

use std::collections::HashMap;

use crate::builtin;
use crate::error::{ModuleError, ModuleResult};
use crate::provider::ProviderFactory;

/// Registry mapping resolution keys to provider factories.
///
/// Populated once at process initialization and then only read by the
/// loader. Registration order is irrelevant; keys must be unique.
#[derive(Default)]
pub struct ModuleRegistry {
    factories: HashMap<&'static str, Box<dyn ProviderFactory>>,
}

impl ModuleRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry pre-populated with the built-in factories.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for factory in builtin::factories() {
            registry
                .register(factory)
                .expect("builtin resolution keys are unique");
        }
        registry
    }

    /// Register a factory under its resolution key.
    pub fn register(&mut self, factory: Box<dyn ProviderFactory>) -> ModuleResult<()> {
        let key = factory.resolve_key();
        if self.factories.contains_key(key) {
            return Err(ModuleError::DuplicateRegistryKey {
                key: key.to_string(),
            });
        }
        self.factories.insert(key, factory);
        Ok(())
    }

    /// Look up the factory for `key`.
    pub fn get(&self, key: &str) -> ModuleResult<&dyn ProviderFactory> {
        self.factories
            .get(key)
            .map(Box::as_ref)
            .ok_or_else(|| ModuleError::UnknownResolveKey {
                key: key.to_string(),
            })
    }

    /// All registered resolution keys (unordered).
    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.factories.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl core::fmt::Debug for ModuleRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut keys: Vec<_> = self.keys().collect();
        keys.sort_unstable();
        f.debug_struct("ModuleRegistry").field("keys", &keys).finish()
    }
}
