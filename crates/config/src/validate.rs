//! Structural validation of the assembled configuration.
//!
//! These checks guard the registration invariants: non-empty resolution
//! identifiers, at most one default provider per module, unique provider
//! instance ids. The assembler runs them before the record escapes, so a
//! config that fails here never reaches the module loader.

use std::collections::HashSet;

use crate::error::{ConfigError, ConfigResult};
use crate::model::{ModuleRegistration, StartupConfig};

/// Validate every module registration in `config`.
pub fn validate(config: &StartupConfig) -> ConfigResult<()> {
    for module in &config.modules {
        validate_module(module)?;
    }
    Ok(())
}

fn validate_module(module: &ModuleRegistration) -> ConfigResult<()> {
    if module.resolve.trim().is_empty() {
        return Err(ConfigError::EmptyResolveId {
            module: "<unnamed>".to_string(),
        });
    }

    let mut defaults = 0usize;
    let mut seen_ids: HashSet<&str> = HashSet::new();

    for provider in &module.providers {
        if provider.resolve.trim().is_empty() {
            return Err(ConfigError::EmptyResolveId {
                module: module.resolve.clone(),
            });
        }
        if !seen_ids.insert(provider.id.as_str()) {
            return Err(ConfigError::DuplicateProviderId {
                module: module.resolve.clone(),
                id: provider.id.clone(),
            });
        }
        if provider.is_default {
            defaults += 1;
        }
    }

    if defaults > 1 {
        return Err(ConfigError::DuplicateDefaultProvider {
            module: module.resolve.clone(),
        });
    }

    Ok(())
}
