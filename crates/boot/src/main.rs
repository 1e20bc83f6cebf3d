//! Fail-fast startup: hydrate the environment, assemble and validate the
//! configuration, resolve every registered module, and only then report
//! the platform ready. Any failure aborts with a nonzero exit before a
//! single module is handed out.

use shopforge_config::{AppEnv, ProcessEnv, assemble, hydrate};
use shopforge_modules::{ModuleRegistry, load};

fn main() {
    shopforge_observability::init();

    let app_env = AppEnv::from_process();
    tracing::info!(%app_env, "starting up");

    if let Err(err) = run(app_env) {
        tracing::error!(error = %err, "startup failed");
        std::process::exit(1);
    }
}

fn run(app_env: AppEnv) -> anyhow::Result<()> {
    hydrate(app_env)?;

    let assembled = assemble(&ProcessEnv)?;
    for warning in &assembled.warnings {
        tracing::warn!("{warning}");
    }

    let registry = ModuleRegistry::with_builtins();
    let loaded = load(&registry, &assembled.config)?;

    for module in loaded.iter() {
        let default = module.default_provider().map(|p| p.id().to_string());
        tracing::info!(
            module = %module.resolve,
            providers = module.providers.len(),
            default = default.as_deref().unwrap_or("-"),
            "module ready"
        );
    }

    tracing::info!(modules = loaded.len(), "startup configuration loaded");
    Ok(())
}
