//! Built-in provider factories.
//!
//! The Redis-backed stack (caching, locking, event bus, workflow engine)
//! validates connection URLs up front; the S3 file provider carries its
//! credentials as plain options. None of them open a connection at build
//! time.

pub mod file_s3;
#[cfg(feature = "redis")]
pub mod redis;

use crate::provider::ProviderFactory;

/// The factories registered by
/// [`ModuleRegistry::with_builtins`](crate::ModuleRegistry::with_builtins).
pub fn factories() -> Vec<Box<dyn ProviderFactory>> {
    let mut all: Vec<Box<dyn ProviderFactory>> = Vec::new();
    #[cfg(feature = "redis")]
    all.extend(redis::factories());
    all.push(Box::new(file_s3::FileS3Factory));
    all
}
