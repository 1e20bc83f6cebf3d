//! S3-compatible file-storage provider factory.
//!
//! Holds the connection parameters as validated options only; the storage
//! engine itself lives in the owning framework module.

use serde::Deserialize;

use shopforge_config::{ProviderRegistration, resolve};

use crate::error::{ModuleError, ModuleResult};
use crate::provider::{ModuleProvider, ProviderFactory};

/// Connection parameters for an S3-compatible object store.
#[derive(Debug, Clone, Deserialize)]
pub struct S3Options {
    pub file_url: String,
    pub access_key_id: String,
    pub secret_access_key: String,
    pub region: String,
    pub bucket: String,
    pub endpoint: String,
}

/// A resolved S3 file-storage provider.
#[derive(Debug)]
pub struct FileS3Provider {
    id: String,
    options: S3Options,
}

impl FileS3Provider {
    pub fn options(&self) -> &S3Options {
        &self.options
    }
}

impl ModuleProvider for FileS3Provider {
    fn id(&self) -> &str {
        &self.id
    }

    fn kind(&self) -> &'static str {
        resolve::FILE_S3
    }
}

/// `file-s3` provider factory.
pub struct FileS3Factory;

impl ProviderFactory for FileS3Factory {
    fn resolve_key(&self) -> &'static str {
        resolve::FILE_S3
    }

    fn build(&self, registration: &ProviderRegistration) -> ModuleResult<Box<dyn ModuleProvider>> {
        let options: S3Options = serde_json::from_value(registration.options.clone())
            .map_err(|e| ModuleError::invalid_options(self.resolve_key(), e.to_string()))?;
        Ok(Box::new(FileS3Provider {
            id: registration.id.clone(),
            options,
        }))
    }
}
