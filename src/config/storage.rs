//! Storage backend selection and path resolution.

use crate::error::CatalogError;
use crate::store::{CategoryStore, MemoryCategoryStore, SledCategoryStore};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Persistent sled database
    #[default]
    Sled,
    /// Process-local, discarded on exit
    Memory,
}

/// Storage configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,

    /// Database directory; `None` uses the platform data directory
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl StorageConfig {
    /// Resolve the database directory for the sled backend.
    pub fn resolve_path(&self) -> Result<PathBuf, CatalogError> {
        if let Some(path) = &self.path {
            if !path.as_os_str().is_empty() {
                return Ok(path.clone());
            }
        }
        let project_dirs = directories::ProjectDirs::from("", "", "catalog").ok_or_else(|| {
            CatalogError::ConfigError(
                "Could not determine platform data directory for the store".to_string(),
            )
        })?;
        Ok(project_dirs.data_dir().join("store"))
    }

    /// Open the configured store.
    pub fn open_store(&self) -> Result<Arc<dyn CategoryStore>, CatalogError> {
        match self.backend {
            StorageBackend::Memory => Ok(Arc::new(MemoryCategoryStore::new())),
            StorageBackend::Sled => {
                let path = self.resolve_path()?;
                tracing::debug!(path = %path.display(), "opening sled store");
                Ok(Arc::new(SledCategoryStore::open(&path)?))
            }
        }
    }
}
