//! Configuration
//!
//! `CatalogConfig` is assembled by [`ConfigLoader`] from built-in defaults, an
//! optional TOML file, and `CATALOG__*` environment variables, in that order of
//! precedence (lowest first).

pub mod loader;
pub mod storage;

pub use loader::ConfigLoader;
pub use storage::{StorageBackend, StorageConfig};

use crate::logging::LoggingConfig;
use crate::tree::mutate::MutationPolicy;
use serde::{Deserialize, Serialize};

fn default_seed() -> bool {
    true
}

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Insert the demo catalog when the store is empty
    #[serde(default = "default_seed")]
    pub seed: bool,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub policy: MutationPolicy,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            storage: StorageConfig::default(),
            logging: LoggingConfig::default(),
            policy: MutationPolicy::default(),
        }
    }
}
