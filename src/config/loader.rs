//! ConfigLoader: layers defaults, a TOML file, and the environment.

use super::CatalogConfig;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File, FileFormat};
use std::path::{Path, PathBuf};

/// Environment prefix; nested keys use `__`, e.g. `CATALOG__STORAGE__BACKEND`.
pub const ENV_PREFIX: &str = "CATALOG";

/// Configuration loader.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Platform config file (`<config_dir>/catalog/config.toml`), if resolvable.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "catalog")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Load configuration.
    ///
    /// An explicit `path` must exist. Without one, the platform config file is
    /// read when present.
    pub fn load(path: Option<&Path>) -> Result<CatalogConfig, ConfigError> {
        let builder = Self::builder_with_defaults()?;
        let builder = match path {
            Some(path) => builder.add_source(File::from(path).format(FileFormat::Toml)),
            None => match Self::default_config_path() {
                Some(default) => builder.add_source(
                    File::from(default)
                        .format(FileFormat::Toml)
                        .required(false),
                ),
                None => builder,
            },
        };
        let builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        );

        builder.build()?.try_deserialize()
    }

    fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("storage.backend", "sled")?
            .set_default("seed", true)?
            .set_default("policy.reject_hybrid_containers", false)?
            .set_default("policy.reject_duplicate_ids", false)
    }
}
