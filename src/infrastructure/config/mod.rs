use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use std::path::{Path, PathBuf};

use crate::domain::deck_config::AppConfig;
use crate::domain::error::{AppError, Result};

pub const DEFAULT_CONFIG_FILE: &str = "Flashcards.toml";
pub const CONFIG_PATH_VAR: &str = "FLASHCARDS_CONFIG";
pub const ENV_PREFIX: &str = "FLASHCARDS_";

pub struct ConfigService {
    path: PathBuf,
}

impl ConfigService {
    /// Config file from `FLASHCARDS_CONFIG`, else `Flashcards.toml` in the working directory
    pub fn new() -> Self {
        let path = std::env::var_os(CONFIG_PATH_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
        Self::with_path(path)
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Defaults, then the TOML file if present, then `FLASHCARDS_*` variables.
    /// Nested keys use a double underscore: `FLASHCARDS_MERGE__RANGE_END=10`.
    pub fn figment(&self) -> Figment {
        Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Toml::file(&self.path))
            .merge(Env::prefixed(ENV_PREFIX).ignore(&["CONFIG"]).split("__"))
    }

    pub fn load(&self) -> Result<AppConfig> {
        let config: AppConfig = self.figment().extract()?;
        config
            .validate()
            .map_err(|e| AppError::ConfigError(format!("Invalid configuration: {}", e)))?;
        Ok(config)
    }
}

impl Default for ConfigService {
    fn default() -> Self {
        Self::new()
    }
}
