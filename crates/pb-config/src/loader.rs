//! Configuration loader with file and environment variable support

use crate::{AppConfig, ConfigError};
use std::env;
use std::path::PathBuf;
use tracing::info;

/// Standard config file search paths
const CONFIG_PATHS: &[&str] = &[
    "config.toml",
    "pulseboard.toml",
    "./config/config.toml",
    "/etc/pulseboard/config.toml",
];

/// Backend role ids paired with the env var overriding their canonical role
const CANONICAL_ROLE_VARS: &[(&str, &str)] = &[
    ("admin", "PULSEBOARD_CANONICAL_ADMIN"),
    ("manager", "PULSEBOARD_CANONICAL_MANAGER"),
    ("viewer", "PULSEBOARD_CANONICAL_VIEWER"),
];

/// Configuration loader
pub struct ConfigLoader {
    config_path: Option<PathBuf>,
}

impl ConfigLoader {
    /// Create a new configuration loader
    pub fn new() -> Self {
        Self { config_path: None }
    }

    /// Create a loader with a specific config file path
    pub fn with_path<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            config_path: Some(path.into()),
        }
    }

    /// Load configuration from file (if found) with environment variable overrides
    pub fn load(&self) -> Result<AppConfig, ConfigError> {
        let mut config = AppConfig::default();

        if let Some(path) = self.find_config_file()? {
            info!(?path, "Loading configuration from file");
            config = AppConfig::from_file(&path)?;
        }

        self.apply_env_overrides(&mut config)?;
        config.validate()?;

        Ok(config)
    }

    /// Find the configuration file to use.
    ///
    /// An explicit path that does not exist is an error; search paths are optional.
    fn find_config_file(&self) -> Result<Option<PathBuf>, ConfigError> {
        if let Some(path) = &self.config_path {
            if path.exists() {
                return Ok(Some(path.clone()));
            }
            return Err(ConfigError::ValidationError(format!(
                "config file not found: {}",
                path.display()
            )));
        }

        if let Ok(path) = env::var("PULSEBOARD_CONFIG") {
            let path = PathBuf::from(path);
            if path.exists() {
                return Ok(Some(path));
            }
            return Err(ConfigError::EnvError(format!(
                "PULSEBOARD_CONFIG points to a missing file: {}",
                path.display()
            )));
        }

        Ok(CONFIG_PATHS
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists()))
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&self, config: &mut AppConfig) -> Result<(), ConfigError> {
        for (backend, var) in CANONICAL_ROLE_VARS {
            if let Ok(val) = env::var(var) {
                let val = val.trim();
                if val.is_empty() {
                    return Err(ConfigError::EnvError(format!("{} is set but empty", var)));
                }
                config
                    .access
                    .canonical_roles
                    .insert((*backend).to_string(), val.to_string());
            }
        }

        if let Ok(val) = env::var("PULSEBOARD_DATA_DIR") {
            config.data_dir = val;
        }

        Ok(())
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
