//! Pulseboard Configuration System
//!
//! TOML-based configuration with environment variable override support.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

mod loader;

pub use loader::ConfigLoader;

/// Backend role ids accepted as `access.canonical_roles` keys
pub const BACKEND_ROLE_IDS: &[&str] = &["admin", "manager", "viewer"];

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),

    #[error("Environment variable error: {0}")]
    EnvError(String),
}

/// Root application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub access: AccessConfig,

    /// Data directory for local storage
    pub data_dir: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            access: AccessConfig::default(),
            data_dir: "./data".to_string(),
        }
    }
}

/// Role resolution settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AccessConfig {
    /// Canonical display role for each persisted backend role.
    /// Keys are backend role ids (admin, manager, viewer), values are role ids.
    pub canonical_roles: BTreeMap<String, String>,
}

impl Default for AccessConfig {
    fn default() -> Self {
        let canonical_roles = [("admin", "admin"), ("manager", "manager"), ("viewer", "viewer")]
            .into_iter()
            .map(|(backend, role)| (backend.to_string(), role.to_string()))
            .collect();

        Self { canonical_roles }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML string
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(content)?;
        Ok(config)
    }

    /// Structural validation. Keys must be known backend role ids; display
    /// role values are checked when the resolver is built.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.access.canonical_roles.is_empty() {
            return Err(ConfigError::ValidationError(
                "access.canonical_roles must not be empty".to_string(),
            ));
        }

        for (backend, role) in &self.access.canonical_roles {
            if backend.trim().is_empty() || role.trim().is_empty() {
                return Err(ConfigError::ValidationError(format!(
                    "access.canonical_roles entry '{}' = '{}' has a blank identifier",
                    backend, role
                )));
            }
            if !BACKEND_ROLE_IDS.contains(&backend.as_str()) {
                return Err(ConfigError::ValidationError(format!(
                    "access.canonical_roles key '{}' is not a backend role (expected one of {})",
                    backend,
                    BACKEND_ROLE_IDS.join(", ")
                )));
            }
        }

        if self.data_dir.trim().is_empty() {
            return Err(ConfigError::ValidationError("data_dir must not be empty".to_string()));
        }

        Ok(())
    }
}
