//! Configuration loader for YAML files
//!
//! Parses the configuration file, applies serde defaults, and validates the
//! result before handing it to the caller. A missing file is not fatal: the
//! CLI falls back to built-in defaults so the tools remain usable with
//! nothing but environment variables.

use std::path::Path;

use tokio::fs;

use crate::config::types::ToolkitConfig;
use crate::errors::ToolkitError;

/// Configuration loader with validation on every entry point.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a YAML file.
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<ToolkitConfig, ToolkitError> {
        let path = path.as_ref();

        let content = fs::read_to_string(path).await.map_err(|e| {
            ToolkitError::ConfigError(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;

        Self::from_str(&content)
    }

    /// Load configuration from a YAML string.
    pub fn from_str(content: &str) -> Result<ToolkitConfig, ToolkitError> {
        let config: ToolkitConfig = serde_yaml::from_str(content)
            .map_err(|e| ToolkitError::ConfigError(format!("Failed to parse YAML config: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    /// Load from a file if it exists, otherwise fall back to defaults.
    pub async fn load_or_default<P: AsRef<Path>>(path: P) -> Result<ToolkitConfig, ToolkitError> {
        let path = path.as_ref();
        if path.exists() {
            Self::from_file(path).await
        } else {
            log::warn!(
                "Config file {} not found, using built-in defaults",
                path.display()
            );
            Ok(ToolkitConfig::default())
        }
    }
}
