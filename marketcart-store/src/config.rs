//! Configuration management.

use marketcart_core::DEFAULT_STORAGE_KEY;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::StoreError;
use crate::persistence::{default_config_path, default_storage_path, load_json, save_json};

/// Cart configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartConfig {
    /// Key the cart snapshot is stored under.
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
    /// Storage file location. Platform data dir when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_path: Option<PathBuf>,
    /// Log filter used when no verbosity flag is given.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            storage_key: default_storage_key(),
            storage_path: None,
            log_level: default_log_level(),
        }
    }
}

impl CartConfig {
    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        default_config_path()
    }

    /// Loads configuration from a specific path.
    ///
    /// A missing file yields the defaults; an unparsable one is an error.
    pub async fn load_from(path: &Path) -> Result<Self, StoreError> {
        if !path.exists() {
            debug!(path = %path.display(), "Config file not found, using defaults");
            return Ok(Self::default());
        }

        let config: CartConfig = load_json(path)
            .await
            .map_err(|e| StoreError::Config(format!("{}: {e}", path.display())))?;
        if config.storage_key.is_empty() {
            return Err(StoreError::Config("storage_key must not be empty".to_string()));
        }

        info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Saves configuration to a specific path.
    pub async fn save_to(&self, path: &Path) -> Result<(), StoreError> {
        save_json(path, self).await?;
        info!(path = %path.display(), "Saved configuration");
        Ok(())
    }

    /// Returns the storage file path, falling back to the platform default.
    pub fn resolved_storage_path(&self) -> PathBuf {
        self.storage_path
            .clone()
            .unwrap_or_else(default_storage_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = CartConfig::default();
        assert_eq!(config.storage_key, "@Marketplace:products");
        assert!(config.storage_path.is_none());
        assert_eq!(config.log_level, "warn");
        assert!(config.resolved_storage_path().ends_with("storage.json"));
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config: CartConfig = serde_json::from_str(r#"{"log_level":"debug"}"#).unwrap();
        assert_eq!(config.storage_key, DEFAULT_STORAGE_KEY);
        assert_eq!(config.log_level, "debug");
    }

    #[tokio::test]
    async fn test_missing_file_is_default() {
        let dir = TempDir::new().unwrap();
        let config = CartConfig::load_from(&dir.path().join("config.json"))
            .await
            .unwrap();
        assert_eq!(config, CartConfig::default());
    }

    #[tokio::test]
    async fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        let config = CartConfig {
            storage_key: "@Test:cart".to_string(),
            storage_path: Some(dir.path().join("cart.json")),
            log_level: "info".to_string(),
        };

        config.save_to(&path).await.unwrap();
        let loaded = CartConfig::load_from(&path).await.unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.resolved_storage_path(), dir.path().join("cart.json"));
    }

    #[tokio::test]
    async fn test_invalid_file_is_config_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        tokio::fs::write(&path, "{oops").await.unwrap();

        let result = CartConfig::load_from(&path).await;
        assert!(matches!(result, Err(StoreError::Config(_))));
    }

    #[tokio::test]
    async fn test_empty_key_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        tokio::fs::write(&path, r#"{"storage_key":""}"#).await.unwrap();

        assert!(CartConfig::load_from(&path).await.is_err());
    }
}
