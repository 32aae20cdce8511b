//! Config management use case

use crate::error::{Result, VaultError};
use crate::infrastructure::storage::validate_key;
use crate::infrastructure::{Config, FileSystemStore, VaultRepository};

/// Service for managing vault configuration
pub struct ConfigService {
    repository: FileSystemStore,
}

impl ConfigService {
    /// Create a new config service
    pub fn new(repository: FileSystemStore) -> Self {
        ConfigService { repository }
    }

    /// Get a single config value
    pub fn get(&self, key: &str) -> Result<String> {
        let config = self.repository.load_config()?;

        match key {
            "storage_key" => Ok(config.storage_key),
            "max_image_bytes" => Ok(config.max_image_bytes.to_string()),
            "created" => Ok(config.created.to_rfc3339()),
            _ => Err(VaultError::Config(format!(
                "Unknown config key: '{}'. Valid keys are: storage_key, max_image_bytes, created",
                key
            ))),
        }
    }

    /// Set a config value
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut config = self.repository.load_config()?;

        match key {
            "storage_key" => {
                validate_key(value)?;
                config.storage_key = value.to_string();
            }
            "max_image_bytes" => {
                config.max_image_bytes = value.parse().map_err(|_| {
                    VaultError::Config(format!(
                        "Invalid max_image_bytes: '{}'. Expected a whole number of bytes",
                        value
                    ))
                })?;
            }
            "created" => {
                return Err(VaultError::Config(
                    "Cannot modify 'created' field (read-only)".to_string(),
                ));
            }
            _ => {
                return Err(VaultError::Config(format!(
                    "Unknown config key: '{}'. Valid keys are: storage_key, max_image_bytes",
                    key
                )));
            }
        }

        self.repository.save_config(&config)?;
        Ok(())
    }

    /// List all config values
    pub fn list(&self) -> Result<Config> {
        self.repository.load_config()
    }
}
