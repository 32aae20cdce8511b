//! Configuration management

use crate::error::{Result, VaultError};
use crate::infrastructure::storage::{DEFAULT_STORAGE_KEY, VAULT_DIR};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Largest image accepted for attachment (2 MiB)
pub const DEFAULT_MAX_IMAGE_BYTES: u64 = 2 * 1024 * 1024;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Slot the entry collection is persisted under
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
    #[serde(default = "default_max_image_bytes")]
    pub max_image_bytes: u64,
    pub created: DateTime<Utc>,
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

fn default_max_image_bytes() -> u64 {
    DEFAULT_MAX_IMAGE_BYTES
}

impl Default for Config {
    fn default() -> Self {
        Config {
            storage_key: default_storage_key(),
            max_image_bytes: default_max_image_bytes(),
            created: Utc::now(),
        }
    }
}

impl Config {
    /// Load config from .mindvault/config.toml in the given directory
    pub fn load_from_dir(path: &Path) -> Result<Self> {
        let config_path = path.join(VAULT_DIR).join("config.toml");

        let contents = fs::read_to_string(&config_path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                VaultError::NotVaultDirectory(path.to_path_buf())
            } else {
                VaultError::Io(e)
            }
        })?;

        toml::from_str(&contents)
            .map_err(|e| VaultError::Config(format!("Failed to parse config.toml: {}", e)))
    }

    /// Save config to .mindvault/config.toml in the given directory
    pub fn save_to_dir(&self, path: &Path) -> Result<()> {
        let vault_dir = path.join(VAULT_DIR);
        let config_path = vault_dir.join("config.toml");

        if !vault_dir.exists() {
            fs::create_dir(&vault_dir)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| VaultError::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(&config_path, contents)?;

        Ok(())
    }
}
