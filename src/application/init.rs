//! Initialize vault use case

use crate::error::Result;
use crate::infrastructure::{Config, FileSystemStore, KeyValueStore, VaultRepository};
use std::fs;
use std::path::Path;

/// Initialize a new vault at the specified path.
pub fn init(path: &Path) -> Result<Config> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }

    let mut store = FileSystemStore::new(path.to_path_buf());
    store.initialize()?;

    let config = Config::default();
    store.save_config(&config)?;

    // Start with an explicit empty collection so the slot exists on disk
    store.write(&config.storage_key, "[]")?;

    tracing::info!(path = %path.display(), "initialized vault");
    Ok(config)
}
