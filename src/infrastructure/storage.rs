//! Durable key-value storage for the vault

use crate::error::{Result, VaultError};
use crate::infrastructure::Config;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the directory that marks a vault root
pub const VAULT_DIR: &str = ".mindvault";

/// Slot holding the serialized entry collection
pub const DEFAULT_STORAGE_KEY: &str = "mindvault_entries";

/// A store of named string slots, each overwritten wholesale on write
pub trait KeyValueStore {
    /// Read a slot. `Ok(None)` when the slot has never been written.
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Replace the slot's content
    fn write(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Abstract repository for vault-level operations
pub trait VaultRepository {
    /// Get the root directory of this vault
    fn root(&self) -> &Path;

    /// Load configuration from .mindvault/config.toml
    fn load_config(&self) -> Result<Config>;

    /// Save configuration to .mindvault/config.toml
    fn save_config(&self, config: &Config) -> Result<()>;

    /// Check if .mindvault directory exists
    fn is_initialized(&self) -> bool;

    /// Create .mindvault directory structure
    fn initialize(&self) -> Result<()>;
}

/// Reject slot names that would escape the vault directory
pub fn validate_key(key: &str) -> Result<()> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');

    if valid {
        Ok(())
    } else {
        Err(VaultError::Storage(format!(
            "Invalid storage key '{}': use letters, digits, '_' or '-'",
            key
        )))
    }
}

/// File system implementation: one `<key>.json` file per slot
#[derive(Debug, Clone)]
pub struct FileSystemStore {
    pub root: PathBuf,
}

impl FileSystemStore {
    /// Create a store rooted at the given vault directory
    pub fn new(root: PathBuf) -> Self {
        FileSystemStore { root }
    }

    /// Discover the vault root by walking up from the current directory
    /// First checks MINDVAULT_ROOT environment variable, then falls back to discovery
    pub fn discover() -> Result<Self> {
        if let Ok(root_path) = std::env::var("MINDVAULT_ROOT") {
            let path = PathBuf::from(root_path);
            if Self::has_vault_dir(&path) {
                return Ok(FileSystemStore::new(path));
            } else {
                return Err(VaultError::Config(format!(
                    "MINDVAULT_ROOT is set to '{}' but no {} directory found. \
                    Run 'mindvault init' in that directory or unset MINDVAULT_ROOT.",
                    path.display(),
                    VAULT_DIR
                )));
            }
        }

        let current_dir = std::env::current_dir()?;
        Self::discover_from(&current_dir)
    }

    /// Discover the vault root by walking up from a specific starting directory
    pub fn discover_from(start: &Path) -> Result<Self> {
        let mut current = start.to_path_buf();

        loop {
            if Self::has_vault_dir(&current) {
                return Ok(FileSystemStore::new(current));
            }

            match current.parent() {
                Some(parent) => current = parent.to_path_buf(),
                None => return Err(VaultError::NotVaultDirectory(start.to_path_buf())),
            }
        }
    }

    fn has_vault_dir(path: &Path) -> bool {
        path.join(VAULT_DIR).is_dir()
    }

    /// Path of the file backing `key`
    pub fn slot_path(&self, key: &str) -> PathBuf {
        self.root.join(VAULT_DIR).join(format!("{}.json", key))
    }
}

impl VaultRepository for FileSystemStore {
    fn root(&self) -> &Path {
        &self.root
    }

    fn load_config(&self) -> Result<Config> {
        Config::load_from_dir(&self.root)
    }

    fn save_config(&self, config: &Config) -> Result<()> {
        config.save_to_dir(&self.root)
    }

    fn is_initialized(&self) -> bool {
        Self::has_vault_dir(&self.root)
    }

    fn initialize(&self) -> Result<()> {
        let vault_dir = self.root.join(VAULT_DIR);

        if vault_dir.exists() {
            return Err(VaultError::Config(format!(
                "Directory already initialized: {}",
                self.root.display()
            )));
        }

        fs::create_dir(&vault_dir)?;
        Ok(())
    }
}

impl KeyValueStore for FileSystemStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        validate_key(key)?;
        let path = self.slot_path(key);

        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(VaultError::Io(e)),
        }
    }

    /// Best-effort atomic replace: write a temp file next to the slot, then
    /// rename it into place.
    ///
    /// On Windows, `rename` does not overwrite existing files, so the
    /// destination is removed first.
    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        validate_key(key)?;
        let path = self.slot_path(key);

        if let Some(parent) = path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let tmp_path = path.with_file_name(format!(
            "{}.json.mindvault-tmp-{}",
            key,
            std::process::id()
        ));

        if let Err(e) = fs::write(&tmp_path, value).and_then(|_| replace_file(&tmp_path, &path)) {
            if tmp_path.exists() {
                if let Err(cleanup) = fs::remove_file(&tmp_path) {
                    tracing::warn!(path = %tmp_path.display(), error = %cleanup, "could not remove temp file");
                }
            }
            return Err(VaultError::Io(e));
        }
        Ok(())
    }
}

fn replace_file(from: &Path, to: &Path) -> std::io::Result<()> {
    #[cfg(windows)]
    {
        if to.exists() {
            fs::remove_file(to)?;
        }
    }

    fs::rename(from, to)
}

/// In-process store, for tests and embedders without a vault directory
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slots: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate a slot
    pub fn with_slot(mut self, key: &str, value: &str) -> Self {
        self.slots.insert(key.to_string(), value.to_string());
        self
    }

    /// Raw slot content
    pub fn slot(&self, key: &str) -> Option<&str> {
        self.slots.get(key).map(|s| s.as_str())
    }
}

impl KeyValueStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.slots.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        self.slots.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
