//! Error types for mindvault

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the mindvault application
#[derive(Debug, Error)]
pub enum VaultError {
    #[error("Not a mindvault directory: {0}")]
    NotVaultDirectory(PathBuf),

    #[error("Entry not found: {0}")]
    EntryNotFound(String),

    #[error("Image too large: {} is {size} bytes (limit {limit} bytes)", .path.display())]
    ImageTooLarge {
        path: PathBuf,
        size: u64,
        limit: u64,
    },

    #[error("Unsupported image: {0}")]
    UnsupportedImage(String),

    #[error("Image encoding failed: {0}")]
    ImageEncoding(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl VaultError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            VaultError::NotVaultDirectory(_) => 2,
            VaultError::EntryNotFound(_) => 3,
            VaultError::ImageTooLarge { .. } => 4,
            _ => 1,
        }
    }

    /// Get a user-friendly error message with suggestions
    pub fn display_with_suggestions(&self) -> String {
        match self {
            VaultError::NotVaultDirectory(path) => {
                format!(
                    "Not a mindvault directory: {}\n\n\
                    Suggestions:\n\
                    • Run 'mindvault init' in this directory to create a new vault\n\
                    • Navigate to an existing vault directory\n\
                    • Set MINDVAULT_ROOT environment variable to your vault path",
                    path.display()
                )
            }
            VaultError::EntryNotFound(id) => {
                format!(
                    "Entry not found: '{}'\n\n\
                    Suggestions:\n\
                    • Use 'mindvault list' to see entry ids\n\
                    • Use 'mindvault list --search <text>' to find an entry by title or content",
                    id
                )
            }
            VaultError::ImageTooLarge { path, size, limit } => {
                format!(
                    "Image too large: {} ({} bytes)\n\n\
                    Images must be at most {} bytes ({:.1} MiB).\n\
                    The entry was not changed.",
                    path.display(),
                    size,
                    limit,
                    *limit as f64 / (1024.0 * 1024.0)
                )
            }
            VaultError::UnsupportedImage(msg) => {
                format!(
                    "Unsupported image: {}\n\n\
                    Supported formats: png, jpg, jpeg, gif, webp, bmp, svg",
                    msg
                )
            }
            VaultError::ImageEncoding(msg) => {
                format!(
                    "Image encoding failed: {}\n\n\
                    The entry was not changed. Try attaching the image again.",
                    msg
                )
            }
            VaultError::Config(msg) => {
                if msg.contains("Invalid mood") {
                    format!(
                        "{}\n\n\
                        Valid moods: radiant, happy, neutral, down, gloomy\n\
                        Example: mindvault new --title 'Walk' --mood happy",
                        msg
                    )
                } else {
                    msg.clone()
                }
            }
            _ => self.to_string(),
        }
    }
}

/// Result type using VaultError
pub type Result<T> = std::result::Result<T, VaultError>;
