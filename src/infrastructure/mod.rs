//! Infrastructure layer - External I/O and persistence

pub mod config;
pub mod image;
pub mod prompt;
pub mod storage;

pub use config::Config;
pub use image::{EncodedImage, ImageIngest, ImageTask};
pub use prompt::{AssumeYes, Confirm, LinePrompt};
pub use storage::{FileSystemStore, KeyValueStore, MemoryStore, VaultRepository};
