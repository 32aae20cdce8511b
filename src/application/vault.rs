//! An opened vault: session and image ingestion configured from the vault

use crate::application::{EditorSession, EntryStore};
use crate::error::Result;
use crate::infrastructure::{FileSystemStore, ImageIngest, VaultRepository};

pub struct Vault {
    pub session: EditorSession<FileSystemStore>,
    pub images: ImageIngest,
}

impl Vault {
    /// Load config and entries from a vault root
    pub fn open(repository: FileSystemStore) -> Result<Self> {
        let config = repository.load_config()?;
        let images = ImageIngest::new(config.max_image_bytes);
        let store = EntryStore::load(repository, config.storage_key);

        Ok(Vault {
            session: EditorSession::new(store),
            images,
        })
    }

    /// Discover the vault from the environment and open it
    pub fn discover() -> Result<Self> {
        Self::open(FileSystemStore::discover()?)
    }
}
