//! Image ingestion: size gate and data-URI encoding
//!
//! Encoding runs on a worker thread. The returned [`ImageTask`] remembers
//! which draft it was started for so that a result arriving after the
//! draft was replaced can be recognised and dropped.

use crate::domain::EntryId;
use crate::error::{Result, VaultError};
use crate::infrastructure::config::DEFAULT_MAX_IMAGE_BYTES;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

/// Accepts user-selected image files up to a byte limit
#[derive(Debug, Clone, Copy)]
pub struct ImageIngest {
    max_bytes: u64,
}

impl Default for ImageIngest {
    fn default() -> Self {
        ImageIngest::new(DEFAULT_MAX_IMAGE_BYTES)
    }
}

impl ImageIngest {
    pub fn new(max_bytes: u64) -> Self {
        ImageIngest { max_bytes }
    }

    pub fn max_bytes(&self) -> u64 {
        self.max_bytes
    }

    /// Validate `path` and start encoding it for the draft `draft_id`
    ///
    /// Oversized and unsupported files are rejected here, before any
    /// background work starts.
    pub fn start(&self, path: &Path, draft_id: EntryId) -> Result<ImageTask> {
        let mime = mime_for_path(path)?;
        let size = fs::metadata(path)?.len();

        if size > self.max_bytes {
            return Err(VaultError::ImageTooLarge {
                path: path.to_path_buf(),
                size,
                limit: self.max_bytes,
            });
        }

        tracing::debug!(path = %path.display(), size, draft = %draft_id, "encoding image");

        let cancelled = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&cancelled);
        let source = path.to_path_buf();
        let handle = thread::spawn(move || encode_file(&source, mime, &flag));

        Ok(ImageTask {
            draft_id,
            cancelled,
            handle,
        })
    }
}

/// An encoded image ready to be attached to a draft
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    pub draft_id: EntryId,
    pub data_uri: String,
}

/// Handle to an in-flight encode
#[derive(Debug)]
pub struct ImageTask {
    draft_id: EntryId,
    cancelled: Arc<AtomicBool>,
    handle: JoinHandle<Result<Option<String>>>,
}

impl ImageTask {
    /// Draft this encode was started for
    pub fn draft_id(&self) -> &EntryId {
        &self.draft_id
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Wait for the encode to finish. `Ok(None)` when it was cancelled.
    pub fn wait(self) -> Result<Option<EncodedImage>> {
        let encoded = join_encoder(self.handle)?;

        if self.cancelled.load(Ordering::SeqCst) {
            return Ok(None);
        }

        Ok(encoded.map(|data_uri| EncodedImage {
            draft_id: self.draft_id,
            data_uri,
        }))
    }
}

fn join_encoder(handle: JoinHandle<Result<Option<String>>>) -> Result<Option<String>> {
    handle
        .join()
        .map_err(|_| VaultError::ImageEncoding("encoder thread panicked".to_string()))?
}

fn encode_file(path: &Path, mime: &str, cancelled: &AtomicBool) -> Result<Option<String>> {
    let bytes = fs::read(path)?;
    if cancelled.load(Ordering::SeqCst) {
        return Ok(None);
    }
    Ok(Some(to_data_uri(mime, &bytes)))
}

/// Encode raw bytes as a `data:<mime>;base64,...` URI
pub fn to_data_uri(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

/// MIME type for an image file, from its extension
pub fn mime_for_path(path: &Path) -> Result<&'static str> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "png" => Ok("image/png"),
        "jpg" | "jpeg" => Ok("image/jpeg"),
        "gif" => Ok("image/gif"),
        "webp" => Ok("image/webp"),
        "bmp" => Ok("image/bmp"),
        "svg" => Ok("image/svg+xml"),
        _ => Err(VaultError::UnsupportedImage(format!(
            "{} is not a recognised image file",
            path.display()
        ))),
    }
}
