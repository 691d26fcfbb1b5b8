//! Local filesystem implementation of the `ImageStore` trait.
//!
//! Uploads land in a single directory with a uuid-prefixed filename, so two
//! uploads of `front.png` never collide. The returned path is relative to
//! the uploads directory and is what gets persisted on the salon or
//! employee record.

use std::path::{Path, PathBuf};

use salonbook_core::storage::ImageStore;
use salonbook_types::error::RepositoryError;
use uuid::Uuid;

/// Image store writing to a local uploads directory via `tokio::fs`.
pub struct LocalImageStore {
    uploads_dir: PathBuf,
}

impl LocalImageStore {
    pub fn new(uploads_dir: impl Into<PathBuf>) -> Self {
        Self {
            uploads_dir: uploads_dir.into(),
        }
    }

    /// Strip any client-supplied directory components; only the final file
    /// name ever reaches disk.
    fn sanitize(original_name: &str) -> &str {
        Path::new(original_name)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("upload")
    }
}

impl ImageStore for LocalImageStore {
    async fn store(&self, bytes: &[u8], original_name: &str) -> Result<String, RepositoryError> {
        let filename = format!("{}_{}", Uuid::now_v7(), Self::sanitize(original_name));
        let path = self.uploads_dir.join(&filename);

        tokio::fs::create_dir_all(&self.uploads_dir)
            .await
            .map_err(|e| RepositoryError::Query(format!("create uploads dir: {e}")))?;
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| RepositoryError::Query(format!("write image: {e}")))?;

        tracing::debug!(file = %filename, size = bytes.len(), "image stored");
        Ok(filename)
    }
}
