use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;
use tracing::{debug, info, instrument, warn};

use crate::config::ServerConfig;
use crate::room::DocumentRef;

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Error preparing upload folder: {0}")]
    Prepare(#[source] std::io::Error),

    #[error("Error clearing upload folder: {0}")]
    Clear(#[source] std::io::Error),

    #[error("Error writing document: {0}")]
    Write(#[source] std::io::Error),
}

/// Owns the on-disk location of the single shared document
#[derive(Debug, Clone)]
pub struct DocumentStore {
    upload_dir: PathBuf,
    file_name: String,
    public_url: String,
}

impl DocumentStore {
    pub fn new(
        upload_dir: impl Into<PathBuf>,
        file_name: impl Into<String>,
        public_url: impl Into<String>,
    ) -> Self {
        Self {
            upload_dir: upload_dir.into(),
            file_name: file_name.into(),
            public_url: public_url.into(),
        }
    }

    pub fn from_config(config: &ServerConfig) -> Self {
        Self::new(
            config.upload_dir.clone(),
            config.document_file_name.clone(),
            config.document_url(),
        )
    }

    pub fn upload_dir(&self) -> &Path {
        &self.upload_dir
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn document_path(&self) -> PathBuf {
        self.upload_dir.join(&self.file_name)
    }

    /// Creates the upload directory if it is missing
    pub async fn prepare(&self) -> Result<(), UploadError> {
        fs::create_dir_all(&self.upload_dir)
            .await
            .map_err(UploadError::Prepare)
    }

    /// Path the next document is written to before it replaces the current one
    pub fn staging_path(&self) -> PathBuf {
        self.upload_dir.join(format!("{}.part", self.file_name))
    }

    /// Deletes every file in the upload directory except the current document
    #[instrument(skip(self), fields(upload_dir = %self.upload_dir.display()))]
    pub async fn clear(&self) -> Result<usize, UploadError> {
        let mut entries = fs::read_dir(&self.upload_dir)
            .await
            .map_err(UploadError::Clear)?;
        let mut removed = 0;

        while let Some(entry) = entries.next_entry().await.map_err(UploadError::Clear)? {
            let file_type = entry.file_type().await.map_err(UploadError::Clear)?;
            if file_type.is_dir() || entry.file_name().to_str() == Some(self.file_name.as_str()) {
                continue;
            }
            fs::remove_file(entry.path())
                .await
                .map_err(UploadError::Clear)?;
            removed += 1;
        }

        debug!(removed = removed, "Upload folder cleared");
        Ok(removed)
    }

    /// Replaces the shared document. The new file is written next to the
    /// current one and renamed over it, so the document path always holds a
    /// complete file. Leftover files are removed afterwards.
    #[instrument(skip(self, contents), fields(bytes = contents.len()))]
    pub async fn store(&self, contents: &[u8]) -> Result<DocumentRef, UploadError> {
        self.prepare().await?;

        let staging = self.staging_path();
        if let Err(e) = fs::write(&staging, contents).await {
            let _ = fs::remove_file(&staging).await;
            return Err(UploadError::Write(e));
        }

        let path = self.document_path();
        fs::rename(&staging, &path)
            .await
            .map_err(UploadError::Write)?;
        info!(path = %path.display(), "Document stored");

        if let Err(e) = self.clear().await {
            warn!(error = %e, "Stale uploads left in place");
        }

        Ok(DocumentRef::new(self.public_url.clone()))
    }
}
