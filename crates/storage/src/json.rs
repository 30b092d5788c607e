use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::document::CatalogDocument;
use crate::repository::{CatalogSource, StorageError};

/// Catalog source backed by a single JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write `document` as pretty-printed JSON, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if serialization or any filesystem step fails.
    pub async fn write_document(&self, document: &CatalogDocument) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        let raw = serde_json::to_vec_pretty(document)?;
        tokio::fs::write(&self.path, raw).await?;
        Ok(())
    }
}

#[async_trait]
impl CatalogSource for JsonFileSource {
    async fn load_document(&self) -> Result<CatalogDocument, StorageError> {
        let raw = match tokio::fs::read(&self.path).await {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                return Err(StorageError::NotFound(self.path.display().to_string()));
            }
            Err(err) => return Err(err.into()),
        };
        tracing::debug!(path = %self.path.display(), bytes = raw.len(), "read catalog file");
        Ok(serde_json::from_slice(&raw)?)
    }
}
