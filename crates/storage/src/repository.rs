use async_trait::async_trait;
use quiz_core::ContentCatalog;
use std::sync::Arc;
use thiserror::Error;

use crate::document::CatalogDocument;

/// Errors surfaced by catalog sources.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("catalog source not found: {0}")]
    NotFound(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("invalid catalog: {0}")]
    Catalog(#[from] quiz_core::Error),
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::Serialization(err.to_string())
    }
}

/// Source of the static catalog configuration.
///
/// Sources are read once at start-up; the returned catalog is never written
/// back.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Read the raw configuration document.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the document cannot be read or parsed.
    async fn load_document(&self) -> Result<CatalogDocument, StorageError>;

    /// Read the document and build the catalog from it.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Catalog` if the document describes an
    /// inconsistent catalog, or any error from [`CatalogSource::load_document`].
    async fn load(&self) -> Result<ContentCatalog, StorageError> {
        let document = self.load_document().await?;
        let catalog = document.into_catalog()?;
        tracing::info!(
            themes = catalog.themes().count(),
            subthemes = catalog.subthemes().count(),
            questions = catalog.question_count(),
            "catalog loaded"
        );
        Ok(catalog)
    }
}

/// Catalog source holding its document in memory, for tests and embedding.
#[derive(Clone, Default)]
pub struct InMemorySource {
    document: Arc<CatalogDocument>,
}

impl InMemorySource {
    #[must_use]
    pub fn new(document: CatalogDocument) -> Self {
        Self {
            document: Arc::new(document),
        }
    }
}

#[async_trait]
impl CatalogSource for InMemorySource {
    async fn load_document(&self) -> Result<CatalogDocument, StorageError> {
        Ok(self.document.as_ref().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{BandRecord, QuestionRecord, SubthemeRecord, ThemeRecord};
    use quiz_core::model::{DifficultyLevel, ResourceKind, ThemeId};

    fn document() -> CatalogDocument {
        CatalogDocument {
            questions: vec![QuestionRecord {
                id: 1,
                resource_kind: ResourceKind::Interactive,
                location: "apps/1".into(),
            }],
            subthemes: vec![SubthemeRecord {
                id: 5,
                name: "Puzzles".into(),
                levels: None,
                bands: vec![BandRecord {
                    level: DifficultyLevel::Easy,
                    proportion: 100,
                    questions: vec![1],
                }],
            }],
            themes: vec![ThemeRecord {
                id: 2,
                name: "Logic".into(),
                subthemes: vec![5],
            }],
        }
    }

    #[tokio::test]
    async fn in_memory_source_builds_catalog() {
        let source = InMemorySource::new(document());
        let catalog = source.load().await.unwrap();
        assert_eq!(catalog.theme(ThemeId::new(2)).unwrap().subthemes().len(), 1);
        assert_eq!(catalog.question_count(), 1);
    }

    #[tokio::test]
    async fn in_memory_source_surfaces_catalog_errors() {
        let mut doc = document();
        doc.subthemes[0].bands[0].questions.push(7);
        let err = InMemorySource::new(doc).load().await.unwrap_err();
        assert!(matches!(err, StorageError::Catalog(_)));
    }

    #[test]
    fn source_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<InMemorySource>();
    }
}
