use std::sync::Arc;

use quiz_core::validation::validate_catalog;
use quiz_core::{ConfigError, ContentCatalog};
use storage::CatalogSource;

use crate::Entropy;
use crate::error::QuizServicesError;
use crate::matches::MatchService;

/// Loads the catalog once and assembles the services that read it.
///
/// Nothing can select a match before this bundle exists, so the catalog is
/// always fully built by the time requests are served.
#[derive(Clone)]
pub struct QuizServices {
    catalog: Arc<ContentCatalog>,
    config_errors: Arc<[ConfigError]>,
    matches: Arc<MatchService>,
}

impl QuizServices {
    /// Load the catalog from `source` and build the services.
    ///
    /// Subthemes failing validation are logged and kept; selecting from them
    /// fails until their configuration is fixed.
    ///
    /// # Errors
    ///
    /// Returns `QuizServicesError::Storage` if the catalog cannot be loaded.
    pub async fn bootstrap(
        source: &dyn CatalogSource,
        entropy: Entropy,
    ) -> Result<Self, QuizServicesError> {
        let catalog = source.load().await?;
        Ok(Self::from_catalog(catalog, entropy))
    }

    #[must_use]
    pub fn from_catalog(catalog: ContentCatalog, entropy: Entropy) -> Self {
        let config_errors = validate_catalog(&catalog);
        for err in &config_errors {
            tracing::warn!(subtheme = %err.subtheme, %err, "subtheme cannot be selected");
        }
        tracing::info!(
            questions = catalog.question_count(),
            invalid_subthemes = config_errors.len(),
            seeded = entropy.is_seeded(),
            "quiz services ready"
        );

        let catalog = Arc::new(catalog);
        let matches = Arc::new(MatchService::new(Arc::clone(&catalog), entropy));
        Self {
            catalog,
            config_errors: config_errors.into(),
            matches,
        }
    }

    #[must_use]
    pub fn catalog(&self) -> Arc<ContentCatalog> {
        Arc::clone(&self.catalog)
    }

    /// Validation failures found at load time, ordered by subtheme id.
    #[must_use]
    pub fn config_errors(&self) -> &[ConfigError] {
        &self.config_errors
    }

    #[must_use]
    pub fn matches(&self) -> Arc<MatchService> {
        Arc::clone(&self.matches)
    }
}
