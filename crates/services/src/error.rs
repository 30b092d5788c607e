//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::model::{DifficultyLevel, SubthemeId, ThemeId};
use quiz_core::{ConfigError, NotFound};
use storage::StorageError;

/// Errors emitted while assembling a match.
///
/// A failed selection never returns a partial match.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SelectionError {
    #[error("match size must be at least 1")]
    InvalidMatchSize,
    #[error("subtheme {subtheme} is not part of theme {theme}")]
    SubthemeNotInTheme { theme: ThemeId, subtheme: SubthemeId },
    #[error(
        "{level} band of subtheme {subtheme} has {available} questions, {requested} requested"
    )]
    InsufficientQuestions {
        subtheme: SubthemeId,
        level: DifficultyLevel,
        requested: usize,
        available: usize,
    },
    #[error(transparent)]
    NotFound(#[from] NotFound),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors emitted while bootstrapping the service bundle.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizServicesError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}
