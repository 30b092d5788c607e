use thiserror::Error;

use crate::catalog::{CatalogError, NotFound};
use crate::model::{BandError, QuestionError};
use crate::validation::ConfigError;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    Band(#[from] BandError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    NotFound(#[from] NotFound),
    #[error(transparent)]
    Config(#[from] ConfigError),
}
