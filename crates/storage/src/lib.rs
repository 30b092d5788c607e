pub mod document;
pub mod json;
pub mod repository;

pub use document::CatalogDocument;
pub use json::JsonFileSource;
pub use repository::{CatalogSource, InMemorySource, StorageError};
