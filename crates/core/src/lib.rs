#![forbid(unsafe_code)]

pub mod catalog;
pub mod error;
pub mod model;
pub mod validation;

pub use catalog::{CatalogBuilder, CatalogError, ContentCatalog, NotFound};
pub use error::Error;
pub use validation::{ConfigError, ConfigRule};
