#![forbid(unsafe_code)]

pub mod app_services;
pub mod entropy;
pub mod error;
pub mod matches;

pub use app_services::QuizServices;
pub use entropy::Entropy;
pub use error::{QuizServicesError, SelectionError};
pub use matches::{MatchRequest, MatchSelection, MatchService, SelectedQuestion};
