mod allocation;
mod selection;
mod service;

// Public API of the match subsystem.
pub use crate::error::SelectionError;
pub use allocation::{Allocation, BandAllocation, allocate};
pub use selection::{MatchRequest, MatchSelection, SelectedQuestion};
pub use service::MatchService;
