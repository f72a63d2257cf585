//! Presentation-facing DTOs and display helpers.

pub mod types;
pub mod utils;

pub use types::{preview, DashboardSummary, DashboardView};
pub use utils::format_thousands;
