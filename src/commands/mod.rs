//! CLI command implementations.
//!
//! Commands orchestrate the library components to perform user tasks.

pub mod models;
pub mod report;
pub mod utils;

// Re-export main command functions
pub use models::{ReportArgs, ReportFormat};
pub use report::{build_reporter, execute_report, parse_alias};
pub use utils::display_modules;
