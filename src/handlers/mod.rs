// Handler modules
pub mod analyze;
pub mod list;

// Re-export all handler functions
pub use analyze::{AnalyzeOptions, build_config, handle_analyze};
pub use list::handle_list;
