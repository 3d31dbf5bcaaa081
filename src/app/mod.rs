//! Main application modules.
//!
//! This module provides output writing, request argument handling, interrupt
//! handling and statistics printing used by the command-line application.

pub mod output;
pub mod request;
pub mod shutdown;
pub mod statistics;

// Re-export public API
pub use output::write_json;
pub use request::{normalize_endpoint, parse_query_params};
pub use shutdown::cancel_on_ctrl_c;
pub use statistics::{print_skip_statistics, print_worklist_summary};
