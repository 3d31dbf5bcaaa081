//! Error handling and resolution statistics.
//!
//! This module provides:
//! - Error type definitions for the login flow and resource reads
//! - Categorization of failed worklist branches
//! - Thread-safe skip counters shared across branches

mod categorization;
mod stats;
mod types;

// Re-export public API
pub use categorization::{categorize_branch_error, BranchStage};
pub use stats::ResolutionStats;
pub use types::{ClientError, FormError, InitializationError, SkipReason};
