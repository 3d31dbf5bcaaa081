//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (header values, timeouts, limits)
//! - Library configuration types
//! - CLI option types and parsing

mod cli;
mod constants;
mod types;

// Re-export all constants
pub use cli::{Command, Opt};
pub use constants::*;
pub use types::{ClientConfig, LogFormat, LogLevel};
