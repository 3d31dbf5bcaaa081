//! Application initialization and resource setup.
//!
//! This module provides functions to initialize shared resources:
//! - Logger
//! - HTTP transport (cookie jar plus redirect-following and manual-redirect clients)

mod client;
mod logger;

// Re-export public API
pub use client::{init_client, init_redirect_client, init_transport};
pub use logger::init_logger_with;
