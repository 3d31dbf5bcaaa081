//! HTML parsing.
//!
//! Extracts the login form (submission target and input fields) from the
//! identity provider's login page.

mod form;

// Re-export public API
pub use form::{extract_form, LoginForm};
