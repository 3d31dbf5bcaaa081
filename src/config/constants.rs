//! Configuration constants.
//!
//! This module defines the header values, query parameters, timeouts and size
//! limits shared by the login flow and the resource client.

// Network operation timeouts
/// Per-request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
/// Deadline in seconds for one worklist branch (task fetch plus service request fetch)
pub const DEFAULT_RESOLVE_TIMEOUT_SECS: u64 = 60;

/// User-Agent sent with every request, including the login form submission.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0";

// Header values
/// Accept header advertising HTML, sent with the login form submission
pub const ACCEPT_HTML: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";
/// Accept header for resource reads
pub const ACCEPT_FHIR_JSON: &str = "application/fhir+json";
/// Content type of the login form submission
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

// Login form fields
pub const USERNAME_FIELD: &str = "username";
pub const PASSWORD_FIELD: &str = "password";
pub const LOGIN_FIELD: &str = "login";
/// Label of the login page's submit button, sent as the `login` field
pub const LOGIN_SUBMIT_LABEL: &str = "Sign In";

// Resource paths and query parameters
/// Resource path probed to trigger the login redirect
pub const LIST_PATH: &str = "List";
pub const TASK_PATH: &str = "Task";
pub const SERVICE_REQUEST_PATH: &str = "ServiceRequest";
pub const ID_PARAM: &str = "_id";
pub const FORMAT_PARAM: &str = "_format";
pub const JSON_FORMAT: &str = "json";
/// Query parameter marking an authorization-code callback
pub const AUTH_CODE_PARAM: &str = "code";

// Reference prefixes
pub const TASK_REFERENCE_PREFIX: &str = "Task/";
/// Resource type of the bundle entry that carries the worklist
pub const LIST_RESOURCE_TYPE: &str = "List";

// Response size limits
/// Maximum error response body kept for diagnostics (4KB)
pub const MAX_ERROR_BODY_SIZE: usize = 4 * 1024;
