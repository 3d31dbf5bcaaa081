//! Configuration types.
//!
//! This module defines the logging enums used by the CLI and the library
//! configuration consumed by the session and worklist layers.

use std::time::Duration;

use clap::ValueEnum;
use url::Url;

use crate::config::constants::{
    DEFAULT_RESOLVE_TIMEOUT_SECS, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT,
};
use crate::error_handling::ClientError;

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: One JSON object per line for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Library configuration for a client session (no CLI dependencies).
///
/// # Examples
///
/// ```no_run
/// use fhir_worklist::ClientConfig;
///
/// let config = ClientConfig {
///     base_url: "https://pacs.example.org/fhir".to_string(),
///     username: "reader".to_string(),
///     password: "secret".to_string(),
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Absolute base URL of the FHIR endpoint
    pub base_url: String,

    /// Login username
    pub username: String,

    /// Login password
    pub password: String,

    /// Client id registered with the login realm (informational)
    pub client_id: Option<String>,

    /// List id appended as `_id` to the initial probe
    pub redirect_list_id: Option<String>,

    /// Per-request timeout in seconds
    pub timeout_seconds: u64,

    /// Deadline in seconds for each worklist branch
    pub resolve_timeout_seconds: u64,

    /// Verify server TLS certificates
    pub verify_tls: bool,

    /// HTTP User-Agent header value
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            username: String::new(),
            password: String::new(),
            client_id: None,
            redirect_list_id: None,
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
            resolve_timeout_seconds: DEFAULT_RESOLVE_TIMEOUT_SECS,
            // Deployments behind this login flow commonly run self-signed certificates
            verify_tls: false,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl ClientConfig {
    /// Parses and normalizes the base URL.
    ///
    /// Trailing slashes are trimmed before parsing so that paths join cleanly.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::InvalidBaseUrl` if the URL is not an absolute
    /// `http` or `https` URL.
    pub fn validate(&self) -> Result<Url, ClientError> {
        let trimmed = self.base_url.trim().trim_end_matches('/');
        let invalid = |reason: String| ClientError::InvalidBaseUrl {
            url: self.base_url.clone(),
            reason,
        };

        let url = Url::parse(trimmed).map_err(|e| invalid(e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid(format!("unsupported scheme {:?}", url.scheme())));
        }
        if url.host_str().is_none() {
            return Err(invalid("missing host".to_string()));
        }
        Ok(url)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    pub fn resolve_timeout(&self) -> Duration {
        Duration::from_secs(self.resolve_timeout_seconds)
    }
}
