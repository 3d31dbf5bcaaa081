//! Error type definitions.
//!
//! This module defines the failures of the login flow and resource reads, plus
//! the reasons a worklist branch can contribute nothing.

use log::SetLoggerError;
use reqwest::header::{InvalidHeaderName, InvalidHeaderValue};
use reqwest::StatusCode;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] reqwest::Error),
}

/// Failures while extracting the login form from an HTML document.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    /// The document ended before any form was closed.
    #[error("form not found")]
    NotFound,

    /// The first form closed without a usable `action` attribute.
    #[error("form action not found")]
    ActionMissing,
}

/// Errors produced by the login flow and by resource reads.
///
/// None of these are retried. Authentication errors are terminal for the run;
/// resource errors inside worklist resolution only skip the affected entry.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error(transparent)]
    Initialization(#[from] InitializationError),

    #[error("invalid base url {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("invalid header value: {0}")]
    InvalidHeader(#[from] InvalidHeaderValue),

    #[error("invalid header name: {0}")]
    InvalidHeaderName(#[from] InvalidHeaderName),

    #[error("http request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// A redirect probe answered with a status outside the accepted set.
    #[error("expected {} redirect, got {}", join_statuses(.want), .got)]
    UnexpectedStatus { got: StatusCode, want: Vec<StatusCode> },

    #[error("no redirect location")]
    MissingRedirectLocation,

    #[error("login page returned {0}")]
    LoginPageStatus(StatusCode),

    #[error("login form: {0}")]
    Form(#[from] FormError),

    /// The post-login redirect did not land back on the base URL.
    #[error("could not resolve session-based authorization (landed on {final_url})")]
    SessionNotResolved { final_url: String },

    /// The post-login redirect carried an authorization code, which needs a
    /// token exchange this client does not perform.
    #[error("authorization code flow is not supported (landed on {final_url})")]
    AuthorizationCodeUnsupported { final_url: String },

    /// A resource read returned something other than 200.
    #[error("FHIR GET failed: {code} {body}")]
    HttpStatus { code: StatusCode, body: String },

    #[error("failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("request cancelled")]
    Cancelled,
}

impl ClientError {
    /// Returns `true` for errors that mean the login flow ran to completion but
    /// the server did not grant a session.
    pub fn is_session_rejection(&self) -> bool {
        matches!(
            self,
            ClientError::SessionNotResolved { .. }
                | ClientError::AuthorizationCodeUnsupported { .. }
        )
    }
}

fn join_statuses(statuses: &[StatusCode]) -> String {
    statuses
        .iter()
        .map(|s| s.as_u16().to_string())
        .collect::<Vec<_>>()
        .join(" or ")
}

/// Reasons a worklist branch contributed no service request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum SkipReason {
    /// The task read failed.
    TaskFetchFailed,
    /// The task has no input carrying a service request reference.
    MissingServiceRequestReference,
    /// The service request read failed.
    ServiceRequestFetchFailed,
    /// The branch did not finish within its deadline.
    BranchTimeout,
    /// The branch was cancelled by the caller.
    Cancelled,
    /// The branch task panicked.
    BranchPanicked,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl SkipReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkipReason::TaskFetchFailed => "Task fetch failed",
            SkipReason::MissingServiceRequestReference => "Missing service request reference",
            SkipReason::ServiceRequestFetchFailed => "Service request fetch failed",
            SkipReason::BranchTimeout => "Branch timeout",
            SkipReason::Cancelled => "Cancelled",
            SkipReason::BranchPanicked => "Branch panicked",
        }
    }
}
