//! fhir_worklist library: session login and worklist resolution for FHIR
//! servers that only offer a browser login flow
//!
//! The server has no token endpoint; a session is established by replaying
//! the browser sequence (redirect to the login page, form submission, redirect
//! back) and is then carried by cookies. Once authenticated, a worklist (a
//! `List` of `Task` references) is resolved concurrently into the
//! `ServiceRequest`s its tasks point to.
//!
//! # Example
//!
//! ```no_run
//! use fhir_worklist::{resolve_worklist, ClientConfig, Session, WorklistSource};
//! use tokio_util::sync::CancellationToken;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ClientConfig {
//!     base_url: "https://pacs.example.org/fhir".to_string(),
//!     username: "reader".to_string(),
//!     password: "secret".to_string(),
//!     ..Default::default()
//! };
//! let branch_timeout = config.resolve_timeout();
//!
//! let cancel = CancellationToken::new();
//! let mut session = Session::new(config)?;
//! let client = session.authenticate(&cancel).await?;
//!
//! let report =
//!     resolve_worklist(&client, "ql-130738", WorklistSource::List, branch_timeout, &cancel).await?;
//! println!("Found {} service requests", report.service_requests.len());
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

mod app;
pub mod config;
mod error_handling;
mod fetch;
pub mod fhir;
pub mod initialization;
mod parse;
mod run;
mod session;
mod worklist;

// Re-export public API
pub use config::{ClientConfig, Command, LogFormat, LogLevel, Opt};
pub use error_handling::{ClientError, FormError, InitializationError, SkipReason};
pub use fetch::{
    chase_redirect, resolve_location, HttpTransport, RedirectPolicy, RedirectRequest,
    ResourceClient,
};
pub use parse::{extract_form, LoginForm};
pub use run::run;
pub use session::Session;
pub use worklist::{
    fetch_worklist_entries, resolve_worklist, WorklistReport, WorklistResolver, WorklistSource,
};
