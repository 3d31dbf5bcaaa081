//! Command-line options.
//!
//! Every connection setting falls back to an environment variable so that
//! credentials can live in a `.env` file instead of the shell history.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::constants::{
    DEFAULT_RESOLVE_TIMEOUT_SECS, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT,
};
use crate::config::types::{ClientConfig, LogFormat, LogLevel};

/// Command-line options and configuration.
///
/// # Examples
///
/// ```bash
/// # Resolve a worklist into service requests
/// fhir_worklist --url https://pacs.example.org/fhir -u reader -p secret worklist ql-130738
///
/// # Read one resource, saving the JSON to a file
/// fhir_worklist request task/123 -q _format=json -o out/task.json
/// ```
#[derive(Debug, Parser)]
#[command(
    name = "fhir_worklist",
    about = "Get resources from a FHIR server that uses a browser login flow."
)]
pub struct Opt {
    /// Base URL of the FHIR endpoint
    #[arg(long, env = "FHIR_URL")]
    pub url: String,

    /// Username for session-based login
    #[arg(short, long, env = "FHIR_USER", default_value = "")]
    pub username: String,

    /// Password for session-based login
    #[arg(short, long, env = "FHIR_PASS", default_value = "", hide_env_values = true)]
    pub password: String,

    /// Client id for session-based login
    #[arg(long, env = "FHIR_CLIENT")]
    pub client_id: Option<String>,

    /// List id used to seed the initial login probe
    #[arg(long)]
    pub redirect_list_id: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_seconds: u64,

    /// Deadline in seconds for each worklist entry
    #[arg(long, default_value_t = DEFAULT_RESOLVE_TIMEOUT_SECS)]
    pub resolve_timeout_seconds: u64,

    /// Verify server TLS certificates
    #[arg(long)]
    pub verify_tls: bool,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,

    /// File path to save results to (JSON); defaults to stdout
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Resolve a worklist into the service requests its tasks point to
    Worklist {
        /// Id of the worklist (List resource)
        list_id: String,

        /// Search `List?_id=` and take the list from the returned bundle
        #[arg(long)]
        bundle: bool,
    },
    /// GET an arbitrary endpoint, e.g. `task/123`
    Request {
        endpoint: String,

        /// Query parameter (key=value), repeatable
        #[arg(short = 'q', long = "query-param")]
        query_params: Vec<String>,
    },
}

impl Opt {
    /// Builds the library configuration from the parsed options.
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.url.clone(),
            username: self.username.clone(),
            password: self.password.clone(),
            client_id: self.client_id.clone(),
            redirect_list_id: self.redirect_list_id.clone(),
            timeout_seconds: self.timeout_seconds,
            resolve_timeout_seconds: self.resolve_timeout_seconds,
            verify_tls: self.verify_tls,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}
