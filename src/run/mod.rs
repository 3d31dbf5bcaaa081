//! Command execution.
//!
//! Authenticates once, then performs the requested command on the resulting
//! session. Authentication always completes before any resource is read.

use anyhow::{Context, Result};
use log::{debug, info};
use tokio_util::sync::CancellationToken;

use crate::app::{
    cancel_on_ctrl_c, normalize_endpoint, parse_query_params, print_skip_statistics,
    print_worklist_summary, write_json,
};
use crate::config::{Command, Opt};
use crate::fetch::ResourceClient;
use crate::session::Session;
use crate::worklist::{resolve_worklist, WorklistSource};

/// Runs the command selected on the command line.
///
/// # Errors
///
/// Returns an error if authentication fails, the worklist or endpoint cannot
/// be read, or the output cannot be written. Failures of individual worklist
/// entries are logged and do not fail the run.
pub async fn run(opt: Opt) -> Result<()> {
    let cancel = CancellationToken::new();
    let interrupt = cancel_on_ctrl_c(cancel.clone());

    let result = run_command(&opt, &cancel).await;

    interrupt.abort();
    result
}

async fn run_command(opt: &Opt, cancel: &CancellationToken) -> Result<()> {
    let config = opt.client_config();
    let resolve_timeout = config.resolve_timeout();
    if let Some(client_id) = &config.client_id {
        debug!("Using client id {client_id:?}");
    }

    let mut session = Session::new(config).context("Failed to create session")?;
    info!("Logging in to {}", session.base_url());
    let client = session
        .authenticate(cancel)
        .await
        .context("Login failed")?;
    info!("Client logged in");

    match &opt.command {
        Command::Worklist { list_id, bundle } => {
            let source = if *bundle {
                WorklistSource::Bundle
            } else {
                WorklistSource::List
            };
            let report = resolve_worklist(&client, list_id, source, resolve_timeout, cancel)
                .await
                .with_context(|| format!("Couldn't get worklist {list_id:?}"))?;

            print_worklist_summary(&report);
            print_skip_statistics(&report);
            write_json(&report.service_requests, opt.output.as_deref())
        }
        Command::Request {
            endpoint,
            query_params,
        } => run_request(&client, endpoint, query_params, opt, cancel).await,
    }
}

async fn run_request(
    client: &ResourceClient,
    endpoint: &str,
    query_params: &[String],
    opt: &Opt,
    cancel: &CancellationToken,
) -> Result<()> {
    let endpoint = normalize_endpoint(endpoint);
    let params = parse_query_params(query_params)?;

    let value = client
        .get_value(&endpoint, &params, cancel)
        .await
        .with_context(|| format!("GET {endpoint} failed"))?;
    write_json(&value, opt.output.as_deref())
}
