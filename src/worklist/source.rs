//! Worklist retrieval.

use std::time::Duration;

use log::debug;
use tokio_util::sync::CancellationToken;

use crate::error_handling::ClientError;
use crate::fetch::ResourceClient;
use crate::fhir::ListEntry;
use crate::worklist::{WorklistReport, WorklistResolver};

/// How the worklist itself is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WorklistSource {
    /// Direct read of `List/{id}`.
    #[default]
    List,
    /// Search `List?_id={id}`; entries come from the first `List` in the bundle.
    Bundle,
}

/// Reads the worklist and returns its entries.
pub async fn fetch_worklist_entries(
    client: &ResourceClient,
    list_id: &str,
    source: WorklistSource,
    cancel: &CancellationToken,
) -> Result<Vec<ListEntry>, ClientError> {
    let entries = match source {
        WorklistSource::List => client.fetch_list_by_id(list_id, cancel).await?.entry,
        WorklistSource::Bundle => {
            let bundle = client.fetch_bundle_by_id(list_id, cancel).await?;
            debug!("Worklist bundle: {bundle}");
            bundle.entries().to_vec()
        }
    };
    debug!("Worklist {list_id:?} has {} entries", entries.len());
    Ok(entries)
}

/// Reads a worklist and resolves it into service requests.
///
/// # Errors
///
/// Only the worklist read itself can fail; per-entry failures are reported in
/// the returned `WorklistReport`.
pub async fn resolve_worklist(
    client: &ResourceClient,
    list_id: &str,
    source: WorklistSource,
    branch_timeout: Duration,
    cancel: &CancellationToken,
) -> Result<WorklistReport, ClientError> {
    let entries = fetch_worklist_entries(client, list_id, source, cancel).await?;
    let resolver = WorklistResolver::new(client.clone(), branch_timeout);
    Ok(resolver.resolve(&entries, cancel).await)
}
