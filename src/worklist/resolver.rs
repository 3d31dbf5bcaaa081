//! Concurrent task → service request resolution.
//!
//! Every `Task/` entry of a worklist becomes its own spawned branch: fetch the
//! task, follow its first input to a service request, fetch that. Branches
//! are unbounded, independent and unordered. A failing, slow or panicking
//! branch is counted and logged, never propagated.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use futures::stream::{FuturesUnordered, StreamExt};
use log::{debug, info, warn};
use tokio_util::sync::CancellationToken;

use crate::error_handling::{categorize_branch_error, BranchStage, ResolutionStats, SkipReason};
use crate::fetch::ResourceClient;
use crate::fhir::{ListEntry, ServiceRequest};

/// Outcome of one resolution run.
#[derive(Debug, Clone, Default)]
pub struct WorklistReport {
    /// Resolved service requests, in completion order.
    pub service_requests: Vec<ServiceRequest>,
    /// Number of branches started (task entries in the worklist).
    pub attempted: usize,
    /// Branches that contributed nothing, by reason. Zero counts are omitted.
    pub skipped: HashMap<SkipReason, usize>,
    pub elapsed: Duration,
}

impl WorklistReport {
    pub fn skipped_total(&self) -> usize {
        self.skipped.values().sum()
    }
}

/// Resolves worklist entries into service requests over an authenticated client.
#[derive(Debug, Clone)]
pub struct WorklistResolver {
    client: ResourceClient,
    branch_timeout: Duration,
}

impl WorklistResolver {
    /// `branch_timeout` bounds each branch (both of its reads together).
    pub fn new(client: ResourceClient, branch_timeout: Duration) -> Self {
        Self {
            client,
            branch_timeout,
        }
    }

    /// Resolves every task entry concurrently and returns once all branches
    /// have finished.
    ///
    /// Non-task entries are ignored. The result may be shorter than the number
    /// of task entries; it is never longer.
    pub async fn resolve(&self, entries: &[ListEntry], cancel: &CancellationToken) -> WorklistReport {
        let start = Instant::now();
        let stats = ResolutionStats::new();
        let mut branches = FuturesUnordered::new();

        for task_id in entries.iter().filter_map(|e| e.item.task_id()) {
            let client = self.client.clone();
            let task_id = task_id.to_string();
            let branch_timeout = self.branch_timeout;
            let cancel = cancel.clone();

            branches.push(tokio::spawn(async move {
                match tokio::time::timeout(branch_timeout, resolve_branch(&client, &task_id, &cancel))
                    .await
                {
                    Ok(outcome) => outcome,
                    Err(_) => {
                        warn!(
                            "Task {task_id:?} not resolved within {}s, skipping",
                            branch_timeout.as_secs_f64()
                        );
                        Err(SkipReason::BranchTimeout)
                    }
                }
            }));
        }

        let attempted = branches.len();
        debug!("Resolving {attempted} task entries of {}", entries.len());

        let mut service_requests = Vec::with_capacity(attempted);
        while let Some(joined) = branches.next().await {
            match joined {
                Ok(Ok(service_request)) => service_requests.push(service_request),
                Ok(Err(reason)) => stats.increment(reason),
                Err(join_error) => {
                    warn!("Worklist branch panicked: {join_error:?}");
                    stats.increment(SkipReason::BranchPanicked);
                }
            }
        }

        let report = WorklistReport {
            service_requests,
            attempted,
            skipped: stats.snapshot(),
            elapsed: start.elapsed(),
        };

        info!(
            "Resolved {} service requests from {} tasks in {:.2}s",
            report.service_requests.len(),
            report.attempted,
            report.elapsed.as_secs_f64()
        );
        report
    }
}

async fn resolve_branch(
    client: &ResourceClient,
    task_id: &str,
    cancel: &CancellationToken,
) -> Result<ServiceRequest, SkipReason> {
    let task = client
        .fetch_task_by_id(task_id, cancel)
        .await
        .map_err(|e| {
            warn!("Error fetching task ID {task_id:?}: {e}");
            categorize_branch_error(BranchStage::Task, &e)
        })?;

    let Some(request_id) = task.service_request_id() else {
        warn!("No service request reference for task {task_id:?}");
        return Err(SkipReason::MissingServiceRequestReference);
    };

    client
        .fetch_service_request_by_id(request_id, cancel)
        .await
        .map_err(|e| {
            warn!("Error fetching service request ID {request_id:?}: {e}");
            categorize_branch_error(BranchStage::ServiceRequest, &e)
        })
}
