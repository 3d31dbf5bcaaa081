//! Error categorization.
//!
//! Maps the error that ended a worklist branch to the `SkipReason` it is
//! counted under.

use super::types::{ClientError, SkipReason};

/// Which read a worklist branch was performing when it failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchStage {
    Task,
    ServiceRequest,
}

/// Categorizes a failed branch read into a `SkipReason`.
///
/// Cancellation is reported as such regardless of stage; every other error is
/// attributed to the read that produced it.
pub fn categorize_branch_error(stage: BranchStage, error: &ClientError) -> SkipReason {
    if matches!(error, ClientError::Cancelled) {
        return SkipReason::Cancelled;
    }
    match stage {
        BranchStage::Task => SkipReason::TaskFetchFailed,
        BranchStage::ServiceRequest => SkipReason::ServiceRequestFetchFailed,
    }
}
