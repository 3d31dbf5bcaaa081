//! Run statistics printing.

use log::info;
use strum::IntoEnumIterator;

use crate::error_handling::SkipReason;
use crate::worklist::WorklistReport;

/// Logs a one-line summary of a resolution run.
pub fn print_worklist_summary(report: &WorklistReport) {
    let found = report.service_requests.len();
    info!(
        "✅ Found {} result{} from {} task{} in {:.1}s",
        found,
        if found == 1 { "" } else { "s" },
        report.attempted,
        if report.attempted == 1 { "" } else { "s" },
        report.elapsed.as_secs_f64()
    );
}

/// Logs skip counts per reason, if any branch was skipped.
pub fn print_skip_statistics(report: &WorklistReport) {
    let total = report.skipped_total();
    if total == 0 {
        return;
    }

    info!("Skipped Counts ({} total):", total);
    for reason in SkipReason::iter() {
        if let Some(count) = report.skipped.get(&reason) {
            info!("   {}: {}", reason.as_str(), count);
        }
    }
}
