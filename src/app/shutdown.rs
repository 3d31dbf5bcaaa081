//! Interrupt handling.

use log::warn;
use tokio_util::sync::CancellationToken;

/// Cancels `cancel` on Ctrl-C.
///
/// The returned handle can be aborted once the work it guards has finished.
pub fn cancel_on_ctrl_c(cancel: CancellationToken) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        tokio::select! {
            _ = cancel.cancelled() => {}
            result = tokio::signal::ctrl_c() => {
                if result.is_ok() {
                    warn!("Interrupted, cancelling in-flight requests");
                    cancel.cancel();
                }
            }
        }
    })
}
