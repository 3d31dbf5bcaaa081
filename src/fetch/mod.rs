//! HTTP plumbing shared by the login flow and resource reads.
//!
//! - `context`: the shared transport and per-call redirect policy
//! - `redirects`: single-hop manual redirect chasing
//! - `request`: browser-like header construction
//! - `resource`: authenticated GET-and-decode

mod context;
mod redirects;
pub(crate) mod request;
mod resource;

use std::future::Future;

use tokio_util::sync::CancellationToken;

use crate::error_handling::ClientError;

pub use context::{HttpTransport, RedirectPolicy};
pub use redirects::{chase_redirect, resolve_location, RedirectRequest};
pub(crate) use resource::build_url;
pub use resource::ResourceClient;

/// Runs `fut` until it completes or `cancel` fires.
///
/// On cancellation the future is dropped, which aborts any in-flight request.
pub(crate) async fn with_cancel<F, T>(cancel: &CancellationToken, fut: F) -> Result<T, ClientError>
where
    F: Future<Output = Result<T, ClientError>>,
{
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(ClientError::Cancelled),
        result = fut => result,
    }
}

/// Sends a request, aborting it if `cancel` fires.
pub(crate) async fn send_cancellable(
    builder: reqwest::RequestBuilder,
    cancel: &CancellationToken,
) -> Result<reqwest::Response, ClientError> {
    with_cancel(cancel, async move { Ok(builder.send().await?) }).await
}
