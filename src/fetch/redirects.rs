//! Manual redirect chasing.
//!
//! Issues a single request without following redirects and hands back the
//! `Location` the server answered with. Used by the login flow, which has to
//! see each hop of the redirect sequence.

use log::debug;
use reqwest::header::{HeaderMap, LOCATION};
use reqwest::{Method, StatusCode, Url};
use tokio_util::sync::CancellationToken;

use crate::error_handling::ClientError;
use crate::fetch::{send_cancellable, HttpTransport, RedirectPolicy};

/// A single request whose redirect target is wanted.
#[derive(Debug, Clone)]
pub struct RedirectRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: Option<String>,
}

impl RedirectRequest {
    pub fn get(url: Url) -> Self {
        Self {
            method: Method::GET,
            url,
            headers: HeaderMap::new(),
            body: None,
        }
    }

    pub fn post(url: Url, headers: HeaderMap, body: String) -> Self {
        Self {
            method: Method::POST,
            url,
            headers,
            body: Some(body),
        }
    }
}

/// Sends `request` with redirect-following disabled and returns the raw
/// `Location` header value.
///
/// The returned value may be relative; see [`resolve_location`].
///
/// # Errors
///
/// - `ClientError::UnexpectedStatus` if the status is not one of `expected`
/// - `ClientError::MissingRedirectLocation` if `Location` is absent or empty
/// - `ClientError::Transport` / `ClientError::Cancelled` if the request itself fails
pub async fn chase_redirect(
    transport: &HttpTransport,
    request: RedirectRequest,
    expected: &[StatusCode],
    cancel: &CancellationToken,
) -> Result<String, ClientError> {
    debug!("{} {} (not following redirects)", request.method, request.url);

    let mut builder = transport
        .client(RedirectPolicy::Manual)
        .request(request.method, request.url)
        .headers(request.headers);
    if let Some(body) = request.body {
        builder = builder.body(body);
    }

    let response = send_cancellable(builder, cancel).await?;

    let status = response.status();
    if !expected.contains(&status) {
        return Err(ClientError::UnexpectedStatus {
            got: status,
            want: expected.to_vec(),
        });
    }

    let location = response
        .headers()
        .get(LOCATION)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .unwrap_or("");
    if location.is_empty() {
        return Err(ClientError::MissingRedirectLocation);
    }

    debug!("{status} -> {location}");
    Ok(location.to_string())
}

/// Resolves a `Location` value against the URL of the request that returned it.
pub fn resolve_location(request_url: &Url, location: &str) -> Result<Url, ClientError> {
    let url = Url::parse(location).or_else(|_| request_url.join(location))?;
    Ok(url)
}
