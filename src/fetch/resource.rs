//! Authenticated resource reads.
//!
//! `ResourceClient` is a cheap, cloneable handle onto an authenticated session:
//! it carries the base URL, the auth headers fixed at authentication time and
//! the shared transport (whose cookie jar does the rest).

use std::collections::BTreeMap;

use log::debug;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;

use crate::config::{ACCEPT_FHIR_JSON, MAX_ERROR_BODY_SIZE};
use crate::error_handling::ClientError;
use crate::fetch::{with_cancel, HttpTransport, RedirectPolicy};

/// GET-and-decode access to resources below a base URL.
#[derive(Debug, Clone)]
pub struct ResourceClient {
    base_url: Url,
    auth_headers: HeaderMap,
    transport: HttpTransport,
}

impl ResourceClient {
    pub fn new(base_url: Url, auth_headers: HeaderMap, transport: HttpTransport) -> Self {
        Self {
            base_url,
            auth_headers,
            transport,
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Joins `path` onto the base URL and applies `params` to the query string.
    ///
    /// A parameter replaces any existing value for the same key. Keys are
    /// serialized in sorted order.
    pub fn request_url<I, K, V>(&self, path: &str, params: I) -> Result<Url, ClientError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        build_url(&self.base_url, path, params)
    }

    /// Reads the resource at `path` and decodes the JSON body into `T`.
    ///
    /// # Errors
    ///
    /// - `ClientError::HttpStatus` if the status is not 200 (body kept, bounded)
    /// - `ClientError::Decode` if the body is not valid JSON for `T`
    /// - `ClientError::Transport` / `ClientError::Cancelled` on request failure
    pub async fn get<T, I, K, V>(
        &self,
        path: &str,
        params: I,
        cancel: &CancellationToken,
    ) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let url = self.request_url(path, params)?;
        debug!("GET {url}");

        let mut headers = self.auth_headers.clone();
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_FHIR_JSON));

        let request = self
            .transport
            .client(RedirectPolicy::Follow)
            .get(url)
            .headers(headers);

        with_cancel(cancel, async move {
            let response = request.send().await?;
            let status = response.status();
            if status != StatusCode::OK {
                let body = read_bounded(response, MAX_ERROR_BODY_SIZE).await;
                return Err(ClientError::HttpStatus { code: status, body });
            }

            let bytes = response.bytes().await?;
            Ok(serde_json::from_slice(&bytes)?)
        })
        .await
    }
}

pub(crate) fn build_url<I, K, V>(base: &Url, path: &str, params: I) -> Result<Url, ClientError>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let joined = format!(
        "{}/{}",
        base.as_str().trim_end_matches('/'),
        path.trim_start_matches('/')
    );
    let mut url = Url::parse(&joined)?;

    let mut query: BTreeMap<String, String> = url.query_pairs().into_owned().collect();
    for (key, value) in params {
        query.insert(key.as_ref().to_string(), value.as_ref().to_string());
    }

    if query.is_empty() {
        url.set_query(None);
    } else {
        url.query_pairs_mut().clear().extend_pairs(&query);
    }
    Ok(url)
}

/// Reads at most `limit` bytes of a response body, lossily decoded.
async fn read_bounded(mut response: Response, limit: usize) -> String {
    let mut buf = Vec::new();
    while buf.len() < limit {
        match response.chunk().await {
            Ok(Some(chunk)) => buf.extend_from_slice(&chunk),
            _ => break,
        }
    }
    buf.truncate(limit);
    String::from_utf8_lossy(&buf).into_owned()
}
