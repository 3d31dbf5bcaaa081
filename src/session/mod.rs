//! Session establishment.
//!
//! A `Session` owns the base URL, the credentials and the HTTP transport (with
//! its cookie jar) for one server. [`Session::authenticate`] replays the
//! browser login sequence once; afterwards [`Session::resource_client`] hands
//! out cloneable clients that reuse the same cookies.

mod login;

use std::collections::HashMap;

use log::{debug, info};
use reqwest::header::HeaderMap;
use reqwest::Url;
use tokio_util::sync::CancellationToken;

use crate::config::ClientConfig;
use crate::error_handling::ClientError;
use crate::fetch::request::header_map;
use crate::fetch::{HttpTransport, ResourceClient};
use crate::initialization::init_transport;

/// An authenticated (or not yet authenticated) connection to one server.
///
/// Authentication takes `&mut self`, so it can never overlap with another
/// authentication attempt or with resource reads on the same session.
#[derive(Debug)]
pub struct Session {
    config: ClientConfig,
    base_url: Url,
    transport: HttpTransport,
    /// `Some` once authenticated; an empty map means the cookie jar carries the session.
    auth_headers: Option<HeaderMap>,
}

impl Session {
    /// Creates an unauthenticated session with a fresh transport.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::InvalidBaseUrl` for an unusable base URL, or
    /// `ClientError::Initialization` if the HTTP clients cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let transport = init_transport(&config)?;
        Self::with_transport(config, transport)
    }

    /// Creates an unauthenticated session on an existing transport.
    pub fn with_transport(config: ClientConfig, transport: HttpTransport) -> Result<Self, ClientError> {
        let base_url = config.validate()?;
        Ok(Self {
            config,
            base_url,
            transport,
            auth_headers: None,
        })
    }

    /// Seeds explicit auth headers (for example a bearer token) and marks the
    /// session as authenticated, skipping the login sequence.
    pub fn with_auth_headers(mut self, headers: &HashMap<String, String>) -> Result<Self, ClientError> {
        self.auth_headers = Some(header_map(headers)?);
        Ok(self)
    }

    pub fn is_authenticated(&self) -> bool {
        self.auth_headers.is_some()
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn auth_headers(&self) -> Option<&HeaderMap> {
        self.auth_headers.as_ref()
    }

    /// Runs the login sequence unless the session is already authenticated.
    ///
    /// The steps run strictly in order and none is retried; the first failure
    /// ends the attempt and leaves the session unauthenticated.
    ///
    /// # Errors
    ///
    /// Any step's error is returned as is: `UnexpectedStatus`,
    /// `MissingRedirectLocation`, `LoginPageStatus`, `Form`, `SessionNotResolved`,
    /// `AuthorizationCodeUnsupported`, `Transport` or `Cancelled`.
    pub async fn authenticate(&mut self, cancel: &CancellationToken) -> Result<ResourceClient, ClientError> {
        if let Some(client) = self.resource_client() {
            debug!("Session already authenticated, skipping login");
            return Ok(client);
        }

        let probe = login::probe_url(&self.base_url, self.config.redirect_list_id.as_deref())?;
        let login_url = login::probe_login_redirect(&self.transport, probe, cancel).await?;
        let (form, page_url) = login::fetch_login_form(&self.transport, login_url, cancel).await?;
        let redirect_url =
            login::submit_credentials(&self.transport, &self.config, &form, &page_url, cancel)
                .await?;
        let landing =
            login::confirm_session(&self.transport, &self.base_url, redirect_url, cancel).await?;

        info!("Session-based auth confirmed (landed on {landing})");
        let headers = HeaderMap::new();
        self.auth_headers = Some(headers.clone());
        Ok(self.client_with(headers))
    }

    /// Returns a resource client bound to this session, or `None` before
    /// authentication.
    pub fn resource_client(&self) -> Option<ResourceClient> {
        self.auth_headers
            .as_ref()
            .map(|headers| self.client_with(headers.clone()))
    }

    fn client_with(&self, headers: HeaderMap) -> ResourceClient {
        ResourceClient::new(self.base_url.clone(), headers, self.transport.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ClientConfig {
        ClientConfig {
            base_url: "https://pacs.example.org/fhir/".to_string(),
            username: "reader".to_string(),
            password: "secret".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_new_session_is_unauthenticated() {
        let session = Session::new(config()).unwrap();
        assert!(!session.is_authenticated());
        assert!(session.resource_client().is_none());
        assert_eq!(session.base_url().as_str(), "https://pacs.example.org/fhir");
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        let err = Session::new(ClientConfig {
            base_url: "not a url".to_string(),
            ..config()
        })
        .unwrap_err();
        assert!(matches!(err, ClientError::InvalidBaseUrl { .. }));
    }

    #[test]
    fn test_seeded_headers_authenticate() {
        let mut headers = HashMap::new();
        headers.insert("Authorization".to_string(), "Bearer abc".to_string());

        let session = Session::new(config())
            .unwrap()
            .with_auth_headers(&headers)
            .unwrap();

        assert!(session.is_authenticated());
        assert_eq!(session.auth_headers().unwrap()["authorization"], "Bearer abc");
        assert!(session.resource_client().is_some());
    }

    #[tokio::test]
    async fn test_authenticate_short_circuits_when_seeded() {
        // No server behind this URL; any request would fail.
        let mut session = Session::new(ClientConfig {
            base_url: "http://127.0.0.1:9/fhir".to_string(),
            ..config()
        })
        .unwrap()
        .with_auth_headers(&HashMap::new())
        .unwrap();

        let client = session.authenticate(&CancellationToken::new()).await.unwrap();
        assert_eq!(client.base_url().as_str(), "http://127.0.0.1:9/fhir");
    }

    #[tokio::test]
    async fn test_cancelled_authentication_leaves_session_unauthenticated() {
        let mut session = Session::new(ClientConfig {
            base_url: "http://127.0.0.1:9/fhir".to_string(),
            ..config()
        })
        .unwrap();
        let cancel = CancellationToken::new();
        cancel.cancel();

        let err = session.authenticate(&cancel).await.unwrap_err();
        assert!(matches!(err, ClientError::Cancelled));
        assert!(!session.is_authenticated());
    }
}
