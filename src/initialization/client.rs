//! HTTP client initialization.
//!
//! Both clients built here share one cookie jar, so a session cookie set while
//! chasing a redirect manually is sent on every later redirect-following call.

use std::sync::Arc;

use reqwest::cookie::Jar;
use reqwest::ClientBuilder;

use crate::config::ClientConfig;
use crate::error_handling::InitializationError;
use crate::fetch::HttpTransport;

fn base_builder(config: &ClientConfig, cookies: &Arc<Jar>) -> ClientBuilder {
    ClientBuilder::new()
        .cookie_provider(Arc::clone(cookies))
        .timeout(config.request_timeout())
        .user_agent(config.user_agent.clone())
        .danger_accept_invalid_certs(!config.verify_tls)
}

/// Initializes the redirect-following HTTP client.
///
/// # Errors
///
/// Returns a `reqwest::Error` if client creation fails.
pub fn init_client(
    config: &ClientConfig,
    cookies: &Arc<Jar>,
) -> Result<reqwest::Client, reqwest::Error> {
    base_builder(config, cookies).build()
}

/// Initializes the HTTP client used for manual redirect chasing.
///
/// Redirects are disabled so the caller sees the 3xx response and its
/// `Location` header.
///
/// # Errors
///
/// Returns a `reqwest::Error` if client creation fails.
pub fn init_redirect_client(
    config: &ClientConfig,
    cookies: &Arc<Jar>,
) -> Result<reqwest::Client, reqwest::Error> {
    base_builder(config, cookies)
        .redirect(reqwest::redirect::Policy::none())
        .build()
}

/// Builds the shared transport: a fresh cookie jar and both clients.
pub fn init_transport(config: &ClientConfig) -> Result<HttpTransport, InitializationError> {
    let cookies = Arc::new(Jar::default());
    let client = init_client(config, &cookies)?;
    let redirect_client = init_redirect_client(config, &cookies)?;
    Ok(HttpTransport::new(client, redirect_client, cookies))
}
