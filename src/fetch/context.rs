//! Shared HTTP transport.
//!
//! This module defines the `HttpTransport` struct that groups the two HTTP
//! clients and the cookie jar they share. Cloning it is cheap and every clone
//! talks through the same connection pools and cookies.

use std::sync::Arc;

use reqwest::cookie::Jar;

/// Whether a call follows redirects or stops at the first 3xx response.
///
/// Chosen per call site; no client configuration is mutated at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectPolicy {
    /// Follow redirects and report the final response.
    Follow,
    /// Return the 3xx response itself so its `Location` can be read.
    Manual,
}

/// HTTP clients and the cookie store shared by every request of a session.
#[derive(Clone)]
pub struct HttpTransport {
    /// HTTP client for making requests (with redirects enabled)
    client: reqwest::Client,
    /// HTTP client for manual redirect chasing (with redirects disabled)
    redirect_client: reqwest::Client,
    /// Cookie jar attached to both clients; internally synchronized
    cookies: Arc<Jar>,
}

impl HttpTransport {
    /// Creates a transport from two clients that were built around `cookies`.
    pub fn new(client: reqwest::Client, redirect_client: reqwest::Client, cookies: Arc<Jar>) -> Self {
        Self {
            client,
            redirect_client,
            cookies,
        }
    }

    /// Returns the client implementing `policy`.
    pub fn client(&self, policy: RedirectPolicy) -> &reqwest::Client {
        match policy {
            RedirectPolicy::Follow => &self.client,
            RedirectPolicy::Manual => &self.redirect_client,
        }
    }

    pub fn cookies(&self) -> &Arc<Jar> {
        &self.cookies
    }
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Omits cookie values
        f.debug_struct("HttpTransport").finish_non_exhaustive()
    }
}
