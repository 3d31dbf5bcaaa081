//! Request header construction.
//!
//! The login form must be submitted the way a browser would submit it; the
//! identity provider checks `Origin` and `Referer` against the page that
//! served the form.

use std::collections::HashMap;

use reqwest::header::{
    HeaderMap, HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE, ORIGIN, REFERER, USER_AGENT,
};
use reqwest::Url;

use crate::config::{ACCEPT_HTML, FORM_CONTENT_TYPE};
use crate::error_handling::ClientError;

/// Browser-like headers for the login form submission.
pub(crate) struct LoginHeaders;

impl LoginHeaders {
    /// Builds the submission headers for a form served from `login_page`.
    ///
    /// `Origin` is the page's scheme and host (with a non-default port);
    /// `Referer` is the full page URL.
    pub(crate) fn for_submission(
        login_page: &Url,
        user_agent: &str,
    ) -> Result<HeaderMap, ClientError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(FORM_CONTENT_TYPE));
        headers.insert(REFERER, HeaderValue::from_str(login_page.as_str())?);
        headers.insert(
            ORIGIN,
            HeaderValue::from_str(&login_page.origin().ascii_serialization())?,
        );
        headers.insert(USER_AGENT, HeaderValue::from_str(user_agent)?);
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_HTML));
        Ok(headers)
    }
}

/// Converts a plain name → value map into a `HeaderMap`.
pub(crate) fn header_map(headers: &HashMap<String, String>) -> Result<HeaderMap, ClientError> {
    let mut map = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        map.insert(
            HeaderName::from_bytes(name.as_bytes())?,
            HeaderValue::from_str(value)?,
        );
    }
    Ok(map)
}
