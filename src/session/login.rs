//! The individual steps of the browser login sequence.
//!
//! Each step is one network round trip and hands its result to the next:
//! probe → login page → credential submission → post-login landing.

use log::debug;
use reqwest::{StatusCode, Url};
use tokio_util::sync::CancellationToken;

use crate::config::{
    ClientConfig, AUTH_CODE_PARAM, ID_PARAM, LIST_PATH, LOGIN_FIELD, LOGIN_SUBMIT_LABEL,
    PASSWORD_FIELD, USERNAME_FIELD,
};
use crate::error_handling::ClientError;
use crate::fetch::request::LoginHeaders;
use crate::fetch::{
    build_url, chase_redirect, resolve_location, send_cancellable, with_cancel, HttpTransport,
    RedirectPolicy, RedirectRequest,
};
use crate::parse::{extract_form, LoginForm};

/// Builds the unauthenticated probe URL: `{base}/List[?_id={list_id}]`.
pub(crate) fn probe_url(base: &Url, redirect_list_id: Option<&str>) -> Result<Url, ClientError> {
    let params = redirect_list_id
        .filter(|id| !id.is_empty())
        .map(|id| (ID_PARAM, id));
    build_url(base, LIST_PATH, params)
}

/// Step 1: requests a resource without a session and returns the login page
/// URL the server redirects to.
pub(crate) async fn probe_login_redirect(
    transport: &HttpTransport,
    probe: Url,
    cancel: &CancellationToken,
) -> Result<Url, ClientError> {
    debug!("Probing {probe} for login redirect");
    let location = chase_redirect(
        transport,
        RedirectRequest::get(probe.clone()),
        &[StatusCode::FOUND],
        cancel,
    )
    .await?;
    resolve_location(&probe, &location)
}

/// Step 2: fetches the login page (following redirects) and extracts its form.
///
/// Returns the form together with the URL the page was finally served from,
/// which is what the form action, `Referer` and `Origin` are relative to.
pub(crate) async fn fetch_login_form(
    transport: &HttpTransport,
    login_url: Url,
    cancel: &CancellationToken,
) -> Result<(LoginForm, Url), ClientError> {
    debug!("Fetching login page {login_url}");
    let request = transport.client(RedirectPolicy::Follow).get(login_url);

    let (page_url, body) = with_cancel(cancel, async move {
        let response = request.send().await?;
        if response.status() != StatusCode::OK {
            return Err(ClientError::LoginPageStatus(response.status()));
        }
        let page_url = response.url().clone();
        let body = response.bytes().await?;
        Ok((page_url, body))
    })
    .await?;

    let form = extract_form(&body)?;
    let mut names: Vec<&str> = form.fields.keys().map(String::as_str).collect();
    names.sort_unstable();
    debug!("Login form action {:?}, fields {:?}", form.action, names);

    Ok((form, page_url))
}

/// Step 3: posts the credentials to the form action and returns the
/// post-login redirect target.
pub(crate) async fn submit_credentials(
    transport: &HttpTransport,
    config: &ClientConfig,
    form: &LoginForm,
    page_url: &Url,
    cancel: &CancellationToken,
) -> Result<Url, ClientError> {
    let action = form.action_url(page_url)?;
    debug!("Submitting credentials to {action}");

    let body = url::form_urlencoded::Serializer::new(String::new())
        .append_pair(USERNAME_FIELD, &config.username)
        .append_pair(PASSWORD_FIELD, &config.password)
        .append_pair(LOGIN_FIELD, LOGIN_SUBMIT_LABEL)
        .finish();
    let headers = LoginHeaders::for_submission(page_url, &config.user_agent)?;

    let location = chase_redirect(
        transport,
        RedirectRequest::post(action.clone(), headers, body),
        &[StatusCode::FOUND, StatusCode::SEE_OTHER],
        cancel,
    )
    .await?;
    resolve_location(&action, &location)
}

/// Steps 4 and 5: follows the post-login redirect and checks where it lands.
///
/// # Errors
///
/// - `ClientError::AuthorizationCodeUnsupported` if the landing URL carries a `code` parameter
/// - `ClientError::SessionNotResolved` if it lands anywhere else outside the base URL
pub(crate) async fn confirm_session(
    transport: &HttpTransport,
    base: &Url,
    redirect_url: Url,
    cancel: &CancellationToken,
) -> Result<Url, ClientError> {
    debug!("Following post-login redirect {redirect_url}");
    let request = transport.client(RedirectPolicy::Follow).get(redirect_url);
    let response = send_cancellable(request, cancel).await?;
    let final_url = response.url().clone();
    drop(response);

    check_landing(base, final_url)
}

fn check_landing(base: &Url, final_url: Url) -> Result<Url, ClientError> {
    let prefix = base.as_str().trim_end_matches('/');
    if final_url.as_str().starts_with(prefix) {
        return Ok(final_url);
    }

    let has_code = final_url
        .query_pairs()
        .any(|(key, value)| key == AUTH_CODE_PARAM && !value.is_empty());
    let final_url = final_url.to_string();
    if has_code {
        Err(ClientError::AuthorizationCodeUnsupported { final_url })
    } else {
        Err(ClientError::SessionNotResolved { final_url })
    }
}
