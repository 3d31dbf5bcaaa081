// Shared test helpers for stub servers and sessions.
//
// The stub login flow mirrors what the identity provider does: redirect an
// unauthenticated read to the login page, serve the form, accept the POST and
// redirect back.

use httptest::{matchers::*, responders::*, Expectation, Server};
use serde_json::json;

use fhir_worklist::{ClientConfig, Session};

pub const USERNAME: &str = "reader";
pub const PASSWORD: &str = "s3cret&more";

/// Login page served by the stub identity provider.
pub const LOGIN_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head>
    <title>Sign in</title>
    <script>if (window.top !== window) { document.write("<form action='/evil'></form>"); }</script>
</head>
<body>
    <form id="kc-form-login" action="/auth/login-actions/authenticate?session_code=abc&amp;execution=e1" method="post">
        <input tabindex="1" id="username" name="username" value="" type="text" autofocus>
        <input tabindex="2" id="password" name="password" type="password">
        <input type="hidden" id="id-hidden-input" name="credentialId">
        <input tabindex="4" name="login" id="kc-login" type="submit" value="Sign In">
    </form>
    <form action="/auth/reset"><input name="email"></form>
</body>
</html>"#;

/// Client configuration pointing at `{server}/fhir`.
#[allow(dead_code)]
pub fn config_for(server: &Server) -> ClientConfig {
    ClientConfig {
        base_url: server.url_str("/fhir"),
        username: USERNAME.to_string(),
        password: PASSWORD.to_string(),
        timeout_seconds: 5,
        ..Default::default()
    }
}

#[allow(dead_code)]
pub fn session_for(server: &Server) -> Session {
    Session::new(config_for(server)).expect("Failed to create session")
}

/// Expects steps 1 to 3 of the login flow, ending in a redirect to `landing`.
///
/// A session cookie is set on the probe and replaced on the credential POST,
/// so later expectations can require the post-login cookie.
#[allow(dead_code)]
pub fn expect_login_until(server: &Server, landing: &str) {
    let page_url = server.url_str("/auth/login");
    let origin = format!("http://{}", server.addr());

    server.expect(
        Expectation::matching(request::method_path("GET", "/fhir/List")).respond_with(
            status_code(302)
                .insert_header("location", "/auth/login")
                .insert_header("set-cookie", "AUTH_SESSION=probe; Path=/"),
        ),
    );
    server.expect(
        Expectation::matching(all_of![
            request::method_path("GET", "/auth/login"),
            request::headers(contains(("cookie", "AUTH_SESSION=probe"))),
        ])
        .respond_with(
            status_code(200)
                .insert_header("content-type", "text/html; charset=utf-8")
                .body(LOGIN_PAGE),
        ),
    );
    server.expect(
        Expectation::matching(all_of![
            request::method_path("POST", "/auth/login-actions/authenticate"),
            request::query(url_decoded(contains(("session_code", "abc")))),
            request::query(url_decoded(contains(("execution", "e1")))),
            request::headers(contains(("content-type", "application/x-www-form-urlencoded"))),
            request::headers(contains(("referer", page_url))),
            request::headers(contains(("origin", origin))),
            request::headers(contains(("user-agent", "Mozilla/5.0"))),
            request::body("username=reader&password=s3cret%26more&login=Sign+In"),
        ])
        .respond_with(
            status_code(302)
                .insert_header("location", landing.to_string())
                .insert_header("set-cookie", "AUTH_SESSION=granted; Path=/"),
        ),
    );
}

/// Expects the whole login flow, landing back under the base URL.
#[allow(dead_code)]
pub fn expect_login_flow(server: &Server) {
    expect_login_until(server, "/fhir/home");
    server.expect(
        Expectation::matching(all_of![
            request::method_path("GET", "/fhir/home"),
            request::headers(contains(("cookie", "AUTH_SESSION=granted"))),
        ])
        .respond_with(status_code(200).body("welcome")),
    );
}

/// Expects `Task/{task_id}` pointing at `ServiceRequest/{request_id}`, and that request.
#[allow(dead_code)]
pub fn expect_task_chain(server: &Server, task_id: &str, request_id: &str) {
    server.expect(
        Expectation::matching(request::method_path("GET", format!("/fhir/Task/{task_id}")))
            .respond_with(json_encoded(json!({
                "resourceType": "Task",
                "id": task_id,
                "status": "ready",
                "input": [{"valueReference": {"reference": format!("ServiceRequest/{request_id}")}}]
            }))),
    );
    server.expect(
        Expectation::matching(request::method_path(
            "GET",
            format!("/fhir/ServiceRequest/{request_id}"),
        ))
        .respond_with(json_encoded(json!({
            "resourceType": "ServiceRequest",
            "id": request_id,
            "status": "active",
            "subject": {"reference": "Patient/p1"}
        }))),
    );
}

/// Builds `{"item": {"reference": ...}}` entries for a List body.
#[allow(dead_code)]
pub fn list_entries(references: &[&str]) -> serde_json::Value {
    references
        .iter()
        .map(|r| json!({"item": {"reference": r}}))
        .collect()
}
