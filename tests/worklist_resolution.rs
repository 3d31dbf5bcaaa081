//! Worklist resolution over an authenticated session.

mod helpers;

use std::collections::HashMap;
use std::time::Duration;

use httptest::{matchers::*, responders::*, Expectation, Server};
use serde_json::json;
use tokio_util::sync::CancellationToken;

use fhir_worklist::{resolve_worklist, ClientError, SkipReason, WorklistSource};
use helpers::{expect_login_flow, expect_task_chain, list_entries, session_for};

const TIMEOUT: Duration = Duration::from_secs(10);

fn sorted_ids(report: &fhir_worklist::WorklistReport) -> Vec<String> {
    let mut ids: Vec<String> = report
        .service_requests
        .iter()
        .map(|sr| sr.id.clone())
        .collect();
    ids.sort();
    ids
}

#[tokio::test]
async fn test_login_then_resolve_worklist() {
    let server = Server::run();
    expect_login_flow(&server);
    server.expect(
        Expectation::matching(all_of![
            request::method_path("GET", "/fhir/List/wl"),
            request::query(url_decoded(contains(("_format", "json")))),
            request::headers(contains(("cookie", "AUTH_SESSION=granted"))),
        ])
        .respond_with(json_encoded(json!({
            "resourceType": "List",
            "id": "wl",
            "entry": list_entries(&["Task/t1", "Patient/p1", "Task/t2", "Task/t3"])
        }))),
    );
    expect_task_chain(&server, "t1", "sr1");
    expect_task_chain(&server, "t2", "sr2");
    server.expect(
        Expectation::matching(request::method_path("GET", "/fhir/Task/t3"))
            .respond_with(status_code(403).body("forbidden")),
    );

    let cancel = CancellationToken::new();
    let mut session = session_for(&server);
    let client = session.authenticate(&cancel).await.unwrap();

    let report = resolve_worklist(&client, "wl", WorklistSource::List, TIMEOUT, &cancel)
        .await
        .unwrap();

    assert_eq!(report.attempted, 3);
    assert_eq!(sorted_ids(&report), vec!["sr1", "sr2"]);
    assert_eq!(report.skipped.get(&SkipReason::TaskFetchFailed), Some(&1));
    assert_eq!(report.service_requests[0].subject.reference, "Patient/p1");
}

#[tokio::test]
async fn test_resolve_worklist_from_bundle_with_seeded_headers() {
    let server = Server::run();
    server.expect(
        Expectation::matching(all_of![
            request::method_path("GET", "/fhir/List"),
            request::query(url_decoded(contains(("_id", "wl")))),
            request::headers(contains(("authorization", "Bearer t0ken"))),
        ])
        .respond_with(json_encoded(json!({
            "resourceType": "Bundle",
            "type": "searchset",
            "total": 1,
            "entry": [{"resource": {"resourceType": "List", "entry": list_entries(&["Task/t1"])}}]
        }))),
    );
    expect_task_chain(&server, "t1", "sr1");

    let mut headers = HashMap::new();
    headers.insert("Authorization".to_string(), "Bearer t0ken".to_string());
    let mut session = session_for(&server).with_auth_headers(&headers).unwrap();

    let cancel = CancellationToken::new();
    let client = session.authenticate(&cancel).await.unwrap();
    let report = resolve_worklist(&client, "wl", WorklistSource::Bundle, TIMEOUT, &cancel)
        .await
        .unwrap();

    assert_eq!(sorted_ids(&report), vec!["sr1"]);
}

#[tokio::test]
async fn test_large_worklist_fans_out() {
    let server = Server::run();
    let references: Vec<String> = (0..50).map(|i| format!("Task/t{i}")).collect();
    let refs: Vec<&str> = references.iter().map(String::as_str).collect();

    server.expect(
        Expectation::matching(request::method_path("GET", "/fhir/List/big"))
            .respond_with(json_encoded(json!({"resourceType": "List", "entry": list_entries(&refs)}))),
    );
    for i in 0..50 {
        expect_task_chain(&server, &format!("t{i}"), &format!("sr{i}"));
    }

    let client = session_for(&server)
        .with_auth_headers(&HashMap::new())
        .unwrap()
        .resource_client()
        .unwrap();

    let report = resolve_worklist(
        &client,
        "big",
        WorklistSource::List,
        TIMEOUT,
        &CancellationToken::new(),
    )
    .await
    .unwrap();

    assert_eq!(report.attempted, 50);
    assert_eq!(report.service_requests.len(), 50);
    assert_eq!(report.skipped_total(), 0);
}

#[tokio::test]
async fn test_malformed_worklist_is_a_decode_error() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/fhir/List/wl"))
            .respond_with(status_code(200).body("{not json")),
    );

    let client = session_for(&server)
        .with_auth_headers(&HashMap::new())
        .unwrap()
        .resource_client()
        .unwrap();

    let err = resolve_worklist(
        &client,
        "wl",
        WorklistSource::List,
        TIMEOUT,
        &CancellationToken::new(),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, ClientError::Decode(_)));
}
