//! End-to-end `parapet test` runs against a mock of the API under test.
//!
//! The mock server runs on the test's tokio runtime while the binary is
//! driven from a blocking task.

use std::path::PathBuf;

use assert_cmd::assert::{Assert, OutputAssertExt};
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use serde_json::json;

use crate::cli::parapet;
use crate::mock_api::{fixtures_dir, MockApi};

/// Run `parapet test` against `api` with extra arguments.
async fn run_test(api: &MockApi, extra: &[&str]) -> Assert {
    let server = api.uri();
    let spec: PathBuf = fixtures_dir().join("people.yaml");
    let extra: Vec<String> = extra.iter().map(|s| s.to_string()).collect();

    let output = tokio::task::spawn_blocking(move || {
        parapet()
            .args(["test", "--server", &server, "--spec"])
            .arg(&spec)
            .args(&extra)
            .output()
    })
    .await
    .expect("parapet run panicked")
    .expect("failed to run parapet");
    output.assert()
}

#[tokio::test(flavor = "multi_thread")]
async fn conforming_server_passes() {
    let api = MockApi::start().await;
    api.json(
        "GET",
        "/people",
        200,
        json!([{"name": "bilbo", "role": "hobbit"}, {"name": "gandalf", "nickname": null}]),
    )
    .await;
    api.json("GET", "/people/7", 200, json!({"name": "frodo"})).await;
    api.empty("DELETE", "/people/7", 204).await;

    run_test(&api, &[])
        .await
        .success()
        .stdout(contains("✓ GET /people (findPeople)"))
        .stdout(contains("checked 3 operation(s): 3 passed, 0 failed"));

    // findPeople has two example groups, the others one each.
    assert_eq!(api.request_count().await, 4);
}

#[tokio::test(flavor = "multi_thread")]
async fn content_type_and_status_mismatches_are_reported() {
    let api = MockApi::start().await;
    api.raw("GET", "/people", 200, "text/csv", "name\nbilbo").await;
    api.empty("GET", "/people/7", 500).await;
    api.empty("DELETE", "/people/7", 204).await;

    run_test(&api, &[])
        .await
        .failure()
        .code(1)
        .stdout(contains(
            "response content type 'text/csv' is not declared (x2)",
        ))
        .stdout(contains(
            "response content type 'text/csv' is not accepted by [application/json] (x2)",
        ))
        .stdout(contains("response status 500 is not declared"))
        .stdout(contains("reproduce 'personal': curl"))
        .stdout(contains("checked 3 operation(s): 1 passed, 2 failed"));
}

#[tokio::test(flavor = "multi_thread")]
async fn body_mismatch_in_json_report() {
    let api = MockApi::start().await;
    api.json(
        "GET",
        "/people/7",
        200,
        json!({"nmae": "frodo", "role": "ranger", "nickname": 3}),
    )
    .await;

    let assert = run_test(&api, &["--operation", "getPerson", "--format", "json"])
        .await
        .failure()
        .code(1);
    let v: serde_json::Value =
        serde_json::from_slice(&assert.get_output().stdout).expect("valid JSON report");

    let operation = &v["operations"][0];
    assert_eq!(operation["operation"], "getPerson");
    assert_eq!(operation["groups"][0]["status"], 200);

    let messages: Vec<&str> = operation["failures"]
        .as_array()
        .expect("failures array")
        .iter()
        .filter_map(|f| f["message"].as_str())
        .collect();
    assert_eq!(
        messages,
        vec![
            "response.body: missing required property 'name'",
            "response.body: unexpected properties [nmae] (schema properties not found: [name])",
            "response.body.role: value \"ranger\" is not one of [\"hobbit\", \"wizard\", \"elf\"]",
            "response.body.nickname: expected type 'string' but found 'integer'",
        ]
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn declared_status_without_content_passes() {
    let api = MockApi::start().await;
    // Nothing mounted: the mock answers 404, which getPerson declares
    // without content.
    run_test(&api, &["-o", "getPerson", "--concurrency", "1"])
        .await
        .success()
        .stdout(contains("✓ GET /people/{id} (getPerson)"))
        .stdout(contains("warning").not());
}

#[tokio::test(flavor = "multi_thread")]
async fn unparsable_json_body_is_a_warning() {
    let api = MockApi::start().await;
    api.raw("GET", "/people/7", 200, "application/json", "{\"name\": ").await;

    run_test(&api, &["-o", "getPerson"])
        .await
        .success()
        .stdout(contains("(with 1 warning(s))"))
        .stdout(contains(
            "response body (application/json) could not be parsed, schema validation skipped (warning)",
        ));
}
