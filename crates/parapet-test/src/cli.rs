//! CLI regression tests for the `parapet` binary.
//!
//! These tests invoke the binary as a subprocess to catch regressions in flag
//! names, exit codes and output formats.
//!
//! Run with: `cargo test -p parapet-test`
//! Requires the `parapet` binary to be built first (`cargo build -p parapet`).

use assert_cmd::Command;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

use crate::mock_api::{fixtures_dir, write_spec};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Returns an assert_cmd Command wrapping the `parapet` binary.
pub(crate) fn parapet() -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("parapet")
        .expect("parapet binary not found, run `cargo build -p parapet` first");
    cmd.env_remove("PARAPET_SERVER")
        .env_remove("PARAPET_LOG_FORMAT")
        .env("PARAPET_LOG", "warn");
    cmd
}

// ---------------------------------------------------------------------------
// parapet validate
// ---------------------------------------------------------------------------

#[test]
fn validate_conforming_spec_exits_zero() {
    parapet()
        .args(["validate", "--spec"])
        .arg(fixtures_dir().join("people.yaml"))
        .assert()
        .success()
        .stdout(contains("People API 1.0"))
        .stdout(contains("✓ GET /people (findPeople)"))
        .stdout(contains("✓ DELETE /people/{id} (deletePerson)"))
        .stdout(contains("checked 3 operation(s): 3 passed, 0 failed"));
}

#[test]
fn validate_broken_examples_exits_one() {
    parapet()
        .args(["validate", "--spec"])
        .arg(fixtures_dir().join("invalid-examples.yaml"))
        .assert()
        .failure()
        .code(1)
        .stdout(contains(
            "parameters.age.example: expected type 'integer' but found 'string'",
        ))
        .stdout(contains(
            "parameters.family: parameter object must define either 'schema' or 'content', not both",
        ))
        .stdout(contains(
            "parameters.nickname: 'example' and 'examples' are mutually exclusive",
        ))
        .stdout(contains("missing required parameters: id"))
        .stdout(contains("checked 2 operation(s): 0 passed, 2 failed"));
}

#[test]
fn validate_json_format_outputs_valid_json() {
    let output = parapet()
        .args(["validate", "--format", "json", "--spec"])
        .arg(fixtures_dir().join("invalid-examples.yaml"))
        .assert()
        .failure()
        .code(1)
        .get_output()
        .stdout
        .clone();

    let s = String::from_utf8(output).expect("stdout should be valid UTF-8");
    let v: serde_json::Value =
        serde_json::from_str(&s).expect("--format json output should be valid JSON");
    assert_eq!(v["title"], "Broken Examples 0.1");
    assert_eq!(v["summary"]["operations"], 2);
    assert_eq!(v["summary"]["failed"], 2);

    let operations = v["operations"].as_array().expect("operations should be an array");
    assert_eq!(operations[0]["operation"], "findPeople");
    let kinds: Vec<&str> = operations[0]["failures"]
        .as_array()
        .expect("failures should be an array")
        .iter()
        .filter_map(|f| f["detail"]["kind"].as_str())
        .collect();
    assert!(kinds.contains(&"invalid_parameter_object"));
    assert!(kinds.contains(&"invalid_parameter_example"));
    assert!(kinds.contains(&"type_mismatch"));
}

#[test]
fn validate_selected_operation_only() {
    parapet()
        .args(["validate", "--operation", "getPerson", "--spec"])
        .arg(fixtures_dir().join("people.yaml"))
        .assert()
        .success()
        .stdout(contains("getPerson"))
        .stdout(contains("findPeople").not())
        .stdout(contains("checked 1 operation(s)"));
}

#[test]
fn validate_unknown_operation_exits_one() {
    parapet()
        .args(["validate", "-o", "nope", "--spec"])
        .arg(fixtures_dir().join("people.yaml"))
        .assert()
        .failure()
        .code(1)
        .stderr(contains("unknown operation 'nope'"));
}

#[test]
fn validate_missing_file_exits_one() {
    parapet()
        .args(["validate", "--spec", "this-file-does-not-exist.yaml"])
        .assert()
        .failure()
        .code(1)
        .stderr(contains("spec file not found"));
}

#[test]
fn validate_parse_error_exits_one() {
    parapet()
        .args(["validate", "--spec"])
        .arg(fixtures_dir().join("invalid-parse-error.yaml"))
        .assert()
        .failure()
        .code(1)
        .stderr(contains("parse error"));
}

#[test]
fn validate_swagger_2_exits_one() {
    parapet()
        .args(["validate", "--spec"])
        .arg(fixtures_dir().join("swagger2.yaml"))
        .assert()
        .failure()
        .code(1)
        .stderr(contains("Swagger 2.0"));
}

#[test]
fn validate_unsupported_extension_exits_one() {
    let tmp = tempfile::TempDir::new().expect("temp dir");
    let spec = write_spec(&tmp, "api.txt", "openapi: 3.0.3\n").expect("write spec");
    parapet()
        .args(["validate", "--spec"])
        .arg(&spec)
        .assert()
        .failure()
        .code(1);
}

#[test]
fn validate_json_document_is_accepted() {
    let tmp = tempfile::TempDir::new().expect("temp dir");
    let spec = write_spec(
        &tmp,
        "api.json",
        r#"{
  "openapi": "3.0.3",
  "info": {"title": "Json API", "version": "2"},
  "paths": {
    "/ping": {"get": {"operationId": "ping", "responses": {"204": {"description": "pong"}}}}
  }
}"#,
    )
    .expect("write spec");
    parapet()
        .args(["validate", "--spec"])
        .arg(&spec)
        .assert()
        .success()
        .stdout(contains("✓ GET /ping (ping)"));
}

#[test]
fn validate_unknown_format_exits_one() {
    parapet()
        .args(["validate", "--format", "xml", "--spec"])
        .arg(fixtures_dir().join("people.yaml"))
        .assert()
        .failure()
        .code(1)
        .stderr(contains("unknown output format 'xml'"));
}

#[test]
fn unknown_log_format_exits_one() {
    parapet()
        .args(["--log-format", "xml", "validate", "--spec"])
        .arg(fixtures_dir().join("people.yaml"))
        .assert()
        .failure()
        .code(1)
        .stderr(contains("unknown log format 'xml'"));
}

#[test]
fn json_logs_do_not_pollute_stdout() {
    let output = parapet()
        .env("PARAPET_LOG", "debug")
        .env("PARAPET_LOG_FORMAT", "json")
        .args(["validate", "--format", "json", "--spec"])
        .arg(fixtures_dir().join("people.yaml"))
        .assert()
        .success()
        .stderr(contains("\"event\":\"spec_loaded\""))
        .get_output()
        .stdout
        .clone();

    let v: serde_json::Value =
        serde_json::from_slice(&output).expect("stdout should hold only the JSON report");
    assert_eq!(v["summary"]["passed"], 3);
}

// ---------------------------------------------------------------------------
// parapet test (argument handling; live runs are in `live`)
// ---------------------------------------------------------------------------

#[test]
fn test_requires_server() {
    // clap exits with 2 for missing required arguments
    parapet()
        .args(["test", "--spec"])
        .arg(fixtures_dir().join("people.yaml"))
        .assert()
        .failure()
        .code(2);
}

#[test]
fn test_server_from_environment() {
    parapet()
        .env("PARAPET_SERVER", "ftp://example.com")
        .args(["test", "--spec"])
        .arg(fixtures_dir().join("people.yaml"))
        .assert()
        .failure()
        .code(1)
        .stderr(contains("invalid server URL"));
}

#[test]
fn test_invalid_header_exits_one() {
    parapet()
        .args(["test", "--server", "http://127.0.0.1:1", "-H", "no-colon", "--spec"])
        .arg(fixtures_dir().join("people.yaml"))
        .assert()
        .failure()
        .code(1)
        .stderr(contains("invalid header 'no-colon'"));
}

#[test]
fn test_unreachable_server_reports_error() {
    parapet()
        .args([
            "test",
            "--server",
            "http://127.0.0.1:1",
            "--operation",
            "getPerson",
            "--spec",
        ])
        .arg(fixtures_dir().join("people.yaml"))
        .assert()
        .failure()
        .code(1)
        .stdout(contains("error: group 'default': connection failed"))
        .stdout(contains("(1 with errors)"));
}
