//! Mock server and fixture helpers.

use std::path::{Path, PathBuf};

use serde_json::Value;
use tempfile::TempDir;
use thiserror::Error;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Errors from the test harness.
#[derive(Debug, Error)]
pub enum TestError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("fixture not found: {0}")]
    FixtureNotFound(PathBuf),
}

/// Absolute path to the shared fixtures directory (`<workspace>/tests/fixtures`).
pub fn fixtures_dir() -> PathBuf {
    // CARGO_MANIFEST_DIR = .../crates/parapet-test
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../../tests/fixtures")
}

/// Path to a named fixture, checked to exist.
pub fn fixture(name: &str) -> Result<PathBuf, TestError> {
    let path = fixtures_dir().join(name);
    if path.is_file() {
        Ok(path)
    } else {
        Err(TestError::FixtureNotFound(path))
    }
}

/// Write `contents` to `name` inside `dir` and return the file path.
pub fn write_spec(dir: &TempDir, name: &str, contents: &str) -> Result<PathBuf, TestError> {
    let path = dir.path().join(name);
    std::fs::write(&path, contents)?;
    Ok(path)
}

/// A mock of the API under test.
///
/// Requests with no mounted response get a 404 from the underlying server.
pub struct MockApi {
    server: MockServer,
}

impl MockApi {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Base URL to pass as `--server`.
    pub fn uri(&self) -> String {
        self.server.uri()
    }

    /// Answer `verb path` with a JSON body.
    pub async fn json(&self, verb: &str, route: &str, status: u16, body: Value) {
        Mock::given(method(verb))
            .and(path(route))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// Answer `verb path` with a raw body of the given content type.
    pub async fn raw(&self, verb: &str, route: &str, status: u16, content_type: &str, body: &str) {
        Mock::given(method(verb))
            .and(path(route))
            .respond_with(
                ResponseTemplate::new(status).set_body_raw(body.as_bytes().to_vec(), content_type),
            )
            .mount(&self.server)
            .await;
    }

    /// Answer `verb path` with a status and no body.
    pub async fn empty(&self, verb: &str, route: &str, status: u16) {
        Mock::given(method(verb))
            .and(path(route))
            .respond_with(ResponseTemplate::new(status))
            .mount(&self.server)
            .await;
    }

    /// Number of requests the server has seen.
    pub async fn request_count(&self) -> usize {
        self.server
            .received_requests()
            .await
            .map(|requests| requests.len())
            .unwrap_or_default()
    }
}
