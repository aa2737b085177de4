//! Checks live responses against an operation's declared responses.

use std::collections::HashMap;

use serde::Serialize;
use serde_json::Value;

use parapet_spec_parser::{MediaType, Operation, ResponseDefinition};

use crate::diagnostics::{DiagnosticPath, Report, ValidationFailure, ValidationWarning};
use crate::examples::ExampleGroup;
use crate::matcher::match_schema;
use crate::media_type::{essence, matches, parse_accept};

/// Rendered in place of a missing `Content-Type` header.
const NO_CONTENT_TYPE: &str = "(none)";

/// Response body as delivered by the HTTP client.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ResponseBody {
    /// JSON or YAML that parsed cleanly.
    Parsed(Value),
    /// Anything else, kept as text.
    Raw(String),
    Empty,
}

/// A response received from the server under test.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LiveResponse {
    pub ok: bool,
    pub status: u16,
    pub url: String,
    /// Header name (lowercase) -> value.
    pub headers: HashMap<String, String>,
    pub body: ResponseBody,
}

impl LiveResponse {
    /// A response with no headers and an empty body.
    pub fn new(status: u16, url: impl Into<String>) -> Self {
        Self {
            ok: (200..300).contains(&status),
            status,
            url: url.into(),
            headers: HashMap::new(),
            body: ResponseBody::Empty,
        }
    }

    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.insert(name.to_ascii_lowercase(), value.into());
        self
    }

    pub fn with_body(mut self, body: ResponseBody) -> Self {
        self.body = body;
        self
    }

    /// Header lookup, ignoring case.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Media type essence of the `Content-Type` header.
    pub fn content_type(&self) -> Option<String> {
        self.header("content-type").map(essence)
    }
}

/// Validates a live response: declared status, declared content type,
/// compatibility with the `Accept` example and the body's structure.
#[derive(Debug, Default)]
pub struct ResponseValidator {
    report: Report,
}

impl ResponseValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate `response` against `operation`, replacing the previous report.
    pub fn validate(&mut self, operation: &Operation, response: &LiveResponse) -> &Report {
        self.validate_for_group(operation, None, response)
    }

    /// Like [`validate`](Self::validate), but the `Accept` check uses the
    /// value `group` actually sent when it has one.
    pub fn validate_for_group(
        &mut self,
        operation: &Operation,
        group: Option<&ExampleGroup>,
        response: &LiveResponse,
    ) -> &Report {
        let mut report = Report::new();
        check_response(operation, group, response, &mut report);

        tracing::debug!(
            operation = %operation.id,
            status = response.status,
            failures = report.failures.len(),
            warnings = report.warnings.len(),
            "validated response"
        );

        self.report = report;
        &self.report
    }

    /// The report of the last validation.
    pub fn report(&self) -> &Report {
        &self.report
    }
}

fn check_response(
    operation: &Operation,
    group: Option<&ExampleGroup>,
    response: &LiveResponse,
    report: &mut Report,
) {
    let Some(definition) = response_definition(operation, response.status) else {
        report.fail(ValidationFailure::StatusCodeMismatch {
            status: response.status,
        });
        return;
    };

    let received = response.content_type();

    // No content declared and none sent: nothing to compare.
    if definition.content.is_empty() && received.is_none() {
        return;
    }

    let media = received
        .as_deref()
        .and_then(|content_type| declared_media(definition, content_type));
    let content_type = received
        .clone()
        .unwrap_or_else(|| NO_CONTENT_TYPE.to_string());
    if media.is_none() {
        report.fail(ValidationFailure::ContentTypeMismatch {
            content_type: content_type.clone(),
        });
    }

    if let Some(accept) = accept_value(operation, group) {
        let accepted = parse_accept(&accept);
        let satisfied = received.as_deref().is_some_and(|received| {
            accepted.iter().any(|pattern| matches(pattern, received))
        });
        if !satisfied {
            report.fail(ValidationFailure::AcceptMismatch {
                accepted,
                content_type: content_type.clone(),
            });
        }
    }

    let Some(schema) = media.and_then(|m| m.schema.as_ref()) else {
        return;
    };
    match &response.body {
        ResponseBody::Parsed(value) => {
            let path = DiagnosticPath::from_segments(["response", "body"]);
            report.failures.extend(match_schema(schema, value, &path));
        }
        ResponseBody::Raw(_) | ResponseBody::Empty => {
            report.warn(ValidationWarning::UnparsableBody { content_type });
        }
    }
}

/// Exact status code, then its range key (`4XX`), then `default`.
fn response_definition(operation: &Operation, status: u16) -> Option<&ResponseDefinition> {
    let exact = status.to_string();
    let range = format!("{}XX", status / 100);
    operation
        .responses
        .get(&exact)
        .or_else(|| {
            operation
                .responses
                .iter()
                .find(|(key, _)| key.eq_ignore_ascii_case(&range))
                .map(|(_, definition)| definition)
        })
        .or_else(|| operation.responses.get("default"))
}

fn declared_media<'a>(definition: &'a ResponseDefinition, content_type: &str) -> Option<&'a MediaType> {
    definition
        .content
        .iter()
        .find(|(declared, _)| matches(declared, content_type))
        .map(|(_, media)| media)
}

/// The `Accept` value to check against: the group's when it sent one,
/// otherwise the parameter's single example.
fn accept_value(operation: &Operation, group: Option<&ExampleGroup>) -> Option<String> {
    let parameter = operation.accept_parameter()?;
    let value = group
        .and_then(|g| g.get(&parameter.name))
        .or_else(|| parameter.single_value())?;
    match value {
        Value::String(accept) => Some(accept.clone()),
        Value::Array(items) => {
            let parts: Vec<&str> = items.iter().filter_map(Value::as_str).collect();
            (!parts.is_empty()).then(|| parts.join(","))
        }
        _ => None,
    }
}
