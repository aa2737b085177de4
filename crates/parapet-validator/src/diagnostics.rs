//! Diagnostic types and the deduplicating ledger they are collected in.
//!
//! Every validator reports through the same two enums. A diagnostic's
//! identity is its rendered message: recording the same message twice in
//! one pass bumps a counter instead of adding a second entry.

use std::fmt;

use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use serde_json::Value;
use thiserror::Error;

use parapet_spec_parser::SchemaType;

use crate::value::ValueType;

/// Location of a diagnostic within an operation, e.g.
/// `["parameters", "family", "example"]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct DiagnosticPath(Vec<String>);

impl DiagnosticPath {
    pub fn root() -> Self {
        Self(Vec::new())
    }

    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(segments.into_iter().map(Into::into).collect())
    }

    /// A new path with one more segment appended.
    pub fn child(&self, segment: impl Into<String>) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment.into());
        Self(segments)
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for DiagnosticPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("(root)");
        }
        f.write_str(&self.0.join("."))
    }
}

/// Which half of the schema/content exclusivity rule a parameter broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemaContentConflict {
    /// Neither `schema` nor `content` is set.
    Neither,
    /// Both are set.
    Both,
}

impl fmt::Display for SchemaContentConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Neither => f.write_str("must define either 'schema' or 'content', found neither"),
            Self::Both => f.write_str("must define either 'schema' or 'content', not both"),
        }
    }
}

/// A conformance failure.
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationFailure {
    #[error("{path}: parameter object {conflict}")]
    InvalidParameterObject {
        path: DiagnosticPath,
        conflict: SchemaContentConflict,
    },

    #[error("{path}: content must declare exactly one media type, found {count}")]
    InvalidRequestBodyContent { path: DiagnosticPath, count: usize },

    #[error("{path}: media type object is missing a 'schema'")]
    MissingContentSchemaObject { path: DiagnosticPath },

    #[error("{path}: 'example' and 'examples' are mutually exclusive")]
    InvalidParameterExample { path: DiagnosticPath },

    #[error("{path}: null is not allowed here (schema is not nullable)")]
    NullValueNotAllowed { path: DiagnosticPath },

    #[error("{path}: expected type '{expected}' but found '{actual}'")]
    TypeMismatch {
        path: DiagnosticPath,
        expected: SchemaType,
        actual: ValueType,
    },

    #[error("{path}: enum contains duplicate values {}", render_values(.values))]
    DuplicateEnum {
        path: DiagnosticPath,
        values: Vec<Value>,
    },

    #[error("{path}: value {value} is not one of {}", render_values(.allowed))]
    EnumMismatch {
        path: DiagnosticPath,
        value: Value,
        allowed: Vec<Value>,
    },

    #[error("{path}: missing required property '{name}'")]
    RequiredProperty { path: DiagnosticPath, name: String },

    #[error(
        "{path}: unexpected properties [{}] (schema properties not found: [{}])",
        .unexpected.join(", "),
        .not_found.join(", ")
    )]
    PropertiesMismatch {
        path: DiagnosticPath,
        not_found: Vec<String>,
        unexpected: Vec<String>,
    },

    #[error("missing required parameters: {}", .names.join(", "))]
    MissingRequiredParameters { names: Vec<String> },

    #[error("response status {status} is not declared")]
    StatusCodeMismatch { status: u16 },

    #[error("response content type '{content_type}' is not declared")]
    ContentTypeMismatch { content_type: String },

    #[error(
        "response content type '{content_type}' is not accepted by [{}]",
        .accepted.join(", ")
    )]
    AcceptMismatch {
        accepted: Vec<String>,
        content_type: String,
    },
}

/// A non-fatal observation.
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationWarning {
    #[error("response body ({content_type}) could not be parsed, schema validation skipped")]
    UnparsableBody { content_type: String },
}

fn render_values(values: &[Value]) -> String {
    let rendered: Vec<String> = values.iter().map(|v| v.to_string()).collect();
    format!("[{}]", rendered.join(", "))
}

/// Anything that can be recorded in a [`Ledger`].
pub trait Diagnostic: fmt::Display {
    fn path(&self) -> DiagnosticPath;
}

impl Diagnostic for ValidationFailure {
    fn path(&self) -> DiagnosticPath {
        match self {
            Self::InvalidParameterObject { path, .. }
            | Self::InvalidRequestBodyContent { path, .. }
            | Self::MissingContentSchemaObject { path }
            | Self::InvalidParameterExample { path }
            | Self::NullValueNotAllowed { path }
            | Self::TypeMismatch { path, .. }
            | Self::DuplicateEnum { path, .. }
            | Self::EnumMismatch { path, .. }
            | Self::RequiredProperty { path, .. }
            | Self::PropertiesMismatch { path, .. } => path.clone(),
            Self::MissingRequiredParameters { .. } => DiagnosticPath::from_segments(["parameters"]),
            Self::StatusCodeMismatch { .. } => DiagnosticPath::from_segments(["response", "status"]),
            Self::ContentTypeMismatch { .. } | Self::AcceptMismatch { .. } => {
                DiagnosticPath::from_segments(["response", "headers", "content-type"])
            }
        }
    }
}

impl Diagnostic for ValidationWarning {
    fn path(&self) -> DiagnosticPath {
        match self {
            Self::UnparsableBody { .. } => DiagnosticPath::from_segments(["response", "body"]),
        }
    }
}

/// One deduplicated ledger line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LedgerEntry<T> {
    pub message: String,
    pub path: DiagnosticPath,
    pub count: usize,
    #[serde(rename = "detail")]
    pub diagnostic: T,
}

/// Ordered collection of diagnostics keyed by rendered message.
#[derive(Debug, Clone, PartialEq)]
pub struct Ledger<T> {
    entries: IndexMap<String, LedgerEntry<T>>,
}

impl<T> Default for Ledger<T> {
    fn default() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }
}

impl<T: Diagnostic> Ledger<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a diagnostic, collapsing it into an existing entry with the
    /// same message.
    pub fn record(&mut self, diagnostic: T) {
        self.record_times(diagnostic, 1);
    }

    fn record_times(&mut self, diagnostic: T, count: usize) {
        let message = diagnostic.to_string();
        if let Some(entry) = self.entries.get_mut(&message) {
            entry.count += count;
            return;
        }
        let path = diagnostic.path();
        self.entries.insert(
            message.clone(),
            LedgerEntry {
                message,
                path,
                count,
                diagnostic,
            },
        );
    }

    pub fn get(&self, message: &str) -> Option<&LedgerEntry<T>> {
        self.entries.get(message)
    }
}

impl<T: Diagnostic + Clone> Ledger<T> {
    /// Fold another ledger into this one, adding up counts.
    pub fn merge(&mut self, other: &Ledger<T>) {
        for entry in other.entries.values() {
            self.record_times(entry.diagnostic.clone(), entry.count);
        }
    }
}

impl<T> Ledger<T> {
    /// Number of distinct messages.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all occurrence counts.
    pub fn total(&self) -> usize {
        self.entries.values().map(|e| e.count).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LedgerEntry<T>> {
        self.entries.values()
    }

    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(|k| k.as_str())
    }
}

impl<T: Diagnostic> Extend<T> for Ledger<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for diagnostic in iter {
            self.record(diagnostic);
        }
    }
}

impl<T: Serialize> Serialize for Ledger<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.entries.values())
    }
}

/// Failures and warnings produced by one validation pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Report {
    pub failures: Ledger<ValidationFailure>,
    pub warnings: Ledger<ValidationWarning>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no failures were recorded. Warnings do not count.
    pub fn is_ok(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn fail(&mut self, failure: ValidationFailure) {
        self.failures.record(failure);
    }

    pub fn warn(&mut self, warning: ValidationWarning) {
        self.warnings.record(warning);
    }

    pub fn merge(&mut self, other: &Report) {
        self.failures.merge(&other.failures);
        self.warnings.merge(&other.warnings);
    }
}
