//! Checks an assembled example group against its operation.

use parapet_spec_parser::Operation;

use crate::diagnostics::{DiagnosticPath, Report, ValidationFailure};
use crate::examples::ExampleGroup;
use crate::matcher::match_schema;

/// Validates that an example group supplies every required parameter and
/// that each supplied value matches the parameter's schema.
#[derive(Debug, Default)]
pub struct ExampleGroupValidator {
    report: Report,
}

impl ExampleGroupValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate `group` against `operation`, replacing the previous report.
    pub fn validate(&mut self, group: &ExampleGroup, operation: &Operation) -> &Report {
        if group.operation_id() != operation.id {
            tracing::warn!(
                group = group.name(),
                group_operation = group.operation_id(),
                operation = %operation.id,
                "example group validated against a different operation"
            );
        }

        let mut report = Report::new();

        let mut missing: Vec<String> = operation
            .required_parameters()
            .filter(|name| !group.contains(name))
            .map(String::from)
            .collect();
        missing.sort();
        missing.dedup();
        if !missing.is_empty() {
            report.fail(ValidationFailure::MissingRequiredParameters { names: missing });
        }

        for (name, value) in group.values() {
            let Some(schema) = operation.parameter(name).and_then(|p| p.effective_schema())
            else {
                continue;
            };
            let path = DiagnosticPath::from_segments(["parameters", name.as_str(), "example"]);
            report.failures.extend(match_schema(schema, value, &path));
        }

        tracing::debug!(
            operation = %operation.id,
            group = group.name(),
            failures = report.failures.len(),
            "validated example group"
        );

        self.report = report;
        &self.report
    }

    /// The report of the last `validate` call.
    pub fn report(&self) -> &Report {
        &self.report
    }
}
