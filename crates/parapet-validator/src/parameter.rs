//! Shape checks for parameter declarations.

use parapet_spec_parser::{Operation, Parameter};

use crate::diagnostics::{DiagnosticPath, Report, SchemaContentConflict, ValidationFailure};

/// Checks that each parameter of an operation is a well-formed parameter
/// object: exactly one of `schema`/`content`, a single-entry `content` map
/// carrying a schema, and not both `example` and `examples`.
#[derive(Debug, Default)]
pub struct ParameterSchemaValidator {
    report: Report,
}

impl ParameterSchemaValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check every parameter of `operation`, replacing the previous report.
    pub fn validate(&mut self, operation: &Operation) -> &Report {
        let mut report = Report::new();
        for parameter in &operation.parameters {
            check_parameter(parameter, &mut report);
        }

        tracing::debug!(
            operation = %operation.id,
            parameters = operation.parameters.len(),
            failures = report.failures.len(),
            "checked parameter declarations"
        );

        self.report = report;
        &self.report
    }

    /// The report of the last `validate` call.
    pub fn report(&self) -> &Report {
        &self.report
    }
}

fn check_parameter(parameter: &Parameter, report: &mut Report) {
    let path = DiagnosticPath::from_segments(["parameters", parameter.name.as_str()]);

    match (&parameter.schema, &parameter.content) {
        (None, None) => report.fail(ValidationFailure::InvalidParameterObject {
            path: path.clone(),
            conflict: SchemaContentConflict::Neither,
        }),
        (Some(_), Some(_)) => report.fail(ValidationFailure::InvalidParameterObject {
            path: path.clone(),
            conflict: SchemaContentConflict::Both,
        }),
        _ => {}
    }

    if let Some(content) = &parameter.content {
        if content.len() != 1 {
            report.fail(ValidationFailure::InvalidRequestBodyContent {
                path: path.child("content"),
                count: content.len(),
            });
        } else if let Some((media_type, media)) = content.first() {
            if media.schema.is_none() {
                report.fail(ValidationFailure::MissingContentSchemaObject {
                    path: path.child("content").child(media_type.as_str()),
                });
            }
        }
    }

    if parameter.example.is_some() && parameter.examples.is_some() {
        report.fail(ValidationFailure::InvalidParameterExample { path });
    }
}
