//! Per-operation orchestration of the conformance checks.
//!
//! `validate` runs only the document-level checks (parameter shapes and
//! example groups). `test` additionally sends every example group to a
//! live server and checks the responses. Operations run concurrently with
//! a bounded stream; each operation owns its validators and report.

use futures_util::stream::{self, StreamExt};
use serde::Serialize;
use thiserror::Error;

use parapet_http::{curl_command, HttpExecutor};
use parapet_spec_parser::{ApiSpec, Operation};
use parapet_telemetry::{
    log_operation_checked, log_response_received, log_transport_error,
};
use parapet_validator::{
    ExampleGroup, ExampleGroupFactory, ExampleGroupValidator, Ledger, ParameterSchemaValidator,
    Report, ResponseValidator, ValidationFailure, ValidationWarning,
};

/// Session errors.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("unknown operation '{0}'")]
    UnknownOperation(String),
}

/// Outcome of one example group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupOutcome {
    pub name: String,
    /// Failures recorded while checking this group, counting repeats.
    pub failures: usize,
    /// Live response status, when the group was sent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    /// Request that produced a failing response.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub curl: Option<String>,
}

/// Aggregated result for one operation.
#[derive(Debug, Clone, Serialize)]
pub struct OperationReport {
    pub operation: String,
    pub method: String,
    pub path: String,
    pub groups: Vec<GroupOutcome>,
    pub failures: Ledger<ValidationFailure>,
    pub warnings: Ledger<ValidationWarning>,
    /// Set when the operation could not be completed (e.g. the server
    /// was unreachable).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl OperationReport {
    fn new(operation: &Operation) -> Self {
        Self {
            operation: operation.id.clone(),
            method: operation.method.clone(),
            path: operation.path.clone(),
            groups: Vec::new(),
            failures: Ledger::new(),
            warnings: Ledger::new(),
            error: None,
        }
    }

    fn absorb(&mut self, report: &Report) {
        self.failures.merge(&report.failures);
        self.warnings.merge(&report.warnings);
    }

    /// No failures and no error. Warnings do not count.
    pub fn is_ok(&self) -> bool {
        self.failures.is_empty() && self.error.is_none()
    }
}

/// The operations to check: all of them, or those named in `ids`
/// (in document order).
pub fn select_operations<'a>(
    spec: &'a ApiSpec,
    ids: &[String],
) -> Result<Vec<&'a Operation>, SessionError> {
    if ids.is_empty() {
        return Ok(spec.operations.iter().collect());
    }
    if let Some(unknown) = ids.iter().find(|id| spec.operation(id).is_none()) {
        return Err(SessionError::UnknownOperation(unknown.clone()));
    }
    Ok(spec
        .operations
        .iter()
        .filter(|op| ids.contains(&op.id))
        .collect())
}

/// Check parameter declarations and every example group of `operation`.
pub fn check_examples(operation: &Operation) -> OperationReport {
    let (report, _) = example_pass(operation);
    log_checked(&report);
    report
}

/// Check the examples of `operation`, then send each group to the server
/// and validate the responses. A transport error ends the operation.
pub async fn check_live(executor: &HttpExecutor, operation: &Operation) -> OperationReport {
    let (mut report, groups) = example_pass(operation);
    let mut validator = ResponseValidator::new();

    for (index, group) in groups.iter().enumerate() {
        let request = match executor.prepare(operation, group) {
            Ok(request) => request,
            Err(e) => {
                tracing::warn!(operation = %operation.id, group = group.name(), error = %e, "cannot build request");
                report.error = Some(format!("group '{}': {}", group.name(), e));
                break;
            }
        };

        let response = match executor.send(&request).await {
            Ok(response) => response,
            Err(e) => {
                log_transport_error!(
                    operation = %operation.id,
                    group = group.name(),
                    url = %request.url,
                    error = %e
                );
                report.error = Some(format!("group '{}': {}", group.name(), e));
                break;
            }
        };
        log_response_received!(
            operation = %operation.id,
            group = group.name(),
            status = response.status
        );

        let result = validator.validate_for_group(operation, Some(group), &response);
        if let Some(outcome) = report.groups.get_mut(index) {
            outcome.status = Some(response.status);
            outcome.failures += result.failures.total();
            if !result.is_ok() {
                outcome.curl = Some(curl_command(&request));
            }
        }
        report.absorb(result);
    }

    log_checked(&report);
    report
}

/// Document-level checks for every selected operation.
pub fn run_validate(operations: &[&Operation]) -> Vec<OperationReport> {
    operations.iter().map(|op| check_examples(op)).collect()
}

/// Live checks for every selected operation, at most `concurrency` at a
/// time. Reports come back in input order.
pub async fn run_live(
    executor: &HttpExecutor,
    operations: &[&Operation],
    concurrency: usize,
) -> Vec<OperationReport> {
    stream::iter(operations.iter().copied())
        .map(|op| check_live(executor, op))
        .buffered(concurrency.max(1))
        .collect()
        .await
}

fn example_pass(operation: &Operation) -> (OperationReport, Vec<ExampleGroup>) {
    let mut report = OperationReport::new(operation);

    let mut parameters = ParameterSchemaValidator::new();
    report.absorb(parameters.validate(operation));

    let groups = ExampleGroupFactory::build_from_operation(operation);
    let mut examples = ExampleGroupValidator::new();
    for group in &groups {
        let result = examples.validate(group, operation);
        report.groups.push(GroupOutcome {
            name: group.name().to_string(),
            failures: result.failures.total(),
            status: None,
            curl: None,
        });
        report.absorb(result);
    }

    (report, groups)
}

fn log_checked(report: &OperationReport) {
    log_operation_checked!(
        operation = %report.operation,
        groups = report.groups.len(),
        failures = report.failures.total(),
        warnings = report.warnings.total(),
        ok = report.is_ok()
    );
}
