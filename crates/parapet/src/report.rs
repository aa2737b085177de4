//! Text and JSON rendering of operation reports.

use std::fmt::Write;

use serde::Serialize;
use serde_json::Value;

use crate::session::OperationReport;

/// Report output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    /// Parse from string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "text" => Some(Self::Text),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Counts over a whole run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub operations: usize,
    pub passed: usize,
    pub failed: usize,
    /// Operations that ended with an error.
    pub errored: usize,
    /// Distinct failure messages across all operations.
    pub failures: usize,
    pub warnings: usize,
}

impl RunSummary {
    pub fn from_reports(reports: &[OperationReport]) -> Self {
        let mut summary = Self {
            operations: reports.len(),
            ..Self::default()
        };
        for report in reports {
            if report.is_ok() {
                summary.passed += 1;
            } else {
                summary.failed += 1;
            }
            if report.error.is_some() {
                summary.errored += 1;
            }
            summary.failures += report.failures.len();
            summary.warnings += report.warnings.len();
        }
        summary
    }

    pub fn is_ok(&self) -> bool {
        self.failed == 0
    }
}

/// Human-readable report.
pub fn render_text(title: &str, reports: &[OperationReport]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", title);

    for report in reports {
        let label = format!("{} {} ({})", report.method, report.path, report.operation);
        if report.is_ok() && report.warnings.is_empty() {
            let _ = writeln!(out, "✓ {}", label);
        } else if report.is_ok() {
            let _ = writeln!(out, "✓ {} (with {} warning(s))", label, report.warnings.len());
        } else {
            let _ = writeln!(out, "✗ {}: {} failure(s)", label, report.failures.len());
        }

        for entry in report.failures.iter() {
            let _ = writeln!(out, "  {}{}", entry.message, repeat_suffix(entry.count));
        }
        for entry in report.warnings.iter() {
            let _ = writeln!(
                out,
                "  {}{} (warning)",
                entry.message,
                repeat_suffix(entry.count)
            );
        }
        for group in report.groups.iter().filter(|g| g.failures > 0) {
            if let Some(curl) = &group.curl {
                let _ = writeln!(out, "  reproduce '{}': {}", group.name, curl);
            }
        }
        if let Some(error) = &report.error {
            let _ = writeln!(out, "  error: {}", error);
        }
    }

    let summary = RunSummary::from_reports(reports);
    let _ = writeln!(out);
    let _ = write!(
        out,
        "checked {} operation(s): {} passed, {} failed",
        summary.operations, summary.passed, summary.failed
    );
    if summary.errored > 0 {
        let _ = write!(out, " ({} with errors)", summary.errored);
    }
    let _ = writeln!(out);
    out
}

/// Machine-readable report.
pub fn render_json(title: &str, reports: &[OperationReport]) -> Value {
    serde_json::json!({
        "title": title,
        "operations": reports,
        "summary": RunSummary::from_reports(reports),
    })
}

fn repeat_suffix(count: usize) -> String {
    if count > 1 {
        format!(" (x{})", count)
    } else {
        String::new()
    }
}
