//! Parapet library.
//!
//! Orchestrates the conformance engine over a whole API description and
//! renders the results. The main entry point is the `parapet` binary.

pub mod report;
pub mod session;

pub use report::{render_json, render_text, OutputFormat, RunSummary};
pub use session::{
    check_examples, check_live, run_live, run_validate, select_operations, GroupOutcome,
    OperationReport, SessionError,
};
