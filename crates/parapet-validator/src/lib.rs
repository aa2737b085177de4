//! Conformance engine for Parapet.
//!
//! Given an [`Operation`](parapet_spec_parser::Operation) from the loader,
//! the validators in this crate check:
//!
//! - that each parameter declaration is well formed ([`ParameterSchemaValidator`]),
//! - that the declared examples, grouped by name ([`ExampleGroupFactory`]),
//!   supply every required parameter and match their schemas
//!   ([`ExampleGroupValidator`]),
//! - that a live response uses a declared status and content type, honours
//!   the `Accept` example and has a body of the declared shape
//!   ([`ResponseValidator`]).
//!
//! Every validator owns a [`Report`] that is rebuilt from scratch on each
//! `validate` call. Diagnostics with identical messages are collapsed in
//! the report's ledgers with an occurrence count.

pub mod diagnostics;
pub mod example_validator;
pub mod examples;
pub mod matcher;
pub mod media_type;
pub mod parameter;
pub mod response;
pub mod value;

pub use diagnostics::{
    Diagnostic, DiagnosticPath, Ledger, LedgerEntry, Report, SchemaContentConflict,
    ValidationFailure, ValidationWarning,
};
pub use example_validator::ExampleGroupValidator;
pub use examples::{ExampleGroup, ExampleGroupFactory, DEFAULT_GROUP};
pub use matcher::match_schema;
pub use parameter::ParameterSchemaValidator;
pub use response::{LiveResponse, ResponseBody, ResponseValidator};
pub use value::ValueType;
