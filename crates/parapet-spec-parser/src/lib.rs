//! OpenAPI 3.x loader for Parapet.
//!
//! Reads YAML/JSON documents and projects each path operation into the
//! read-only model the conformance engine walks: parameters with their
//! schemas and examples, and responses with their content schemas.
//! Local `$ref` pointers are inlined while loading.

pub mod error;
pub mod model;
pub mod parser;

pub use error::ParseError;
pub use model::{
    ApiSpec, MediaType, Operation, Parameter, ParameterLocation, ResponseDefinition, SchemaNode,
    SchemaType,
};
pub use parser::{parse_spec, parse_spec_file};
