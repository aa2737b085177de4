use thiserror::Error;

/// Errors produced while loading an API document.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The document is not OpenAPI 3.x.
    #[error("not a valid OpenAPI 3.x document")]
    UnknownFormat,

    /// YAML/JSON syntax error.
    #[error("parse error: {0}")]
    ParseError(String),

    /// A local `$ref` points nowhere.
    #[error("unresolved $ref: {0}")]
    UnresolvedRef(String),

    /// The document is well-formed YAML/JSON but not a usable OpenAPI structure.
    #[error("schema error: {0}")]
    SchemaError(String),

    /// The file extension is not one we know how to read.
    #[error("unsupported file extension: {0}")]
    UnsupportedExtension(String),

    /// I/O error reading the spec file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
