use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A parsed OpenAPI document, reduced to what conformance checking needs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiSpec {
    /// Source filename, set by `parse_spec_file`.
    pub filename: Option<String>,
    /// The `openapi` version string (e.g. "3.0.3").
    pub version: String,
    /// The `info.title` field.
    pub title: String,
    /// The `info.version` field.
    pub api_version: String,
    /// Parsed path operations in document order.
    pub operations: Vec<Operation>,
}

impl ApiSpec {
    /// Look up an operation by its identifier.
    pub fn operation(&self, id: &str) -> Option<&Operation> {
        self.operations.iter().find(|op| op.id == id)
    }
}

/// A single API operation (path + method).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Operation {
    /// `operationId`, or `"METHOD /path"` when the document has none.
    pub id: String,
    /// The path template (e.g. "/users/{id}").
    pub path: String,
    /// The HTTP method (uppercase).
    pub method: String,
    /// Path-level and operation-level parameters, in declaration order.
    pub parameters: Vec<Parameter>,
    /// Status code (or range / `default`) -> response definition.
    pub responses: IndexMap<String, ResponseDefinition>,
}

impl Operation {
    /// Names of the parameters marked `required`, in declaration order.
    pub fn required_parameters(&self) -> impl Iterator<Item = &str> {
        self.parameters
            .iter()
            .filter(|p| p.required)
            .map(|p| p.name.as_str())
    }

    pub fn parameter(&self, name: &str) -> Option<&Parameter> {
        self.parameters.iter().find(|p| p.name == name)
    }

    /// The `Accept` header parameter, if declared. Header names compare
    /// case-insensitively.
    pub fn accept_parameter(&self) -> Option<&Parameter> {
        self.parameters.iter().find(|p| {
            p.location == ParameterLocation::Header && p.name.eq_ignore_ascii_case("accept")
        })
    }
}

/// Where a parameter is carried in the request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    Path,
    #[default]
    Query,
    Header,
    Cookie,
}

impl ParameterLocation {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "path" => Some(Self::Path),
            "query" => Some(Self::Query),
            "header" => Some(Self::Header),
            "cookie" => Some(Self::Cookie),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Path => "path",
            Self::Query => "query",
            Self::Header => "header",
            Self::Cookie => "cookie",
        }
    }
}

impl fmt::Display for ParameterLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parameter declaration, recorded as the document wrote it.
///
/// `schema`/`content` and `example`/`examples` are each meant to be
/// mutually exclusive. The loader keeps both sides when a document sets
/// both so the validator can report it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    pub location: ParameterLocation,
    pub required: bool,
    pub schema: Option<SchemaNode>,
    pub content: Option<IndexMap<String, MediaType>>,
    pub example: Option<Value>,
    /// Named examples. Example Objects are unwrapped to their `value`.
    pub examples: Option<IndexMap<String, Value>>,
}

impl Parameter {
    /// The schema that governs this parameter's values: the direct `schema`,
    /// or the schema of its single `content` entry.
    pub fn effective_schema(&self) -> Option<&SchemaNode> {
        if let Some(schema) = &self.schema {
            return Some(schema);
        }
        let content = self.content.as_ref()?;
        if content.len() != 1 {
            return None;
        }
        content.values().next()?.schema.as_ref()
    }

    /// The value this parameter contributes to every example group when it
    /// is single-valued: an `example`, or an `examples` map with one entry.
    ///
    /// A parameter that sets both `example` and `examples` has no single
    /// value; it only contributes to the groups its `examples` name.
    pub fn single_value(&self) -> Option<&Value> {
        match (&self.example, &self.examples) {
            (Some(example), None) => Some(example),
            (None, Some(examples)) if examples.len() == 1 => examples.values().next(),
            _ => None,
        }
    }
}

/// A response declared for one status key.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResponseDefinition {
    pub description: String,
    /// Media type -> media type object, in declaration order.
    pub content: IndexMap<String, MediaType>,
}

/// A media type object from a `content` map.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MediaType {
    pub schema: Option<SchemaNode>,
}

/// Schema type tags understood by the matcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaType {
    String,
    Number,
    Integer,
    Boolean,
    Object,
    Array,
}

impl SchemaType {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "string" => Some(Self::String),
            "number" => Some(Self::Number),
            "integer" => Some(Self::Integer),
            "boolean" => Some(Self::Boolean),
            "object" => Some(Self::Object),
            "array" => Some(Self::Array),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
            Self::Object => "object",
            Self::Array => "array",
        }
    }
}

impl fmt::Display for SchemaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The subset of a JSON Schema that conformance checking walks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchemaNode {
    #[serde(rename = "type")]
    pub schema_type: Option<SchemaType>,
    pub nullable: bool,
    #[serde(rename = "enum")]
    pub enum_values: Option<Vec<Value>>,
    pub required: Vec<String>,
    pub properties: Option<IndexMap<String, SchemaNode>>,
    pub items: Option<Box<SchemaNode>>,
}

impl SchemaNode {
    /// A schema with only a type tag.
    pub fn typed(schema_type: SchemaType) -> Self {
        Self {
            schema_type: Some(schema_type),
            ..Self::default()
        }
    }
}
