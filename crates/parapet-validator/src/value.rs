//! Runtime type classification for JSON-like values.

use std::fmt;

use serde::Serialize;
use serde_json::Value;

use parapet_spec_parser::SchemaType;

/// The runtime type of a value, as seen by the schema matcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    Null,
    Boolean,
    Integer,
    Number,
    String,
    Array,
    Object,
}

impl ValueType {
    /// Classify a value. Numbers with a zero fractional part are integers.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Boolean,
            Value::Number(n) => {
                let whole = n.is_i64()
                    || n.is_u64()
                    || n.as_f64().is_some_and(|f| f.is_finite() && f.fract() == 0.0);
                if whole {
                    Self::Integer
                } else {
                    Self::Number
                }
            }
            Value::String(_) => Self::String,
            Value::Array(_) => Self::Array,
            Value::Object(_) => Self::Object,
        }
    }

    /// Whether a value of this type is acceptable where `schema_type` is declared.
    pub fn satisfies(self, schema_type: SchemaType) -> bool {
        matches!(
            (self, schema_type),
            (Self::String, SchemaType::String)
                | (Self::Integer, SchemaType::Integer)
                | (Self::Integer | Self::Number, SchemaType::Number)
                | (Self::Boolean, SchemaType::Boolean)
                | (Self::Array, SchemaType::Array)
                | (Self::Object, SchemaType::Object)
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Boolean => "boolean",
            Self::Integer => "integer",
            Self::Number => "number",
            Self::String => "string",
            Self::Array => "array",
            Self::Object => "object",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Literal equality for enum checks. Numbers compare by value, so `1`
/// and `1.0` are the same literal.
pub fn literal_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => match (x.as_f64(), y.as_f64()) {
            (Some(x), Some(y)) => x == y,
            _ => x == y,
        },
        _ => a == b,
    }
}
