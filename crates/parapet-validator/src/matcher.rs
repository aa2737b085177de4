//! Structural comparison of a runtime value against a schema node.
//!
//! Walks the value depth-first, guided by the schema. Only `type`,
//! `nullable`, `enum`, `required`, `properties` and `items` are checked.
//! A null or a type mismatch ends the walk at that node. Every other
//! problem is collected and the walk continues.

use serde_json::{Map, Value};

use parapet_spec_parser::SchemaNode;

use crate::diagnostics::{DiagnosticPath, ValidationFailure};
use crate::value::{literal_eq, ValueType};

/// Match `value` against `schema`, returning every failure found below `path`.
pub fn match_schema(
    schema: &SchemaNode,
    value: &Value,
    path: &DiagnosticPath,
) -> Vec<ValidationFailure> {
    let mut failures = Vec::new();
    walk(schema, value, path, &mut failures);
    failures
}

fn walk(
    schema: &SchemaNode,
    value: &Value,
    path: &DiagnosticPath,
    failures: &mut Vec<ValidationFailure>,
) {
    if value.is_null() {
        if !schema.nullable {
            failures.push(ValidationFailure::NullValueNotAllowed { path: path.clone() });
        }
        return;
    }

    let actual = ValueType::of(value);
    if let Some(expected) = schema.schema_type {
        if !actual.satisfies(expected) {
            failures.push(ValidationFailure::TypeMismatch {
                path: path.clone(),
                expected,
                actual,
            });
            return;
        }
    }

    if let Some(allowed) = &schema.enum_values {
        check_enum(allowed, value, path, failures);
    }

    match value {
        Value::Object(map) => check_object(schema, map, path, failures),
        Value::Array(elements) => {
            if let Some(items) = &schema.items {
                for (index, element) in elements.iter().enumerate() {
                    walk(items, element, &path.child(index.to_string()), failures);
                }
            }
        }
        _ => {}
    }
}

fn check_enum(
    allowed: &[Value],
    value: &Value,
    path: &DiagnosticPath,
    failures: &mut Vec<ValidationFailure>,
) {
    let duplicates = duplicate_literals(allowed);
    if !duplicates.is_empty() {
        failures.push(ValidationFailure::DuplicateEnum {
            path: path.clone(),
            values: duplicates,
        });
    }

    if !allowed.iter().any(|candidate| literal_eq(candidate, value)) {
        failures.push(ValidationFailure::EnumMismatch {
            path: path.clone(),
            value: value.clone(),
            allowed: allowed.to_vec(),
        });
    }
}

/// Values that appear more than once, each reported once, in first-seen order.
fn duplicate_literals(values: &[Value]) -> Vec<Value> {
    let mut duplicates: Vec<Value> = Vec::new();
    for (index, value) in values.iter().enumerate() {
        let seen_before = values[..index].iter().any(|v| literal_eq(v, value));
        let already_reported = duplicates.iter().any(|v| literal_eq(v, value));
        if seen_before && !already_reported {
            duplicates.push(value.clone());
        }
    }
    duplicates
}

fn check_object(
    schema: &SchemaNode,
    object: &Map<String, Value>,
    path: &DiagnosticPath,
    failures: &mut Vec<ValidationFailure>,
) {
    for name in &schema.required {
        if !object.contains_key(name) {
            failures.push(ValidationFailure::RequiredProperty {
                path: path.clone(),
                name: name.clone(),
            });
        }
    }

    // Without declared properties the object shape is open.
    let Some(properties) = &schema.properties else {
        return;
    };

    let unexpected: Vec<String> = object
        .keys()
        .filter(|key| !properties.contains_key(*key))
        .cloned()
        .collect();

    if !unexpected.is_empty() {
        let mut not_found: Vec<String> = properties
            .keys()
            .filter(|name| !object.contains_key(*name))
            .cloned()
            .collect();
        for name in &schema.required {
            if !object.contains_key(name) && !not_found.contains(name) {
                not_found.push(name.clone());
            }
        }
        failures.push(ValidationFailure::PropertiesMismatch {
            path: path.clone(),
            not_found,
            unexpected,
        });
    }

    for (name, value) in object {
        if let Some(property_schema) = properties.get(name) {
            walk(property_schema, value, &path.child(name.as_str()), failures);
        }
    }
}
