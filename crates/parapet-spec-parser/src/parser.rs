use std::collections::HashSet;
use std::path::Path;

use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::error::ParseError;
use crate::model::{
    ApiSpec, MediaType, Operation, Parameter, ParameterLocation, ResponseDefinition, SchemaNode,
    SchemaType,
};

/// HTTP methods we recognize in OpenAPI paths.
const HTTP_METHODS: &[&str] = &[
    "get", "post", "put", "delete", "patch", "head", "options", "trace",
];

/// Resolve a JSON Reference like `#/components/schemas/User` from the document root.
///
/// Only local references (`#/...`) are supported. Returns `None` for external refs.
fn resolve_ref<'a>(root: &'a Value, ref_path: &str) -> Option<&'a Value> {
    let pointer = ref_path.strip_prefix("#/")?;
    let mut current = root;
    for segment in pointer.split('/') {
        let unescaped = segment.replace("~1", "/").replace("~0", "~");
        current = current.get(&unescaped)?;
    }
    Some(current)
}

/// Recursively inline every `$ref` in a value.
///
/// `visited` holds the current resolution chain so that circular references
/// are reported instead of recursing forever.
fn resolve_refs(
    value: &Value,
    root: &Value,
    visited: &mut HashSet<String>,
) -> Result<Value, ParseError> {
    match value {
        Value::Object(obj) => {
            if let Some(ref_str) = obj.get("$ref").and_then(|v| v.as_str()) {
                if !visited.insert(ref_str.to_string()) {
                    return Err(ParseError::SchemaError(format!(
                        "circular $ref detected: {}",
                        ref_str
                    )));
                }
                let target = resolve_ref(root, ref_str)
                    .ok_or_else(|| ParseError::UnresolvedRef(ref_str.to_string()))?;
                let resolved = resolve_refs(target, root, visited)?;
                visited.remove(ref_str);
                Ok(resolved)
            } else {
                let mut new_obj = Map::with_capacity(obj.len());
                for (key, val) in obj {
                    new_obj.insert(key.clone(), resolve_refs(val, root, visited)?);
                }
                Ok(Value::Object(new_obj))
            }
        }
        Value::Array(arr) => {
            let items: Result<Vec<_>, _> = arr
                .iter()
                .map(|v| resolve_refs(v, root, visited))
                .collect();
            Ok(Value::Array(items?))
        }
        other => Ok(other.clone()),
    }
}

/// Parse an OpenAPI 3.x document from a YAML or JSON string.
pub fn parse_spec(input: &str) -> Result<ApiSpec, ParseError> {
    // JSON is valid YAML, so one parser covers both.
    let yaml: serde_yaml::Value =
        serde_yaml::from_str(input).map_err(|e| ParseError::ParseError(e.to_string()))?;
    let root = yaml_to_json(yaml)?;

    let root_obj = root
        .as_object()
        .ok_or_else(|| ParseError::ParseError("document root must be an object".into()))?;

    let version = detect_version(root_obj)?;

    let info = root_obj
        .get("info")
        .and_then(|v| v.as_object())
        .ok_or_else(|| ParseError::SchemaError("missing 'info' object".into()))?;

    let title = info
        .get("title")
        .and_then(|v| v.as_str())
        .ok_or_else(|| ParseError::SchemaError("missing 'info.title'".into()))?
        .to_string();

    let api_version = info
        .get("version")
        .and_then(|v| v.as_str())
        .unwrap_or("0.0.0")
        .to_string();

    let operations = parse_paths(&root)?;

    tracing::debug!(
        title = %title,
        operations = operations.len(),
        "parsed OpenAPI document"
    );

    Ok(ApiSpec {
        filename: None,
        version,
        title,
        api_version,
        operations,
    })
}

/// Convert a YAML tree to JSON. Scalar mapping keys (such as unquoted
/// status codes) become strings.
fn yaml_to_json(value: serde_yaml::Value) -> Result<Value, ParseError> {
    use serde_yaml::Value as Yaml;

    Ok(match value {
        Yaml::Null => Value::Null,
        Yaml::Bool(b) => Value::Bool(b),
        Yaml::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::from(i)
            } else if let Some(u) = n.as_u64() {
                Value::from(u)
            } else {
                n.as_f64()
                    .and_then(serde_json::Number::from_f64)
                    .map(Value::Number)
                    .ok_or_else(|| ParseError::ParseError(format!("unsupported number: {}", n)))?
            }
        }
        Yaml::String(s) => Value::String(s),
        Yaml::Sequence(items) => Value::Array(
            items
                .into_iter()
                .map(yaml_to_json)
                .collect::<Result<_, _>>()?,
        ),
        Yaml::Mapping(mapping) => {
            let mut obj = Map::with_capacity(mapping.len());
            for (key, val) in mapping {
                let key = match key {
                    Yaml::String(s) => s,
                    Yaml::Number(n) => n.to_string(),
                    Yaml::Bool(b) => b.to_string(),
                    other => {
                        return Err(ParseError::ParseError(format!(
                            "unsupported mapping key: {:?}",
                            other
                        )))
                    }
                };
                obj.insert(key, yaml_to_json(val)?);
            }
            Value::Object(obj)
        }
        Yaml::Tagged(tagged) => yaml_to_json(tagged.value)?,
    })
}

/// Parse a document from a file path. Accepts `.yaml`, `.yml` and `.json`.
pub fn parse_spec_file(path: &Path) -> Result<ApiSpec, ParseError> {
    let extension = path
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_ascii_lowercase())
        .unwrap_or_default();
    if !matches!(extension.as_str(), "yaml" | "yml" | "json") {
        return Err(ParseError::UnsupportedExtension(path.display().to_string()));
    }

    let content = std::fs::read_to_string(path)?;
    let mut spec = parse_spec(&content)?;
    spec.filename = path
        .file_name()
        .and_then(|s| s.to_str())
        .map(|s| s.to_string());
    Ok(spec)
}

/// Check the root `openapi` field and return its version.
fn detect_version(root: &Map<String, Value>) -> Result<String, ParseError> {
    if let Some(version) = root.get("openapi").and_then(|v| v.as_str()) {
        if !version.starts_with("3.") {
            return Err(ParseError::SchemaError(format!(
                "unsupported OpenAPI version: {} (only 3.x supported)",
                version
            )));
        }
        Ok(version.to_string())
    } else if root.contains_key("swagger") {
        Err(ParseError::SchemaError(
            "Swagger 2.0 documents are not supported (only OpenAPI 3.x)".into(),
        ))
    } else {
        Err(ParseError::UnknownFormat)
    }
}

/// Parse `paths` into operations.
fn parse_paths(root: &Value) -> Result<Vec<Operation>, ParseError> {
    let mut operations = Vec::new();

    let paths = match root.get("paths").and_then(|v| v.as_object()) {
        Some(p) => p,
        None => return Ok(operations),
    };

    for (path, path_item) in paths {
        let path_obj = path_item.as_object().ok_or_else(|| {
            ParseError::SchemaError(format!("path item for '{}' must be an object", path))
        })?;

        let path_params = parse_parameters(path_obj, root, path)?;

        for method in HTTP_METHODS {
            let Some(op_value) = path_obj.get(*method) else {
                continue;
            };
            let method = method.to_uppercase();
            let op_obj = op_value.as_object().ok_or_else(|| {
                ParseError::SchemaError(format!("operation {} {} must be an object", method, path))
            })?;

            let context = format!("{} {}", method, path);
            let parameters = merge_parameters(&path_params, parse_parameters(op_obj, root, &context)?);
            let responses = parse_responses(op_obj, root, &context)?;

            let id = op_obj
                .get("operationId")
                .and_then(|v| v.as_str())
                .map(|s| s.to_string())
                .unwrap_or_else(|| context.clone());

            operations.push(Operation {
                id,
                path: path.clone(),
                method,
                parameters,
                responses,
            });
        }
    }

    Ok(operations)
}

/// Operation-level parameters override path-level ones with the same name and location.
fn merge_parameters(path_params: &[Parameter], op_params: Vec<Parameter>) -> Vec<Parameter> {
    let mut merged: Vec<Parameter> = path_params
        .iter()
        .filter(|pp| {
            !op_params
                .iter()
                .any(|op| op.name == pp.name && op.location == pp.location)
        })
        .cloned()
        .collect();
    merged.extend(op_params);
    merged
}

/// Parse the `parameters` array of a path item or operation.
fn parse_parameters(
    obj: &Map<String, Value>,
    root: &Value,
    context: &str,
) -> Result<Vec<Parameter>, ParseError> {
    let Some(items) = obj.get("parameters") else {
        return Ok(Vec::new());
    };
    let items = items.as_array().ok_or_else(|| {
        ParseError::SchemaError(format!("parameters of {} must be an array", context))
    })?;

    items
        .iter()
        .map(|item| {
            let resolved = resolve_refs(item, root, &mut HashSet::new())?;
            parse_parameter(&resolved, context)
        })
        .collect()
}

fn parse_parameter(value: &Value, context: &str) -> Result<Parameter, ParseError> {
    let param_obj = value.as_object().ok_or_else(|| {
        ParseError::SchemaError(format!("parameter of {} must be an object", context))
    })?;

    let name = param_obj
        .get("name")
        .and_then(|v| v.as_str())
        .ok_or_else(|| ParseError::SchemaError(format!("parameter of {} missing 'name'", context)))?
        .to_string();

    let location_str = param_obj.get("in").and_then(|v| v.as_str()).ok_or_else(|| {
        ParseError::SchemaError(format!("parameter '{}' of {} missing 'in'", name, context))
    })?;
    let location = ParameterLocation::parse(location_str).ok_or_else(|| {
        ParseError::SchemaError(format!(
            "parameter '{}' of {} has unknown location '{}'",
            name, context, location_str
        ))
    })?;

    let required = param_obj
        .get("required")
        .and_then(|v| v.as_bool())
        .unwrap_or(false);

    let schema = param_obj.get("schema").map(parse_schema).transpose()?;

    let content = param_obj
        .get("content")
        .map(|c| parse_content(c, context))
        .transpose()?;

    let examples = param_obj
        .get("examples")
        .and_then(|v| v.as_object())
        .map(|map| {
            map.iter()
                .map(|(name, example)| (name.clone(), unwrap_example(example)))
                .collect::<IndexMap<_, _>>()
        });

    Ok(Parameter {
        name,
        location,
        required,
        schema,
        content,
        example: param_obj.get("example").cloned(),
        examples,
    })
}

/// Example Objects carry their payload under `value`; bare values are taken as-is.
fn unwrap_example(example: &Value) -> Value {
    match example.as_object().and_then(|obj| obj.get("value")) {
        Some(value) => value.clone(),
        None => example.clone(),
    }
}

/// Parse a `content` map (media type -> media type object).
fn parse_content(value: &Value, context: &str) -> Result<IndexMap<String, MediaType>, ParseError> {
    let content_obj = value.as_object().ok_or_else(|| {
        ParseError::SchemaError(format!("content of {} must be an object", context))
    })?;

    let mut content = IndexMap::with_capacity(content_obj.len());
    for (media_type, media_obj) in content_obj {
        let schema = media_obj
            .as_object()
            .and_then(|o| o.get("schema"))
            .map(parse_schema)
            .transpose()?;
        content.insert(media_type.clone(), MediaType { schema });
    }
    Ok(content)
}

/// Parse the `responses` map of an operation.
fn parse_responses(
    op_obj: &Map<String, Value>,
    root: &Value,
    context: &str,
) -> Result<IndexMap<String, ResponseDefinition>, ParseError> {
    let mut responses = IndexMap::new();

    let Some(responses_obj) = op_obj.get("responses").and_then(|v| v.as_object()) else {
        return Ok(responses);
    };

    for (status, response) in responses_obj {
        let resolved = resolve_refs(response, root, &mut HashSet::new())?;
        let response_obj = resolved.as_object().ok_or_else(|| {
            ParseError::SchemaError(format!(
                "response '{}' of {} must be an object",
                status, context
            ))
        })?;

        let description = response_obj
            .get("description")
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string();

        let content = match response_obj.get("content") {
            Some(c) => parse_content(c, context)?,
            None => IndexMap::new(),
        };

        responses.insert(status.clone(), ResponseDefinition { description, content });
    }

    Ok(responses)
}

/// Parse a (ref-resolved) schema object into a `SchemaNode`.
///
/// Keywords outside the checked subset are ignored.
fn parse_schema(value: &Value) -> Result<SchemaNode, ParseError> {
    let Some(obj) = value.as_object() else {
        // `true` / `{}`-style schemas accept anything.
        return Ok(SchemaNode::default());
    };

    let mut nullable = obj
        .get("nullable")
        .and_then(|v| v.as_bool())
        .unwrap_or(false);

    let schema_type = match obj.get("type") {
        None => None,
        Some(Value::String(s)) => Some(parse_type(s)?),
        Some(Value::Array(types)) => {
            // OpenAPI 3.1: `type: [string, "null"]`
            let mut concrete = Vec::new();
            for t in types {
                match t.as_str() {
                    Some("null") => nullable = true,
                    Some(s) => concrete.push(parse_type(s)?),
                    None => {
                        return Err(ParseError::SchemaError(format!(
                            "schema type entries must be strings, found {}",
                            t
                        )))
                    }
                }
            }
            // A union of several types is left unchecked at this node.
            match concrete.as_slice() {
                [single] => Some(*single),
                _ => None,
            }
        }
        Some(other) => {
            return Err(ParseError::SchemaError(format!(
                "schema type must be a string, found {}",
                other
            )))
        }
    };

    let enum_values = obj.get("enum").and_then(|v| v.as_array()).cloned();

    let required = obj
        .get("required")
        .and_then(|v| v.as_array())
        .map(|names| {
            names
                .iter()
                .filter_map(|n| n.as_str().map(|s| s.to_string()))
                .collect()
        })
        .unwrap_or_default();

    let properties = match obj.get("properties").and_then(|v| v.as_object()) {
        Some(props) => {
            let mut parsed = IndexMap::with_capacity(props.len());
            for (name, prop) in props {
                parsed.insert(name.clone(), parse_schema(prop)?);
            }
            Some(parsed)
        }
        None => None,
    };

    let items = obj
        .get("items")
        .map(parse_schema)
        .transpose()?
        .map(Box::new);

    Ok(SchemaNode {
        schema_type,
        nullable,
        enum_values,
        required,
        properties,
        items,
    })
}

fn parse_type(s: &str) -> Result<SchemaType, ParseError> {
    SchemaType::parse(s)
        .ok_or_else(|| ParseError::SchemaError(format!("unknown schema type '{}'", s)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn parse_minimal_openapi() {
        let yaml = r#"
openapi: "3.0.3"
info:
  title: Test API
  version: "1.0.0"
paths:
  /health:
    get:
      operationId: getHealth
      responses:
        "200":
          description: OK
"#;
        let spec = parse_spec(yaml).unwrap();
        assert_eq!(spec.title, "Test API");
        assert_eq!(spec.version, "3.0.3");
        assert_eq!(spec.operations.len(), 1);

        let op = &spec.operations[0];
        assert_eq!(op.id, "getHealth");
        assert_eq!(op.path, "/health");
        assert_eq!(op.method, "GET");
        assert_eq!(op.responses["200"].description, "OK");
        assert!(op.responses["200"].content.is_empty());
    }

    #[test]
    fn operation_id_defaults_to_method_and_path() {
        let yaml = r#"
openapi: "3.0.0"
info: { title: T, version: "1" }
paths:
  /users:
    post:
      responses: {}
"#;
        let spec = parse_spec(yaml).unwrap();
        assert_eq!(spec.operations[0].id, "POST /users");
    }

    #[test]
    fn parse_json_document() {
        let json = r#"{
            "openapi": "3.1.0",
            "info": {"title": "Json API", "version": "2"},
            "paths": {"/a": {"get": {"responses": {"204": {"description": "empty"}}}}}
        }"#;
        let spec = parse_spec(json).unwrap();
        assert_eq!(spec.title, "Json API");
        assert_eq!(spec.operations[0].responses.len(), 1);
    }

    #[test]
    fn reject_swagger_2() {
        let yaml = r#"
swagger: "2.0"
info: { title: Old, version: "1" }
"#;
        let err = parse_spec(yaml).unwrap_err();
        assert!(matches!(err, ParseError::SchemaError(_)));
    }

    #[test]
    fn reject_unknown_format() {
        let err = parse_spec("name: not-a-spec").unwrap_err();
        assert!(matches!(err, ParseError::UnknownFormat));
    }

    #[test]
    fn reject_malformed_yaml() {
        let err = parse_spec("openapi: [unclosed").unwrap_err();
        assert!(matches!(err, ParseError::ParseError(_)));
    }

    #[test]
    fn unquoted_status_codes_become_string_keys() {
        let yaml = r#"
openapi: 3.0.3
info: { title: Codes, version: "1" }
paths:
  /x:
    get:
      responses:
        200:
          description: ok
        404:
          description: missing
"#;
        let spec = parse_spec(yaml).unwrap();
        let keys: Vec<_> = spec.operations[0].responses.keys().cloned().collect();
        assert_eq!(keys, vec!["200".to_string(), "404".to_string()]);
    }

    #[test]
    fn parse_parameters_with_examples() {
        let yaml = r#"
openapi: "3.0.3"
info: { title: T, version: "1" }
paths:
  /people/{age}:
    get:
      parameters:
        - name: age
          in: path
          required: true
          schema: { type: integer }
          example: 111
        - name: family
          in: query
          schema: { type: string }
          examples:
            personal:
              summary: a hobbit
              value: baggins
            temporary: underhill
      responses: {}
"#;
        let spec = parse_spec(yaml).unwrap();
        let op = &spec.operations[0];
        assert_eq!(op.parameters.len(), 2);

        let age = &op.parameters[0];
        assert_eq!(age.location, ParameterLocation::Path);
        assert!(age.required);
        assert_eq!(age.example, Some(json!(111)));
        assert_eq!(age.schema, Some(SchemaNode::typed(SchemaType::Integer)));

        let family = &op.parameters[1];
        assert!(!family.required);
        let examples = family.examples.as_ref().unwrap();
        let names: Vec<_> = examples.keys().cloned().collect();
        assert_eq!(names, vec!["personal", "temporary"]);
        assert_eq!(examples["personal"], json!("baggins"));
        assert_eq!(examples["temporary"], json!("underhill"));
    }

    #[test]
    fn keep_conflicting_parameter_fields() {
        let yaml = r#"
openapi: "3.0.3"
info: { title: T, version: "1" }
paths:
  /x:
    get:
      parameters:
        - name: filter
          in: query
          schema: { type: string }
          content:
            application/json:
              schema: { type: object }
          example: a
          examples:
            one: b
      responses: {}
"#;
        let spec = parse_spec(yaml).unwrap();
        let param = &spec.operations[0].parameters[0];
        assert!(param.schema.is_some());
        assert!(param.content.is_some());
        assert!(param.example.is_some());
        assert!(param.examples.is_some());
    }

    #[test]
    fn reject_unknown_parameter_location() {
        let yaml = r#"
openapi: "3.0.3"
info: { title: T, version: "1" }
paths:
  /x:
    get:
      parameters:
        - name: q
          in: body
      responses: {}
"#;
        let err = parse_spec(yaml).unwrap_err();
        assert!(err.to_string().contains("unknown location"));
    }

    #[test]
    fn operation_parameters_override_path_parameters() {
        let yaml = r#"
openapi: "3.0.3"
info: { title: T, version: "1" }
paths:
  /items/{id}:
    parameters:
      - name: id
        in: path
        required: true
        schema: { type: string }
      - name: trace
        in: header
        schema: { type: string }
    get:
      parameters:
        - name: id
          in: path
          required: true
          schema: { type: integer }
      responses: {}
"#;
        let spec = parse_spec(yaml).unwrap();
        let params = &spec.operations[0].parameters;
        assert_eq!(params.len(), 2);
        assert_eq!(params[0].name, "trace");
        assert_eq!(params[1].name, "id");
        assert_eq!(
            params[1].schema.as_ref().unwrap().schema_type,
            Some(SchemaType::Integer)
        );
    }

    #[test]
    fn parse_response_content_schema() {
        let yaml = r#"
openapi: "3.0.3"
info: { title: T, version: "1" }
paths:
  /users:
    get:
      responses:
        "200":
          description: list
          content:
            application/json:
              schema:
                type: array
                items:
                  type: object
                  required: [id]
                  properties:
                    id: { type: integer }
                    nickname: { type: string, nullable: true }
                    role: { type: string, enum: [admin, user] }
            text/csv: {}
"#;
        let spec = parse_spec(yaml).unwrap();
        let response = &spec.operations[0].responses["200"];
        assert_eq!(response.content.len(), 2);
        assert!(response.content["text/csv"].schema.is_none());

        let schema = response.content["application/json"].schema.as_ref().unwrap();
        assert_eq!(schema.schema_type, Some(SchemaType::Array));
        let item = schema.items.as_ref().unwrap();
        assert_eq!(item.required, vec!["id".to_string()]);
        let props = item.properties.as_ref().unwrap();
        assert!(props["nickname"].nullable);
        assert_eq!(
            props["role"].enum_values,
            Some(vec![json!("admin"), json!("user")])
        );
    }

    #[test]
    fn openapi_31_null_type_sets_nullable() {
        let schema = parse_schema(&json!({"type": ["string", "null"]})).unwrap();
        assert_eq!(schema.schema_type, Some(SchemaType::String));
        assert!(schema.nullable);
    }

    #[test]
    fn union_type_is_left_unchecked() {
        let schema = parse_schema(&json!({"type": ["string", "integer", "null"]})).unwrap();
        assert_eq!(schema.schema_type, None);
        assert!(schema.nullable);

        let schema = parse_schema(&json!({
            "type": "object",
            "properties": {"id": {"type": ["string", "integer"]}}
        }))
        .unwrap();
        assert_eq!(schema.properties.unwrap()["id"].schema_type, None);
    }

    #[test]
    fn unknown_schema_type_is_an_error() {
        let err = parse_schema(&json!({"type": "date"})).unwrap_err();
        assert!(matches!(err, ParseError::SchemaError(_)));
    }

    #[test]
    fn resolve_ref_in_parameter_and_schema() {
        let yaml = r##"
openapi: "3.0.3"
info: { title: T, version: "1" }
components:
  parameters:
    Limit:
      name: limit
      in: query
      schema:
        $ref: "#/components/schemas/Count"
      example: 10
  schemas:
    Count: { type: integer }
paths:
  /items:
    get:
      parameters:
        - $ref: "#/components/parameters/Limit"
      responses: {}
"##;
        let spec = parse_spec(yaml).unwrap();
        let param = &spec.operations[0].parameters[0];
        assert_eq!(param.name, "limit");
        assert_eq!(param.schema, Some(SchemaNode::typed(SchemaType::Integer)));
    }

    #[test]
    fn resolve_ref_in_response() {
        let yaml = r##"
openapi: "3.0.3"
info: { title: T, version: "1" }
components:
  responses:
    NotFound:
      description: missing
      content:
        application/json:
          schema: { type: object }
paths:
  /items:
    get:
      responses:
        "404":
          $ref: "#/components/responses/NotFound"
"##;
        let spec = parse_spec(yaml).unwrap();
        let response = &spec.operations[0].responses["404"];
        assert_eq!(response.description, "missing");
        assert!(response.content.contains_key("application/json"));
    }

    #[test]
    fn unresolved_ref_returns_error() {
        let yaml = r##"
openapi: "3.0.3"
info: { title: T, version: "1" }
paths:
  /items:
    get:
      parameters:
        - $ref: "#/components/parameters/Missing"
      responses: {}
"##;
        let err = parse_spec(yaml).unwrap_err();
        assert!(matches!(err, ParseError::UnresolvedRef(_)));
    }

    #[test]
    fn circular_ref_returns_error() {
        let yaml = r##"
openapi: "3.0.3"
info: { title: T, version: "1" }
components:
  schemas:
    Node:
      type: object
      properties:
        next:
          $ref: "#/components/schemas/Node"
paths:
  /nodes:
    get:
      responses:
        "200":
          description: ok
          content:
            application/json:
              schema:
                $ref: "#/components/schemas/Node"
"##;
        let err = parse_spec(yaml).unwrap_err();
        assert!(err.to_string().contains("circular"));
    }

    #[test]
    fn parse_spec_file_rejects_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("api.txt");
        std::fs::write(&path, "openapi: 3.0.0").unwrap();
        let err = parse_spec_file(&path).unwrap_err();
        assert!(matches!(err, ParseError::UnsupportedExtension(_)));
    }

    #[test]
    fn parse_spec_file_sets_filename() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("api.yaml");
        std::fs::write(
            &path,
            "openapi: 3.0.0\ninfo: {title: T, version: '1'}\npaths: {}\n",
        )
        .unwrap();
        let spec = parse_spec_file(&path).unwrap();
        assert_eq!(spec.filename.as_deref(), Some("api.yaml"));
        assert!(spec.operations.is_empty());
    }

    #[test]
    fn parse_spec_file_missing_is_io_error() {
        let err = parse_spec_file(Path::new("/nonexistent/api.yaml")).unwrap_err();
        assert!(matches!(err, ParseError::Io(_)));
    }
}
