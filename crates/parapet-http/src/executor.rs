//! Request preparation and execution.

use std::collections::HashMap;

use reqwest::{Client, Method};
use serde_json::Value;
use url::Url;

use parapet_spec_parser::{Operation, ParameterLocation};
use parapet_validator::media_type::essence;
use parapet_validator::{ExampleGroup, LiveResponse, ResponseBody};

use crate::config::HttpExecutorConfig;
use crate::error::ExecuteError;

/// A fully resolved request, ready to send or to render as curl.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedRequest {
    pub method: String,
    pub url: Url,
    /// Header name -> value, in sending order.
    pub headers: Vec<(String, String)>,
}

/// Sends example requests to the server under test.
#[derive(Debug, Clone)]
pub struct HttpExecutor {
    client: Client,
    base_url: Url,
    config: HttpExecutorConfig,
}

impl HttpExecutor {
    /// Create an executor for the server at `server`.
    pub fn new(server: &str, config: HttpExecutorConfig) -> Result<Self, ExecuteError> {
        let base_url = Url::parse(server).map_err(|e| ExecuteError::InvalidUrl(e.to_string()))?;
        if !matches!(base_url.scheme(), "http" | "https") || base_url.cannot_be_a_base() {
            return Err(ExecuteError::InvalidUrl(format!(
                "{} is not an http(s) base URL",
                server
            )));
        }

        let client = Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(ExecuteError::BuildClient)?;

        Ok(Self {
            client,
            base_url,
            config,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve the URL and headers for `operation` using the values of `group`.
    ///
    /// Path parameters are substituted and percent-encoded, query parameters
    /// are appended (arrays as repeated pairs), header parameters become
    /// headers and cookie parameters are joined into one `Cookie` header.
    pub fn prepare(
        &self,
        operation: &Operation,
        group: &ExampleGroup,
    ) -> Result<PreparedRequest, ExecuteError> {
        let mut url = self.base_url.clone();

        let segments = operation
            .path
            .trim_start_matches('/')
            .split('/')
            .map(|segment| substitute(segment, group))
            .collect::<Result<Vec<_>, _>>()?;
        url.path_segments_mut()
            .map_err(|_| ExecuteError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);

        let mut headers = self.config.default_headers.clone();
        let mut cookies = Vec::new();

        for parameter in &operation.parameters {
            let Some(value) = group.get(&parameter.name) else {
                continue;
            };
            match parameter.location {
                ParameterLocation::Path => {}
                ParameterLocation::Query => {
                    let mut pairs = url.query_pairs_mut();
                    match value {
                        Value::Array(items) => {
                            for item in items {
                                pairs.append_pair(&parameter.name, &render(item));
                            }
                        }
                        other => {
                            pairs.append_pair(&parameter.name, &render(other));
                        }
                    }
                }
                ParameterLocation::Header => {
                    headers.push((parameter.name.clone(), render(value)));
                }
                ParameterLocation::Cookie => {
                    cookies.push(format!("{}={}", parameter.name, render(value)));
                }
            }
        }

        if !cookies.is_empty() {
            headers.push(("Cookie".to_string(), cookies.join("; ")));
        }

        Ok(PreparedRequest {
            method: operation.method.to_uppercase(),
            url,
            headers,
        })
    }

    /// Send `operation` with the values of `group`.
    pub async fn execute(
        &self,
        operation: &Operation,
        group: &ExampleGroup,
    ) -> Result<LiveResponse, ExecuteError> {
        let request = self.prepare(operation, group)?;
        self.send(&request).await
    }

    /// Send an already prepared request.
    pub async fn send(&self, request: &PreparedRequest) -> Result<LiveResponse, ExecuteError> {
        let method = Method::from_bytes(request.method.as_bytes())
            .map_err(|_| ExecuteError::InvalidMethod(request.method.clone()))?;

        let mut builder = self.client.request(method, request.url.clone());
        for (name, value) in &request.headers {
            let name = reqwest::header::HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| ExecuteError::InvalidHeader(name.clone()))?;
            let value = reqwest::header::HeaderValue::from_str(value)
                .map_err(|_| ExecuteError::InvalidHeader(name.to_string()))?;
            builder = builder.header(name, value);
        }

        tracing::debug!(method = %request.method, url = %request.url, "sending request");
        let response = builder.send().await?;

        let status = response.status().as_u16();
        let url = response.url().to_string();
        let headers: HashMap<String, String> = response
            .headers()
            .iter()
            .filter_map(|(k, v)| {
                v.to_str()
                    .ok()
                    .map(|v| (k.as_str().to_lowercase(), v.to_string()))
            })
            .collect();

        let bytes = response.bytes().await.map_err(ExecuteError::ResponseRead)?;
        let body = decode_body(headers.get("content-type").map(String::as_str), &bytes);

        Ok(LiveResponse {
            ok: (200..300).contains(&status),
            status,
            url,
            headers,
            body,
        })
    }
}

/// Replace every `{name}` in one path template segment.
fn substitute(segment: &str, group: &ExampleGroup) -> Result<String, ExecuteError> {
    let mut out = String::with_capacity(segment.len());
    let mut rest = segment;
    while let Some(start) = rest.find('{') {
        let Some(len) = rest[start..].find('}') else {
            break;
        };
        let name = &rest[start + 1..start + len];
        let value = group
            .get(name)
            .ok_or_else(|| ExecuteError::MissingPathParameter(name.to_string()))?;
        out.push_str(&rest[..start]);
        out.push_str(&render(value));
        rest = &rest[start + len + 1..];
    }
    out.push_str(rest);
    Ok(out)
}

/// Scalars render bare, structured values as JSON.
fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn decode_body(content_type: Option<&str>, bytes: &[u8]) -> ResponseBody {
    if bytes.is_empty() {
        return ResponseBody::Empty;
    }
    let media_type = content_type.map(essence).unwrap_or_default();

    let parsed = if is_json(&media_type) {
        serde_json::from_slice::<Value>(bytes).ok()
    } else if is_yaml(&media_type) {
        serde_yaml::from_slice::<Value>(bytes).ok()
    } else {
        None
    };

    match parsed {
        Some(value) => ResponseBody::Parsed(value),
        None => ResponseBody::Raw(String::from_utf8_lossy(bytes).into_owned()),
    }
}

fn is_json(media_type: &str) -> bool {
    media_type == "application/json" || media_type.ends_with("+json")
}

fn is_yaml(media_type: &str) -> bool {
    matches!(
        media_type,
        "application/yaml" | "application/x-yaml" | "text/yaml" | "text/x-yaml"
    ) || media_type.ends_with("+yaml")
}
