//! Request and response types passed through the client handle.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// HTTP method of a request sent through the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequestMethod {
    Get,
    Post,
    Put,
    Delete,
    Head,
}

/// A request to send to the cluster.
///
/// # Example
///
/// ```ignore
/// let request = SearchRequest::post("/entities/_search")
///     .with_query("size", "10")
///     .with_body(json!({"query": {"match_all": {}}}));
/// let raw = handle.send(&request).await?;
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    /// HTTP method.
    pub method: RequestMethod,
    /// Path relative to the node URL, e.g. `/_cluster/health`.
    pub path: String,
    /// Query string pairs.
    pub query: Vec<(String, String)>,
    /// Optional JSON body.
    pub body: Option<Value>,
}

impl SearchRequest {
    /// Create a request with the given method and path.
    pub fn new(method: RequestMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(RequestMethod::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(RequestMethod::Post, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(RequestMethod::Put, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(RequestMethod::Delete, path)
    }

    pub fn head(path: impl Into<String>) -> Self {
        Self::new(RequestMethod::Head, path)
    }

    /// Append a query string parameter.
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Set the JSON body.
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Query pairs, or `None` when there are none.
    pub(crate) fn query_string(&self) -> Option<&[(String, String)]> {
        (!self.query.is_empty()).then_some(self.query.as_slice())
    }
}

/// Transport metadata attached to an 8.x response.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ResponseMeta {
    /// HTTP status code.
    pub status: u16,
    /// Response headers with lowercased names.
    pub headers: BTreeMap<String, String>,
}

/// Response wrapper returned by the 8.x client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse {
    /// Transport metadata.
    pub meta: ResponseMeta,
    /// Decoded response body.
    pub body: Value,
}

/// A response as the underlying client library returns it.
///
/// The shape depends on the server generation: 7.x clients hand back the
/// decoded body directly, 8.x clients wrap it in an [`ApiResponse`].
#[derive(Debug, Clone, PartialEq)]
pub enum RawResponse {
    /// Body returned as-is.
    Body(Value),
    /// Body nested under `body` alongside transport metadata.
    Api(ApiResponse),
}

impl RawResponse {
    /// Short name of the shape, used in error messages.
    pub fn shape(&self) -> &'static str {
        match self {
            RawResponse::Body(_) => "body",
            RawResponse::Api(_) => "api_response",
        }
    }
}

/// Decode a response body read as text. Empty bodies (HEAD requests,
/// 204 responses) decode to `null`; bodies that are not JSON are kept as a
/// JSON string.
pub(crate) fn decode_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}
