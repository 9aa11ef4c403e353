//! 8.x client implementation.
//!
//! This module provides the `SearchBackend` for 8.x clusters using the
//! official Elasticsearch Rust client.

use std::collections::BTreeMap;

use async_trait::async_trait;
use elasticsearch::{
    auth::Credentials,
    cert::CertificateValidation,
    http::headers::{HeaderMap, HeaderValue},
    http::request::JsonBody,
    http::transport::{SingleNodeConnectionPool, TransportBuilder},
    http::{Method, Url},
    Elasticsearch,
};
use serde_json::Value;
use tracing::{debug, info, instrument};

use crate::config::EsVersion;
use crate::errors::ClientError;
use crate::interfaces::SearchBackend;
use crate::params::{AuthMode, ConnectionParams};
use crate::types::{decode_body, ApiResponse, RawResponse, RequestMethod, ResponseMeta, SearchRequest};

/// Client for 8.x clusters.
///
/// Responses are wrapped in an [`ApiResponse`] carrying the HTTP status and
/// headers next to the body, matching the 8.x client shape.
pub struct ElasticsearchBackend {
    client: Elasticsearch,
    url: String,
}

impl ElasticsearchBackend {
    /// Create a new 8.x client from connection parameters.
    ///
    /// No request is sent; the transport connects lazily.
    pub fn new(params: &ConnectionParams) -> Result<Self, ClientError> {
        let url = params
            .primary_host()
            .ok_or_else(|| ClientError::configuration("at least one host is required"))?;
        let parsed_url: Url = url
            .parse()
            .map_err(|e| ClientError::configuration(format!("Invalid URL {}: {}", url, e)))?;

        let conn_pool = SingleNodeConnectionPool::new(parsed_url);
        let mut builder = TransportBuilder::new(conn_pool).disable_proxy();

        if params.verify_certs == Some(false) {
            builder = builder.cert_validation(CertificateValidation::None);
        }

        builder = match &params.auth {
            AuthMode::None => builder,
            AuthMode::BasicAuth { username, password } => {
                builder.auth(Credentials::Basic(username.clone(), password.clone()))
            }
            AuthMode::ApiKey(key) => {
                validate_api_key(key)?;
                builder.auth(Credentials::EncodedApiKey(key.clone()))
            }
        };

        let transport = builder
            .build()
            .map_err(|e| ClientError::connection(format!("Failed to build transport: {}", e)))?;

        info!(
            url = %url,
            auth = params.auth.kind(),
            verify_certs = ?params.verify_certs,
            "Created 8.x search client"
        );

        Ok(Self {
            client: Elasticsearch::new(transport),
            url: url.to_string(),
        })
    }
}

// The transport builds the header itself and panics on invalid characters.
fn validate_api_key(key: &str) -> Result<(), ClientError> {
    HeaderValue::from_str(&format!("ApiKey {}", key))
        .map(|_| ())
        .map_err(|_| ClientError::configuration("API key contains invalid header characters"))
}

fn method(method: RequestMethod) -> Method {
    match method {
        RequestMethod::Get => Method::Get,
        RequestMethod::Post => Method::Post,
        RequestMethod::Put => Method::Put,
        RequestMethod::Delete => Method::Delete,
        RequestMethod::Head => Method::Head,
    }
}

fn response_headers(headers: &HeaderMap) -> BTreeMap<String, String> {
    headers
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|v| (name.as_str().to_string(), v.to_string()))
        })
        .collect()
}

#[async_trait]
impl SearchBackend for ElasticsearchBackend {
    fn version(&self) -> EsVersion {
        EsVersion::V8
    }

    #[instrument(skip(self), fields(method = ?request.method, path = %request.path))]
    async fn send(&self, request: &SearchRequest) -> Result<RawResponse, ClientError> {
        let response = self
            .client
            .send(
                method(request.method),
                &request.path,
                HeaderMap::new(),
                request.query_string(),
                request.body.clone().map(JsonBody::<Value>::new),
                None,
            )
            .await
            .map_err(|e| ClientError::request(e.to_string()))?;

        let meta = ResponseMeta {
            status: response.status_code().as_u16(),
            headers: response_headers(response.headers()),
        };
        let text = response
            .text()
            .await
            .map_err(|e| ClientError::request(e.to_string()))?;

        debug!(status = meta.status, "Received response");
        Ok(RawResponse::Api(ApiResponse {
            meta,
            body: decode_body(&text),
        }))
    }

    async fn ping(&self) -> Result<bool, ClientError> {
        let response = self
            .client
            .ping()
            .send()
            .await
            .map_err(|e| ClientError::connection(e.to_string()))?;

        Ok(response.status_code().is_success())
    }

    async fn close(&self) -> Result<(), ClientError> {
        debug!(url = %self.url, "Released 8.x search client");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EsConfig;
    use crate::params::build_params;
    use serde_json::json;

    #[test]
    fn test_new_with_api_key() {
        let config = EsConfig::new("localhost", 9200).with_api_key("abc");

        let backend = ElasticsearchBackend::new(&build_params(&config)).unwrap();

        assert_eq!(backend.version(), EsVersion::V8);
        assert_eq!(backend.url, "http://localhost:9200");
    }

    #[test]
    fn test_new_rejects_invalid_api_key() {
        let config = EsConfig::new("localhost", 9200).with_api_key("bad\nkey");

        let result = ElasticsearchBackend::new(&build_params(&config));
        assert!(matches!(result, Err(ClientError::ConfigurationError(_))));
    }

    #[test]
    fn test_new_with_ssl_and_basic_auth() {
        let config = EsConfig::new("es.example.com", 9243)
            .with_ssl(false)
            .with_basic_auth("elastic", "changeme");

        let backend = ElasticsearchBackend::new(&build_params(&config)).unwrap();
        assert_eq!(backend.url, "https://es.example.com:9243");
    }

    #[test]
    fn test_new_rejects_unparseable_host() {
        let params = ConnectionParams {
            hosts: vec!["http://exa mple:9200".to_string()],
            verify_certs: None,
            auth: AuthMode::None,
        };

        let result = ElasticsearchBackend::new(&params);
        assert!(matches!(result, Err(ClientError::ConfigurationError(_))));
    }

    #[test]
    fn test_extract_body_unwraps_api_response() {
        let backend = ElasticsearchBackend::new(&build_params(&EsConfig::default())).unwrap();
        let raw = RawResponse::Api(ApiResponse {
            meta: ResponseMeta {
                status: 200,
                ..Default::default()
            },
            body: json!({"acknowledged": true}),
        });

        assert_eq!(backend.extract_body(raw).unwrap(), json!({"acknowledged": true}));
    }

    #[test]
    fn test_response_headers_collected() {
        let mut headers = HeaderMap::new();
        headers.insert("x-elastic-product", HeaderValue::from_static("Elasticsearch"));

        let collected = response_headers(&headers);
        assert_eq!(
            collected.get("x-elastic-product").map(String::as_str),
            Some("Elasticsearch")
        );
    }
}
