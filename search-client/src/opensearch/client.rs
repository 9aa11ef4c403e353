//! 7.x client implementation.
//!
//! This module provides the `SearchBackend` for 7.x clusters using the
//! OpenSearch Rust client, which is wire compatible with the 7.10 API.

use async_trait::async_trait;
use opensearch::{
    auth::Credentials,
    cert::CertificateValidation,
    http::headers::{HeaderMap, HeaderValue, AUTHORIZATION},
    http::request::JsonBody,
    http::transport::{SingleNodeConnectionPool, TransportBuilder},
    http::Method,
    OpenSearch,
};
use serde_json::Value;
use tracing::{debug, info, instrument};
use url::Url;

use crate::config::EsVersion;
use crate::errors::ClientError;
use crate::interfaces::SearchBackend;
use crate::params::{AuthMode, ConnectionParams};
use crate::types::{decode_body, RawResponse, RequestMethod, SearchRequest};

/// Client for 7.x clusters.
///
/// Responses come back as the decoded body, matching the 7.x client shape.
///
/// # Example
///
/// ```ignore
/// let params = build_params(&EsConfig::new("localhost", 9200).with_version(EsVersion::V7));
/// let backend = OpenSearchBackend::new(&params)?;
/// let raw = backend.send(&SearchRequest::get("/")).await?;
/// ```
pub struct OpenSearchBackend {
    client: OpenSearch,
    url: String,
}

impl OpenSearchBackend {
    /// Create a new 7.x client from connection parameters.
    ///
    /// No request is sent; the transport connects lazily.
    ///
    /// # Returns
    ///
    /// * `Ok(OpenSearchBackend)` - A new client instance
    /// * `Err(ClientError)` - If the parameters are unusable or the transport fails to build
    pub fn new(params: &ConnectionParams) -> Result<Self, ClientError> {
        let url = params
            .primary_host()
            .ok_or_else(|| ClientError::configuration("at least one host is required"))?;
        let parsed_url =
            Url::parse(url).map_err(|e| ClientError::configuration(format!("Invalid URL {}: {}", url, e)))?;

        let conn_pool = SingleNodeConnectionPool::new(parsed_url);
        let mut builder = TransportBuilder::new(conn_pool).disable_proxy();

        if params.verify_certs == Some(false) {
            builder = builder.cert_validation(CertificateValidation::None);
        }

        match &params.auth {
            AuthMode::None => {}
            AuthMode::BasicAuth { username, password } => {
                builder = builder.auth(Credentials::Basic(username.clone(), password.clone()));
            }
            AuthMode::ApiKey(key) => {
                builder = builder.headers(api_key_headers(key)?);
            }
        }

        let transport = builder
            .build()
            .map_err(|e| ClientError::connection(e.to_string()))?;

        info!(
            url = %url,
            auth = params.auth.kind(),
            verify_certs = ?params.verify_certs,
            "Created 7.x search client"
        );

        Ok(Self {
            client: OpenSearch::new(transport),
            url: url.to_string(),
        })
    }
}

fn api_key_headers(key: &str) -> Result<HeaderMap, ClientError> {
    let mut value = HeaderValue::from_str(&format!("ApiKey {}", key))
        .map_err(|_| ClientError::configuration("API key contains invalid header characters"))?;
    value.set_sensitive(true);
    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, value);
    Ok(headers)
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

#[async_trait]
impl SearchBackend for OpenSearchBackend {
    fn version(&self) -> EsVersion {
        EsVersion::V7
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

        let status = response.status_code();
        let text = response
            .text()
            .await
            .map_err(|e| ClientError::request(e.to_string()))?;

        debug!(status = %status, "Received response");
        Ok(RawResponse::Body(decode_body(&text)))
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
        // The transport owns no background tasks; its connections are
        // released when the last handle reference is dropped.
        debug!(url = %self.url, "Released 7.x search client");
        Ok(())
    }
}
