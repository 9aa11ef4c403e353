//! Search backend trait definitions.

use async_trait::async_trait;
use serde_json::Value;

use crate::config::EsVersion;
use crate::errors::ClientError;
use crate::normalizer::normalize;
use crate::params::ConnectionParams;
use crate::types::{RawResponse, SearchRequest};

/// A live client for one server generation.
///
/// Implementations wrap the underlying client library and are owned by a
/// [`ClientHandle`](crate::ClientHandle). All implementations must be
/// `Send + Sync` so the handle can be shared across tasks.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Server generation this backend was built for.
    fn version(&self) -> EsVersion;

    /// Send a request and return the response in the generation's native shape.
    ///
    /// # Returns
    ///
    /// * `Ok(RawResponse)` - The response, whatever its HTTP status
    /// * `Err(ClientError)` - If the request could not be sent or read
    async fn send(&self, request: &SearchRequest) -> Result<RawResponse, ClientError>;

    /// Check if the cluster is reachable.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - If the cluster answered with a success status
    /// * `Ok(false)` - If the cluster answered with an error status
    /// * `Err(ClientError)` - If the cluster could not be reached
    async fn ping(&self) -> Result<bool, ClientError>;

    /// Release the connection.
    async fn close(&self) -> Result<(), ClientError>;

    /// Extract the payload from a response produced by this backend.
    fn extract_body(&self, raw: RawResponse) -> Result<Value, ClientError> {
        normalize(raw, self.version())
    }
}

/// Creates backends from connection parameters.
///
/// The registry calls this once per connection; implementations pick the
/// client library for the requested generation.
#[async_trait]
pub trait BackendConnector: Send + Sync {
    /// Create a backend for `version` using `params`.
    ///
    /// # Returns
    ///
    /// * `Ok(Box<dyn SearchBackend>)` - A ready-to-use backend
    /// * `Err(ClientError)` - If the client could not be constructed
    async fn connect(
        &self,
        version: EsVersion,
        params: &ConnectionParams,
    ) -> Result<Box<dyn SearchBackend>, ClientError>;
}
