//! Version-dispatching backend connector.

use async_trait::async_trait;

use crate::config::EsVersion;
use crate::elasticsearch::ElasticsearchBackend;
use crate::errors::ClientError;
use crate::interfaces::{BackendConnector, SearchBackend};
use crate::opensearch::OpenSearchBackend;
use crate::params::ConnectionParams;

/// Connector that picks the client library matching the server generation.
#[derive(Debug, Clone, Copy, Default)]
pub struct VersionedConnector;

#[async_trait]
impl BackendConnector for VersionedConnector {
    async fn connect(
        &self,
        version: EsVersion,
        params: &ConnectionParams,
    ) -> Result<Box<dyn SearchBackend>, ClientError> {
        let backend: Box<dyn SearchBackend> = match version {
            EsVersion::V7 => Box::new(OpenSearchBackend::new(params)?),
            EsVersion::V8 => Box::new(ElasticsearchBackend::new(params)?),
        };
        Ok(backend)
    }
}
