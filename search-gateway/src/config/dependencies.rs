//! Dependency initialization and wiring for the search gateway.

use std::sync::Arc;

use serde_json::Value;
use tracing::info;

use crate::config::Settings;
use crate::GatewayError;
use search_client::{ClientRegistry, ConnectionManager, SearchRequest};

/// Container for all initialized dependencies.
pub struct Dependencies {
    /// The shared search connection, handed to request handlers.
    pub connection: Arc<ConnectionManager>,
}

impl Dependencies {
    /// Wire the connection manager from settings.
    ///
    /// No connection is opened here; the client is created on first use.
    pub fn new(settings: &Settings) -> Self {
        info!(
            host = %settings.es.host,
            port = settings.es.port,
            use_ssl = settings.es.use_ssl,
            version = %settings.es.es_version,
            "Initializing dependencies"
        );

        let registry = ClientRegistry::new(settings.es.clone())
            .with_connectivity_check(settings.verify_connection);

        Self {
            connection: Arc::new(ConnectionManager::with_registry(registry)),
        }
    }

    /// Open the connection and confirm the cluster answers.
    ///
    /// # Returns
    ///
    /// * `Ok(Value)` - The normalized cluster info document (`GET /`)
    /// * `Err(GatewayError)` - If the client cannot be created or the request fails
    pub async fn verify(&self) -> Result<Value, GatewayError> {
        let client = self.connection.acquire_client().await?;
        let raw = client.send(&SearchRequest::get("/")).await?;
        let cluster_info = self.connection.normalize_response(raw)?;

        info!(
            cluster_name = cluster_info["cluster_name"].as_str().unwrap_or("unknown"),
            server_version = cluster_info["version"]["number"].as_str().unwrap_or("unknown"),
            "Search cluster connection verified"
        );

        Ok(cluster_info)
    }

    /// Release the connection. Never fails.
    pub async fn shutdown(&self) {
        self.connection.close_client().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use search_client::{EsConfig, LifecycleState};

    #[tokio::test]
    async fn test_new_is_lazy() {
        let settings = Settings {
            es: EsConfig::default(),
            verify_connection: false,
        };

        let deps = Dependencies::new(&settings);

        assert_eq!(deps.connection.state().await, LifecycleState::Uninitialized);
        assert_eq!(deps.connection.config(), &settings.es);
    }

    #[tokio::test]
    async fn test_shutdown_without_connection() {
        let settings = Settings {
            es: EsConfig::default(),
            verify_connection: true,
        };
        let deps = Dependencies::new(&settings);

        deps.shutdown().await;
        deps.shutdown().await;

        assert_eq!(deps.connection.state().await, LifecycleState::Uninitialized);
    }

    #[tokio::test]
    async fn test_verify_fails_on_invalid_config() {
        let settings = Settings {
            es: EsConfig::new("", 9200),
            verify_connection: false,
        };
        let deps = Dependencies::new(&settings);

        let result = deps.verify().await;
        assert!(matches!(
            result,
            Err(GatewayError::ClientError(search_client::ClientError::ConfigurationError(_)))
        ));
    }
}
