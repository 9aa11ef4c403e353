//! Connection lifecycle controller.
//!
//! Application-facing entry point for the shared client: create on first
//! use, normalize responses for the configured server generation, and close
//! on shutdown without ever failing the shutdown path.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::client::{ClientRegistry, CloseOutcome, LifecycleState};
use crate::config::EsConfig;
use crate::errors::ClientError;
use crate::handle::ClientHandle;
use crate::normalizer::normalize;
use crate::types::RawResponse;

/// Owns the registry for one configuration and is injected into the code
/// that issues search requests.
pub struct ConnectionManager {
    registry: ClientRegistry,
}

impl ConnectionManager {
    /// Create a manager for the given configuration.
    pub fn new(config: EsConfig) -> Self {
        Self {
            registry: ClientRegistry::new(config),
        }
    }

    /// Create a manager around an existing registry.
    pub fn with_registry(registry: ClientRegistry) -> Self {
        Self { registry }
    }

    /// The configuration clients are created from.
    pub fn config(&self) -> &EsConfig {
        self.registry.config()
    }

    /// Current lifecycle state.
    pub async fn state(&self) -> LifecycleState {
        self.registry.state().await
    }

    /// Get the shared client, creating it on first use.
    ///
    /// Creation errors are returned to the caller, who may retry.
    #[instrument(skip(self))]
    pub async fn acquire_client(&self) -> Result<Arc<ClientHandle>, ClientError> {
        match self.registry.acquire().await {
            Ok(handle) => Ok(handle),
            Err(e) => {
                warn!(error = %e, "Failed to acquire search client");
                Err(e)
            }
        }
    }

    /// Close the shared client. Safe to call repeatedly; never fails.
    #[instrument(skip(self))]
    pub async fn close_client(&self) {
        match self.registry.close().await {
            CloseOutcome::NotOpen => {}
            CloseOutcome::Closed { handle_id } => {
                debug!(handle_id = %handle_id, "Search client released");
            }
            // Already logged by the registry; shutdown carries on regardless.
            CloseOutcome::Failed { .. } => {}
        }
    }

    /// Extract the payload from a response for the configured server generation.
    pub fn normalize_response(&self, raw: RawResponse) -> Result<Value, ClientError> {
        normalize(raw, self.config().es_version)
    }
}
