//! Client registry.
//!
//! Owns the single shared client for a configuration. The first `acquire`
//! creates it, later calls reuse it, and `close` tears it down so the next
//! `acquire` starts a fresh connection.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, error, info, instrument};
use uuid::Uuid;

use crate::config::EsConfig;
use crate::connector::VersionedConnector;
use crate::errors::ClientError;
use crate::handle::ClientHandle;
use crate::interfaces::BackendConnector;
use crate::params::build_params;

/// Lifecycle state of a registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    /// No client has been created yet.
    Uninitialized,
    /// A client is live.
    Active,
    /// The last client was closed. A new one is created on the next acquire.
    Closed,
}

/// Result of closing the registry's client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CloseOutcome {
    /// There was no live client.
    NotOpen,
    /// The client closed cleanly.
    Closed { handle_id: Uuid },
    /// Closing failed. The client was discarded anyway.
    Failed { handle_id: Uuid, error: ClientError },
}

enum Slot {
    Uninitialized,
    Active(Arc<ClientHandle>),
    Closed,
}

/// Holder of the shared search client.
///
/// At most one client exists per registry. Creation and teardown both run
/// under the registry's lock, so concurrent callers never see a client that
/// is half created or half closed.
///
/// # Example
///
/// ```ignore
/// let registry = ClientRegistry::new(EsConfig::new("localhost", 9200));
/// let client = registry.acquire().await?;
/// let info = client.send_normalized(&SearchRequest::get("/")).await?;
/// registry.close().await;
/// ```
pub struct ClientRegistry {
    config: EsConfig,
    connector: Arc<dyn BackendConnector>,
    verify_connectivity: bool,
    slot: Mutex<Slot>,
}

impl ClientRegistry {
    /// Create a registry that builds clients with the library matching
    /// `config.es_version`.
    pub fn new(config: EsConfig) -> Self {
        Self::with_connector(config, Arc::new(VersionedConnector))
    }

    /// Create a registry with a custom connector.
    pub fn with_connector(config: EsConfig, connector: Arc<dyn BackendConnector>) -> Self {
        Self {
            config,
            connector,
            verify_connectivity: false,
            slot: Mutex::new(Slot::Uninitialized),
        }
    }

    /// Ping the cluster whenever a new client is created and fail the
    /// acquire if it is unreachable or unhealthy.
    pub fn with_connectivity_check(mut self, enabled: bool) -> Self {
        self.verify_connectivity = enabled;
        self
    }

    /// The configuration clients are created from.
    pub fn config(&self) -> &EsConfig {
        &self.config
    }

    /// Current lifecycle state.
    pub async fn state(&self) -> LifecycleState {
        match &*self.slot.lock().await {
            Slot::Uninitialized => LifecycleState::Uninitialized,
            Slot::Active(_) => LifecycleState::Active,
            Slot::Closed => LifecycleState::Closed,
        }
    }

    /// Return the live client, creating it first if there is none.
    ///
    /// # Returns
    ///
    /// * `Ok(Arc<ClientHandle>)` - The shared client
    /// * `Err(ClientError::ConfigurationError)` - If the configuration is unusable
    /// * `Err(ClientError::ConnectionError)` - If the client could not be created
    ///   or, with connectivity checks enabled, the cluster is unreachable
    #[instrument(skip(self), fields(version = %self.config.es_version))]
    pub async fn acquire(&self) -> Result<Arc<ClientHandle>, ClientError> {
        let mut slot = self.slot.lock().await;

        if let Slot::Active(handle) = &*slot {
            return Ok(Arc::clone(handle));
        }

        self.config.validate()?;
        let params = build_params(&self.config);

        let backend = self
            .connector
            .connect(self.config.es_version, &params)
            .await?;

        if backend.version() != self.config.es_version {
            let mismatch = ClientError::configuration(format!(
                "Connector built a version {} client for a version {} configuration",
                backend.version(),
                self.config.es_version
            ));
            if let Err(e) = backend.close().await {
                debug!(error = %e, "Failed to release mismatched client");
            }
            return Err(mismatch);
        }

        if self.verify_connectivity {
            let reachable = backend.ping().await;
            if !matches!(reachable, Ok(true)) {
                if let Err(e) = backend.close().await {
                    debug!(error = %e, "Failed to release unverified client");
                }
                return Err(match reachable {
                    Err(e) => e,
                    _ => ClientError::connection("Search cluster reported an unhealthy status"),
                });
            }
            debug!("Search cluster connectivity verified");
        }

        let handle = Arc::new(ClientHandle::new(backend));
        info!(
            handle_id = %handle.id(),
            hosts = ?params.hosts,
            auth = params.auth.kind(),
            "Search client connection created"
        );

        *slot = Slot::Active(Arc::clone(&handle));
        Ok(handle)
    }

    /// Close and discard the live client.
    ///
    /// Never fails: a close error is logged and reported in the outcome,
    /// and the client is discarded either way. Closing when there is no
    /// live client does nothing.
    #[instrument(skip(self))]
    pub async fn close(&self) -> CloseOutcome {
        let mut slot = self.slot.lock().await;

        // Cleared before the close attempt so no exit path leaves it set.
        let handle = match std::mem::replace(&mut *slot, Slot::Closed) {
            Slot::Active(handle) => handle,
            previous => {
                *slot = previous;
                debug!("No search client connection to close");
                return CloseOutcome::NotOpen;
            }
        };

        let handle_id = handle.id();
        info!(handle_id = %handle_id, "Closing search client connection");

        match handle.close().await {
            Ok(()) => {
                info!(handle_id = %handle_id, "Search client connection closed");
                CloseOutcome::Closed { handle_id }
            }
            Err(error) => {
                error!(handle_id = %handle_id, error = %error, "Failed to close search client connection");
                CloseOutcome::Failed { handle_id, error }
            }
        }
    }
}
