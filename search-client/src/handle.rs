//! Handle to the shared client.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, Utc};
use serde_json::Value;
use uuid::Uuid;

use crate::config::EsVersion;
use crate::errors::ClientError;
use crate::interfaces::SearchBackend;
use crate::types::{RawResponse, SearchRequest};

/// The live connection to the search cluster.
///
/// Handles are created and owned by a [`ClientRegistry`](crate::ClientRegistry);
/// callers receive a shared reference and should re-acquire rather than keep
/// it around. Once the registry closes a handle, every request through it
/// fails with a connection error.
pub struct ClientHandle {
    id: Uuid,
    created_at: DateTime<Utc>,
    backend: Box<dyn SearchBackend>,
    closed: AtomicBool,
}

impl ClientHandle {
    pub(crate) fn new(backend: Box<dyn SearchBackend>) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            backend,
            closed: AtomicBool::new(false),
        }
    }

    /// Unique identifier of this connection.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Server generation of the underlying client.
    pub fn version(&self) -> EsVersion {
        self.backend.version()
    }

    /// When the connection was created.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Whether the registry has closed this handle.
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    /// Send a request and return the response in the generation's native shape.
    pub async fn send(&self, request: &SearchRequest) -> Result<RawResponse, ClientError> {
        self.ensure_open()?;
        self.backend.send(request).await
    }

    /// Send a request and return the normalized payload.
    pub async fn send_normalized(&self, request: &SearchRequest) -> Result<Value, ClientError> {
        let raw = self.send(request).await?;
        self.normalize(raw)
    }

    /// Extract the payload from a response produced by this handle.
    pub fn normalize(&self, raw: RawResponse) -> Result<Value, ClientError> {
        self.backend.extract_body(raw)
    }

    /// Check if the cluster is reachable.
    pub async fn ping(&self) -> Result<bool, ClientError> {
        self.ensure_open()?;
        self.backend.ping().await
    }

    /// Mark the handle closed and release the underlying client.
    pub(crate) async fn close(&self) -> Result<(), ClientError> {
        self.closed.store(true, Ordering::Release);
        self.backend.close().await
    }

    fn ensure_open(&self) -> Result<(), ClientError> {
        if self.is_closed() {
            return Err(ClientError::connection(format!(
                "Search client {} has been closed",
                self.id
            )));
        }
        Ok(())
    }
}

impl fmt::Debug for ClientHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientHandle")
            .field("id", &self.id)
            .field("version", &self.version())
            .field("created_at", &self.created_at)
            .field("closed", &self.is_closed())
            .finish_non_exhaustive()
    }
}
