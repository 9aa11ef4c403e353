//! Mock backends shared by the registry and lifecycle tests.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;

use crate::config::EsVersion;
use crate::errors::ClientError;
use crate::interfaces::{BackendConnector, SearchBackend};
use crate::params::ConnectionParams;
use crate::types::{ApiResponse, RawResponse, ResponseMeta, SearchRequest};

/// Counts constructions and closes, and fails on demand.
#[derive(Default)]
pub(crate) struct MockConnector {
    pub connects: Arc<AtomicUsize>,
    pub closes: Arc<AtomicUsize>,
    pub last_params: std::sync::Mutex<Option<ConnectionParams>>,
    pub fail_connect: AtomicBool,
    pub fail_close: bool,
    pub ping_healthy: Option<bool>,
    pub connect_delay: Option<Duration>,
    pub version_override: Option<EsVersion>,
}

impl MockConnector {
    pub fn new() -> Self {
        Self {
            ping_healthy: Some(true),
            ..Default::default()
        }
    }

    pub fn failing_close() -> Self {
        Self {
            fail_close: true,
            ..Self::new()
        }
    }

    pub fn connect_count(&self) -> usize {
        self.connects.load(Ordering::SeqCst)
    }

    pub fn close_count(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BackendConnector for MockConnector {
    async fn connect(
        &self,
        version: EsVersion,
        params: &ConnectionParams,
    ) -> Result<Box<dyn SearchBackend>, ClientError> {
        if let Some(delay) = self.connect_delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail_connect.load(Ordering::SeqCst) {
            return Err(ClientError::connection("Mock connection refused"));
        }

        self.connects.fetch_add(1, Ordering::SeqCst);
        *self.last_params.lock().unwrap() = Some(params.clone());

        Ok(Box::new(MockBackend {
            version: self.version_override.unwrap_or(version),
            closes: Arc::clone(&self.closes),
            fail_close: self.fail_close,
            ping_healthy: self.ping_healthy,
        }))
    }
}

pub(crate) struct MockBackend {
    version: EsVersion,
    closes: Arc<AtomicUsize>,
    fail_close: bool,
    ping_healthy: Option<bool>,
}

#[async_trait]
impl SearchBackend for MockBackend {
    fn version(&self) -> EsVersion {
        self.version
    }

    async fn send(&self, request: &SearchRequest) -> Result<RawResponse, ClientError> {
        let body = json!({ "path": request.path });
        Ok(match self.version {
            EsVersion::V7 => RawResponse::Body(body),
            EsVersion::V8 => RawResponse::Api(ApiResponse {
                meta: ResponseMeta {
                    status: 200,
                    ..Default::default()
                },
                body,
            }),
        })
    }

    async fn ping(&self) -> Result<bool, ClientError> {
        self.ping_healthy
            .ok_or_else(|| ClientError::connection("Mock cluster unreachable"))
    }

    async fn close(&self) -> Result<(), ClientError> {
        self.closes.fetch_add(1, Ordering::SeqCst);
        if self.fail_close {
            return Err(ClientError::close("Mock close failure"));
        }
        Ok(())
    }
}
