//! # Search Client
//!
//! This crate manages the shared connection to a search cluster running
//! either the 7.x or the 8.x server generation. It includes the connection
//! parameter builder, the version-specific client backends, a registry that
//! owns the single live client, and response normalization across the two
//! generations.

pub mod client;
pub mod config;
pub mod connector;
pub mod elasticsearch;
pub mod errors;
pub mod handle;
pub mod interfaces;
pub mod lifecycle;
pub mod normalizer;
pub mod opensearch;
pub mod params;
pub mod types;

#[cfg(test)]
pub(crate) mod test_support;

pub use crate::client::{ClientRegistry, CloseOutcome, LifecycleState};
pub use crate::config::{EsConfig, EsVersion};
pub use crate::connector::VersionedConnector;
pub use crate::elasticsearch::ElasticsearchBackend;
pub use crate::errors::ClientError;
pub use crate::handle::ClientHandle;
pub use crate::interfaces::{BackendConnector, SearchBackend};
pub use crate::lifecycle::ConnectionManager;
pub use crate::normalizer::normalize;
pub use crate::opensearch::OpenSearchBackend;
pub use crate::params::{build_params, AuthMode, ConnectionParams};
pub use crate::types::{ApiResponse, RawResponse, RequestMethod, ResponseMeta, SearchRequest};
