//! # Search Gateway
//!
//! Service entry point that owns the shared search cluster connection.
//!
//! This crate loads the connection settings, wires the connection manager,
//! verifies the cluster on startup, and closes the connection on shutdown.

pub mod config;

pub use config::{Dependencies, Settings};

use thiserror::Error;

/// Errors that can occur during gateway startup or execution.
#[derive(Error, Debug)]
pub enum GatewayError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Search client error.
    #[error("Search client error: {0}")]
    ClientError(#[from] search_client::ClientError),

    /// IO error.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl GatewayError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}
