//! Client error types.
//!
//! This module defines the errors that can occur while creating, using,
//! or tearing down the search cluster connection.

use thiserror::Error;

/// Errors that can occur during search client operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// Required configuration is missing or malformed.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// Failed to create the client or reach the cluster.
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// A request sent through the client failed.
    #[error("Request error: {0}")]
    RequestError(String),

    /// Failed to close the client.
    #[error("Close error: {0}")]
    CloseError(String),

    /// A response did not have the shape expected for its server generation.
    #[error("Normalization error: {0}")]
    NormalizationError(String),
}

impl ClientError {
    /// Create a configuration error.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::ConfigurationError(msg.into())
    }

    /// Create a connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::ConnectionError(msg.into())
    }

    /// Create a request error.
    pub fn request(msg: impl Into<String>) -> Self {
        Self::RequestError(msg.into())
    }

    /// Create a close error.
    pub fn close(msg: impl Into<String>) -> Self {
        Self::CloseError(msg.into())
    }

    /// Create a normalization error.
    pub fn normalization(msg: impl Into<String>) -> Self {
        Self::NormalizationError(msg.into())
    }
}
