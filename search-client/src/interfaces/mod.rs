//! Interface definitions for the version-specific client backends.
//!
//! This module defines the capability traits that let the registry create,
//! use, and close a client without knowing which server generation it
//! talks to.

mod search_backend;

pub use search_backend::{BackendConnector, SearchBackend};
