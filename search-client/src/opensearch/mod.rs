//! 7.x backend.
//!
//! This module provides the `SearchBackend` used for 7.x clusters.

mod client;

pub use client::OpenSearchBackend;
