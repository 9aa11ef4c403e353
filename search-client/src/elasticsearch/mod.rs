//! 8.x backend.

mod client;

pub use client::ElasticsearchBackend;
