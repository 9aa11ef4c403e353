//! Settings loaded from environment variables.

use std::env;

use search_client::{EsConfig, EsVersion};

use crate::GatewayError;

/// Default cluster host.
const DEFAULT_ES_HOST: &str = "localhost";

/// Default cluster port.
const DEFAULT_ES_PORT: u16 = 9200;

/// Gateway settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Search cluster connection settings.
    pub es: EsConfig,
    /// Ping the cluster when the client is created.
    pub verify_connection: bool,
}

impl Settings {
    /// Load settings from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `ES_HOST`: Cluster host (default: localhost)
    /// - `ES_PORT`: Cluster port (default: 9200)
    /// - `ES_USE_SSL`: Connect over HTTPS (default: false)
    /// - `ES_VERIFY_CERTS`: Verify server certificates (default: true)
    /// - `ES_USERNAME` / `ES_PASSWORD`: Basic authentication credentials
    /// - `ES_API_KEY`: Encoded API key
    /// - `ES_VERSION`: Server generation, 7 or 8 (default: 8)
    /// - `GATEWAY_VERIFY_CONNECTION`: Ping the cluster on startup (default: true)
    pub fn from_env() -> Result<Self, GatewayError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load settings through an arbitrary variable lookup. Empty values
    /// count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, GatewayError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match var("ES_PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| GatewayError::config(format!("ES_PORT is not a valid port: {}", raw)))?,
            None => DEFAULT_ES_PORT,
        };

        let es_version = match var("ES_VERSION") {
            Some(raw) => raw
                .parse::<EsVersion>()
                .map_err(|e| GatewayError::config(format!("ES_VERSION: {}", e)))?,
            None => EsVersion::default(),
        };

        let es = EsConfig {
            host: var("ES_HOST").unwrap_or_else(|| DEFAULT_ES_HOST.to_string()),
            port,
            use_ssl: parse_bool("ES_USE_SSL", var("ES_USE_SSL"), false)?,
            verify_certs: parse_bool("ES_VERIFY_CERTS", var("ES_VERIFY_CERTS"), true)?,
            username: var("ES_USERNAME"),
            password: var("ES_PASSWORD"),
            api_key: var("ES_API_KEY"),
            es_version,
        };

        let verify_connection = parse_bool(
            "GATEWAY_VERIFY_CONNECTION",
            var("GATEWAY_VERIFY_CONNECTION"),
            true,
        )?;

        Ok(Self {
            es,
            verify_connection,
        })
    }
}

fn parse_bool(key: &str, value: Option<String>, default: bool) -> Result<bool, GatewayError> {
    let Some(raw) = value else {
        return Ok(default);
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(GatewayError::config(format!(
            "{} is not a valid boolean: {}",
            key, raw
        ))),
    }
}
