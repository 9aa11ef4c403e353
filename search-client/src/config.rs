//! Configuration types for the search cluster connection.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::ClientError;

/// Server generation the client talks to.
///
/// The two generations use incompatible client libraries, so the choice is
/// made once when the connection is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum EsVersion {
    /// 7.x clusters.
    V7,
    /// 8.x clusters.
    #[default]
    V8,
}

impl EsVersion {
    /// Major version number.
    pub fn major(self) -> u8 {
        match self {
            EsVersion::V7 => 7,
            EsVersion::V8 => 8,
        }
    }
}

impl TryFrom<u8> for EsVersion {
    type Error = ClientError;

    fn try_from(major: u8) -> Result<Self, Self::Error> {
        match major {
            7 => Ok(EsVersion::V7),
            8 => Ok(EsVersion::V8),
            other => Err(ClientError::configuration(format!(
                "Unsupported search engine version {} (expected 7 or 8)",
                other
            ))),
        }
    }
}

impl From<EsVersion> for u8 {
    fn from(version: EsVersion) -> Self {
        version.major()
    }
}

impl FromStr for EsVersion {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let major: u8 = s.trim().parse().map_err(|_| {
            ClientError::configuration(format!("Invalid search engine version: {:?}", s))
        })?;
        EsVersion::try_from(major)
    }
}

impl fmt::Display for EsVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.major())
    }
}

/// Connection settings for the search cluster.
///
/// Loaded by the hosting application before the first client is acquired.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EsConfig {
    /// Cluster host name or address.
    pub host: String,
    /// Cluster HTTP port.
    pub port: u16,
    /// Connect over HTTPS instead of HTTP.
    #[serde(default)]
    pub use_ssl: bool,
    /// Verify server certificates. Only consulted when `use_ssl` is set.
    #[serde(default = "default_verify_certs")]
    pub verify_certs: bool,
    /// Username for basic authentication.
    #[serde(default)]
    pub username: Option<String>,
    /// Password for basic authentication.
    #[serde(default)]
    pub password: Option<String>,
    /// Encoded API key.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Server generation.
    #[serde(default)]
    pub es_version: EsVersion,
}

fn default_verify_certs() -> bool {
    true
}

impl Default for EsConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 9200,
            use_ssl: false,
            verify_certs: default_verify_certs(),
            username: None,
            password: None,
            api_key: None,
            es_version: EsVersion::default(),
        }
    }
}

impl EsConfig {
    /// Create a config for the given host and port with everything else defaulted.
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Default::default()
        }
    }

    /// Set the server generation.
    pub fn with_version(mut self, es_version: EsVersion) -> Self {
        self.es_version = es_version;
        self
    }

    /// Enable HTTPS with the given certificate verification setting.
    pub fn with_ssl(mut self, verify_certs: bool) -> Self {
        self.use_ssl = true;
        self.verify_certs = verify_certs;
        self
    }

    /// Set basic authentication credentials.
    pub fn with_basic_auth(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    /// Set an API key.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Check the fields the connection cannot be built without.
    pub fn validate(&self) -> Result<(), ClientError> {
        if self.host.trim().is_empty() {
            return Err(ClientError::configuration("host is required"));
        }
        if self.port == 0 {
            return Err(ClientError::configuration("port must be greater than zero"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EsConfig::default();

        assert_eq!(config.host, "localhost");
        assert_eq!(config.port, 9200);
        assert!(!config.use_ssl);
        assert!(config.verify_certs);
        assert_eq!(config.es_version, EsVersion::V8);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_missing_host() {
        let config = EsConfig::new("  ", 9200);

        let result = config.validate();
        assert!(matches!(result, Err(ClientError::ConfigurationError(_))));
    }

    #[test]
    fn test_validate_rejects_zero_port() {
        let config = EsConfig::new("localhost", 0);

        assert!(matches!(
            config.validate(),
            Err(ClientError::ConfigurationError(_))
        ));
    }

    #[test]
    fn test_version_parsing() {
        assert_eq!("7".parse::<EsVersion>().unwrap(), EsVersion::V7);
        assert_eq!(" 8 ".parse::<EsVersion>().unwrap(), EsVersion::V8);
        assert!("6".parse::<EsVersion>().is_err());
        assert!("eight".parse::<EsVersion>().is_err());
    }

    #[test]
    fn test_deserialize_config() {
        let config: EsConfig = serde_json::from_str(
            r#"{"host": "search.internal", "port": 9243, "use_ssl": true, "es_version": 7}"#,
        )
        .unwrap();

        assert_eq!(config.host, "search.internal");
        assert_eq!(config.port, 9243);
        assert!(config.use_ssl);
        assert!(config.verify_certs);
        assert_eq!(config.es_version, EsVersion::V7);
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_deserialize_rejects_unknown_version() {
        let result: Result<EsConfig, _> =
            serde_json::from_str(r#"{"host": "localhost", "port": 9200, "es_version": 6}"#);
        assert!(result.is_err());
    }
}
