//! Connection parameters derived from configuration.

use tracing::{debug, warn};

use crate::config::EsConfig;

/// Credential mode used when talking to the cluster.
#[derive(Clone, PartialEq, Eq)]
pub enum AuthMode {
    /// No credentials are sent.
    None,
    /// Username and password.
    BasicAuth { username: String, password: String },
    /// Encoded API key.
    ApiKey(String),
}

// Hand-written so credentials never end up in logs.
impl std::fmt::Debug for AuthMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthMode::None => f.write_str("None"),
            AuthMode::BasicAuth { username, .. } => f
                .debug_struct("BasicAuth")
                .field("username", username)
                .field("password", &"<redacted>")
                .finish(),
            AuthMode::ApiKey(_) => f.debug_tuple("ApiKey").field(&"<redacted>").finish(),
        }
    }
}

impl AuthMode {
    /// Short name of the mode, safe to log.
    pub fn kind(&self) -> &'static str {
        match self {
            AuthMode::None => "none",
            AuthMode::BasicAuth { .. } => "basic",
            AuthMode::ApiKey(_) => "api_key",
        }
    }
}

/// Parameters handed to the underlying client constructor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionParams {
    /// Node URLs, currently always a single entry.
    pub hosts: Vec<String>,
    /// Certificate verification flag. `None` when SSL is off, which leaves
    /// the client library's own default in place.
    pub verify_certs: Option<bool>,
    /// Credential mode.
    pub auth: AuthMode,
}

impl ConnectionParams {
    /// Build connection parameters from configuration.
    ///
    /// Basic authentication wins over an API key when both are configured.
    /// Empty strings count as absent.
    pub fn from_config(config: &EsConfig) -> Self {
        let scheme = if config.use_ssl { "https" } else { "http" };
        let hosts = vec![format!("{}://{}:{}", scheme, config.host, config.port)];

        debug!(hosts = ?hosts, version = %config.es_version, "Building search client parameters");

        let verify_certs = config.use_ssl.then_some(config.verify_certs);

        let username = non_empty(&config.username);
        let password = non_empty(&config.password);
        let api_key = non_empty(&config.api_key);

        let auth = match (username, password, api_key) {
            (Some(username), Some(password), api_key) => {
                if api_key.is_some() {
                    warn!("Both basic auth and an API key are configured; the API key is ignored");
                }
                AuthMode::BasicAuth {
                    username: username.to_string(),
                    password: password.to_string(),
                }
            }
            (_, _, Some(key)) => AuthMode::ApiKey(key.to_string()),
            _ => AuthMode::None,
        };

        Self {
            hosts,
            verify_certs,
            auth,
        }
    }

    /// The node the single-node connection pool points at.
    pub fn primary_host(&self) -> Option<&str> {
        self.hosts.first().map(String::as_str)
    }
}

/// Build connection parameters from configuration.
pub fn build_params(config: &EsConfig) -> ConnectionParams {
    ConnectionParams::from_config(config)
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EsVersion;

    #[test]
    fn test_plain_http_omits_verify_certs() {
        let mut config = EsConfig::new("localhost", 9200);
        config.verify_certs = false;

        let params = build_params(&config);

        assert_eq!(params.hosts, vec!["http://localhost:9200".to_string()]);
        assert_eq!(params.verify_certs, None);
        assert_eq!(params.auth, AuthMode::None);
    }

    #[test]
    fn test_ssl_carries_verify_certs() {
        let params = build_params(&EsConfig::new("es.example.com", 9243).with_ssl(false));
        assert_eq!(params.hosts, vec!["https://es.example.com:9243".to_string()]);
        assert_eq!(params.verify_certs, Some(false));

        let params = build_params(&EsConfig::new("es.example.com", 9243).with_ssl(true));
        assert_eq!(params.verify_certs, Some(true));
    }

    #[test]
    fn test_basic_auth_takes_precedence_over_api_key() {
        let config = EsConfig::new("localhost", 9200)
            .with_basic_auth("elastic", "changeme")
            .with_api_key("abc");

        let params = build_params(&config);

        assert_eq!(
            params.auth,
            AuthMode::BasicAuth {
                username: "elastic".to_string(),
                password: "changeme".to_string(),
            }
        );
    }

    #[test]
    fn test_api_key_used_when_basic_auth_incomplete() {
        let mut config = EsConfig::new("localhost", 9200).with_api_key("abc");
        config.username = Some("elastic".to_string());
        config.password = Some(String::new());

        assert_eq!(build_params(&config).auth, AuthMode::ApiKey("abc".to_string()));

        config.password = None;
        config.username = None;
        assert_eq!(build_params(&config).auth, AuthMode::ApiKey("abc".to_string()));
    }

    #[test]
    fn test_empty_api_key_means_no_auth() {
        let config = EsConfig::new("localhost", 9200).with_api_key("");
        assert_eq!(build_params(&config).auth, AuthMode::None);
    }

    #[test]
    fn test_api_key_over_plain_http() {
        let config = EsConfig::new("localhost", 9200)
            .with_version(EsVersion::V8)
            .with_api_key("abc");

        let params = build_params(&config);

        assert_eq!(params.hosts, vec!["http://localhost:9200".to_string()]);
        assert!(params.verify_certs.is_none());
        assert_eq!(params.auth, AuthMode::ApiKey("abc".to_string()));
        assert_eq!(params.primary_host(), Some("http://localhost:9200"));
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let basic = AuthMode::BasicAuth {
            username: "elastic".to_string(),
            password: "hunter2".to_string(),
        };
        let rendered = format!("{:?}", basic);
        assert!(rendered.contains("elastic"));
        assert!(!rendered.contains("hunter2"));

        let key = format!("{:?}", AuthMode::ApiKey("secret-key".to_string()));
        assert!(!key.contains("secret-key"));
        assert_eq!(AuthMode::ApiKey("k".to_string()).kind(), "api_key");
    }
}
