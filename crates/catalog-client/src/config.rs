//! Client configuration and credentials.
//!
//! Both are plain values built once at startup and passed to
//! [`CatalogClient::new`](crate::CatalogClient::new).

use url::Url;
use zeroize::Zeroizing;

/// Environment variable holding the backend base URL.
pub const ENV_API_URL: &str = "CATALOG_API_URL";
/// Environment variable holding the bearer token.
pub const ENV_API_TOKEN: &str = "CATALOG_API_TOKEN";
/// Environment variable holding the request timeout in seconds.
pub const ENV_API_TIMEOUT: &str = "CATALOG_API_TIMEOUT_SECS";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Errors building configuration or credentials.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A required environment variable is not set.
    #[error("environment variable {0} is not set")]
    Missing(&'static str),
    /// The base URL does not parse.
    #[error("invalid base URL {value:?}: {reason}")]
    InvalidUrl { value: String, reason: String },
    /// The timeout is not a positive integer.
    #[error("invalid timeout {0:?}; expected a positive number of seconds")]
    InvalidTimeout(String),
    /// The token is empty or not a valid header value.
    #[error("API token is empty or contains invalid characters")]
    InvalidToken,
}

/// Where and how long to talk to the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Backend base URL, e.g. `https://admin.example.com`.
    pub base_url: Url,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl ClientConfig {
    /// Configuration with the default timeout.
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Parse `base_url` and use the default timeout.
    pub fn parse(base_url: &str) -> Result<Self, ConfigError> {
        let url = Url::parse(base_url).map_err(|e| ConfigError::InvalidUrl {
            value: base_url.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self::new(url))
    }

    /// Read `CATALOG_API_URL` and `CATALOG_API_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup (environment, config map, test fixture).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw_url = lookup(ENV_API_URL).ok_or(ConfigError::Missing(ENV_API_URL))?;
        let mut config = Self::parse(&raw_url)?;
        if let Some(raw) = lookup(ENV_API_TIMEOUT) {
            config.timeout_secs = parse_timeout(&raw)?;
        }
        Ok(config)
    }
}

/// Parse a positive timeout in seconds.
pub fn parse_timeout(raw: &str) -> Result<u64, ConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(secs),
        _ => Err(ConfigError::InvalidTimeout(raw.to_string())),
    }
}

/// Bearer token for the backend. Zeroed on drop, redacted in `Debug`.
#[derive(Clone)]
pub struct Credentials {
    token: Zeroizing<String>,
}

impl Credentials {
    /// Wrap a bearer token.
    pub fn new(token: impl Into<String>) -> Result<Self, ConfigError> {
        let token = Zeroizing::new(token.into());
        if token.trim().is_empty() {
            return Err(ConfigError::InvalidToken);
        }
        Ok(Self { token })
    }

    /// Read `CATALOG_API_TOKEN`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let token = std::env::var(ENV_API_TOKEN).map_err(|_| ConfigError::Missing(ENV_API_TOKEN))?;
        Self::new(token)
    }

    /// The `Authorization` header value.
    pub(crate) fn bearer(&self) -> Zeroizing<String> {
        Zeroizing::new(format!("Bearer {}", self.token.as_str()))
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials").field("token", &"<redacted>").finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn from_lookup_reads_url_and_timeout() {
        let config = ClientConfig::from_lookup(lookup(&[
            (ENV_API_URL, "https://admin.example.com"),
            (ENV_API_TIMEOUT, "5"),
        ]))
        .unwrap();
        assert_eq!(config.base_url.as_str(), "https://admin.example.com/");
        assert_eq!(config.timeout_secs, 5);
    }

    #[test]
    fn from_lookup_defaults_timeout() {
        let config =
            ClientConfig::from_lookup(lookup(&[(ENV_API_URL, "http://localhost:8080")])).unwrap();
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn from_lookup_requires_url() {
        let err = ClientConfig::from_lookup(lookup(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing(ENV_API_URL)));
    }

    #[test]
    fn rejects_bad_url_and_timeout() {
        assert!(matches!(
            ClientConfig::parse("not a url"),
            Err(ConfigError::InvalidUrl { .. })
        ));
        assert!(matches!(parse_timeout("0"), Err(ConfigError::InvalidTimeout(_))));
        assert!(matches!(parse_timeout("ten"), Err(ConfigError::InvalidTimeout(_))));
    }

    #[test]
    fn credentials_reject_empty_and_redact() {
        assert!(matches!(Credentials::new("  "), Err(ConfigError::InvalidToken)));
        let creds = Credentials::new("s3cret").unwrap();
        assert_eq!(creds.bearer().as_str(), "Bearer s3cret");
        assert!(!format!("{creds:?}").contains("s3cret"));
    }
}
