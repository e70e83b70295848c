//! Client configuration model
//!
//! Defines how the client reaches the publishing API.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{DomainError, DomainResult};

/// Default API origin for local development.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Default versioned path prefix.
pub const DEFAULT_API_PREFIX: &str = "/api/v1";

/// Client configuration, resolved once at start-up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// API origin, e.g. `https://blog.example.com`.
    pub api_url: String,
    /// Path prefix prepended to every endpoint.
    pub api_prefix: String,
    /// Per-request timeout in milliseconds.
    pub timeout_ms: u64,
    /// User-Agent header value.
    pub user_agent: String,
    /// Where the token cookies are persisted. `None` means the platform default.
    pub cookie_file: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_prefix: DEFAULT_API_PREFIX.to_string(),
            timeout_ms: 30_000,
            user_agent: format!("quill/{}", env!("CARGO_PKG_VERSION")),
            cookie_file: None,
        }
    }
}

impl ClientConfig {
    /// Creates a configuration pointing at `api_url` with defaults elsewhere.
    #[must_use]
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            ..Self::default()
        }
    }

    /// Returns the request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Parses and checks the configured origin and prefix.
    ///
    /// Returns the base URL every endpoint path is appended to, without a
    /// trailing slash.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is not an absolute http(s) URL or the
    /// timeout is zero.
    pub fn base_url(&self) -> DomainResult<String> {
        let parsed = Url::parse(self.api_url.trim())
            .map_err(|e| DomainError::InvalidUrl(format!("{e}: {}", self.api_url)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(DomainError::InvalidUrl(format!(
                "URL must start with http:// or https://: {}",
                self.api_url
            )));
        }
        if self.timeout_ms == 0 {
            return Err(DomainError::InvalidConfig(
                "timeout_ms must be greater than zero".to_string(),
            ));
        }

        let origin = parsed.as_str().trim_end_matches('/');
        let prefix = self.api_prefix.trim().trim_matches('/');
        if prefix.is_empty() {
            Ok(origin.to_string())
        } else {
            Ok(format!("{origin}/{prefix}"))
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn test_default_base_url() {
        let config = ClientConfig::default();
        assert_eq!(
            config.base_url().as_deref(),
            Ok("http://localhost:8000/api/v1")
        );
    }

    #[test]
    fn test_trailing_slashes_are_normalized() {
        let mut config = ClientConfig::new("https://blog.example.com/");
        config.api_prefix = "/api/v2/".to_string();
        assert_eq!(
            config.base_url().as_deref(),
            Ok("https://blog.example.com/api/v2")
        );
    }

    #[test]
    fn test_rejects_non_http_urls() {
        assert!(ClientConfig::new("ftp://example.com").base_url().is_err());
        assert!(ClientConfig::new("not a url").base_url().is_err());
    }

    #[test]
    fn test_rejects_zero_timeout() {
        let mut config = ClientConfig::default();
        config.timeout_ms = 0;
        assert!(matches!(
            config.base_url(),
            Err(DomainError::InvalidConfig(_))
        ));
    }
}
