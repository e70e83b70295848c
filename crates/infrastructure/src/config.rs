//! Client configuration loading.
//!
//! Sources, lowest precedence first:
//! 1. built-in defaults ([`ClientConfig::default`])
//! 2. an optional TOML file (`quill.toml` in the working directory unless
//!    another path is given)
//! 3. `QUILL_*` environment variables, e.g. `QUILL_API_URL`,
//!    `QUILL_TIMEOUT_MS`, `QUILL_COOKIE_FILE`
//!
//! The result is validated once; an unusable base URL is a start-up error.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use quill_domain::{ClientConfig, DomainError};
use thiserror::Error;
use tracing::debug;

/// Default configuration file name.
pub const DEFAULT_CONFIG_FILE: &str = "quill.toml";

/// Default environment variable prefix.
pub const DEFAULT_ENV_PREFIX: &str = "QUILL";

/// Errors raised while resolving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A source could not be read or did not match the expected shape.
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    /// The resolved values are unusable.
    #[error("invalid configuration: {0}")]
    Invalid(#[from] DomainError),
}

/// Builds a [`ClientConfig`] from layered sources.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    file: PathBuf,
    env_prefix: String,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self {
            file: PathBuf::from(DEFAULT_CONFIG_FILE),
            env_prefix: DEFAULT_ENV_PREFIX.to_string(),
        }
    }
}

impl ConfigLoader {
    /// Loader for `quill.toml` and `QUILL_*` variables.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads the optional file at `path` instead of `quill.toml`.
    #[must_use]
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        self.file = path.as_ref().to_path_buf();
        self
    }

    /// Reads `<PREFIX>_*` environment variables instead of `QUILL_*`.
    #[must_use]
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Resolves and validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if a source is malformed or the resulting base
    /// URL or timeout is invalid.
    pub fn load(&self) -> Result<ClientConfig, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(self.file.as_path()).required(false))
            .add_source(Environment::with_prefix(&self.env_prefix).try_parsing(true))
            .build()?;

        let config: ClientConfig = settings.try_deserialize()?;
        let base_url = config.base_url()?;
        debug!(%base_url, timeout_ms = config.timeout_ms, "configuration resolved");
        Ok(config)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use quill_domain::settings::DEFAULT_API_URL;
    use tempfile::tempdir;

    use super::*;

    const UNUSED_PREFIX: &str = "QUILL_CONFIG_TEST_UNSET";

    #[test]
    fn test_defaults_without_sources() {
        let dir = tempdir().expect("temp dir");
        let config = ConfigLoader::new()
            .with_file(dir.path().join("missing.toml"))
            .with_env_prefix(UNUSED_PREFIX)
            .load()
            .expect("defaults load");

        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.api_url, DEFAULT_API_URL);
    }

    #[test]
    fn test_file_overrides_defaults() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("quill.toml");
        std::fs::write(
            &path,
            "api_url = \"https://blog.example.com\"\ntimeout_ms = 5000\ncookie_file = \"/tmp/quill-cookies.json\"\n",
        )
        .unwrap();

        let config = ConfigLoader::new()
            .with_file(&path)
            .with_env_prefix(UNUSED_PREFIX)
            .load()
            .expect("file loads");

        assert_eq!(config.api_url, "https://blog.example.com");
        assert_eq!(config.timeout_ms, 5000);
        assert_eq!(config.api_prefix, "/api/v1");
        assert_eq!(
            config.cookie_file,
            Some(PathBuf::from("/tmp/quill-cookies.json"))
        );
    }

    #[test]
    fn test_invalid_url_is_rejected() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("quill.toml");
        std::fs::write(&path, "api_url = \"ftp://example.com\"\n").unwrap();

        let result = ConfigLoader::new()
            .with_file(&path)
            .with_env_prefix(UNUSED_PREFIX)
            .load();

        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_malformed_file_is_a_load_error() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("quill.toml");
        std::fs::write(&path, "timeout_ms = \"soon\"\n").unwrap();

        let result = ConfigLoader::new()
            .with_file(&path)
            .with_env_prefix(UNUSED_PREFIX)
            .load();

        assert!(matches!(result, Err(ConfigError::Load(_))));
    }
}
