//! Cookie storage port
//!
//! Persisted key/value store scoped to one client installation. Values
//! are opaque strings; nothing here inspects token contents.

use async_trait::async_trait;
use chrono::Duration;
use quill_domain::DomainError;

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The cookie name is not acceptable.
    #[error("invalid cookie: {0}")]
    Invalid(#[from] DomainError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Named values with independent expiry horizons.
///
/// Writes are visible to subsequent reads through the same storage.
#[async_trait]
pub trait CookieStorage: Send + Sync {
    /// Stores `value` under `name`, expiring after `ttl`.
    ///
    /// # Errors
    /// Returns an error if the value cannot be persisted.
    async fn set(&self, name: &str, value: &str, ttl: Duration) -> Result<(), StorageError>;

    /// Returns the live value stored under `name`.
    ///
    /// Expired values are reported as absent.
    ///
    /// # Errors
    /// Returns an error if the backing store cannot be read.
    async fn get(&self, name: &str) -> Result<Option<String>, StorageError>;

    /// Removes `name`. Removing an absent value is not an error.
    ///
    /// # Errors
    /// Returns an error if the backing store cannot be written.
    async fn remove(&self, name: &str) -> Result<(), StorageError>;
}
