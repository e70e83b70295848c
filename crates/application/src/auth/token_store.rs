//! Bearer token storage.
//!
//! Thin wrapper over a [`CookieStorage`] that knows the names and expiry
//! horizons of the access and refresh tokens.

use std::sync::Arc;

use chrono::Duration;
use quill_domain::CredentialPair;
use tracing::debug;

use crate::ports::{CookieStorage, StorageError};

/// Cookie holding the short-lived access token.
pub const ACCESS_TOKEN: &str = "access_token";

/// Cookie holding the long-lived refresh token.
pub const REFRESH_TOKEN: &str = "refresh_token";

/// Access token lifetime (7 days).
#[must_use]
pub fn access_token_ttl() -> Duration {
    Duration::days(7)
}

/// Refresh token lifetime (30 days).
#[must_use]
pub fn refresh_token_ttl() -> Duration {
    Duration::days(30)
}

/// Shared handle to the persisted credential pair.
#[derive(Debug)]
pub struct TokenStore<S> {
    storage: Arc<S>,
}

impl<S> Clone for TokenStore<S> {
    fn clone(&self) -> Self {
        Self {
            storage: Arc::clone(&self.storage),
        }
    }
}

impl<S: CookieStorage> TokenStore<S> {
    /// Creates a token store over `storage`.
    pub fn new(storage: S) -> Self {
        Self {
            storage: Arc::new(storage),
        }
    }

    /// Returns the underlying storage.
    #[must_use]
    pub const fn storage(&self) -> &Arc<S> {
        &self.storage
    }

    /// Persists both tokens with their own expiry horizons.
    ///
    /// # Errors
    /// Returns an error if either token cannot be written.
    pub async fn store_pair(&self, pair: &CredentialPair) -> Result<(), StorageError> {
        self.storage
            .set(ACCESS_TOKEN, &pair.access_token, access_token_ttl())
            .await?;
        self.storage
            .set(REFRESH_TOKEN, &pair.refresh_token, refresh_token_ttl())
            .await?;
        debug!("stored credential pair");
        Ok(())
    }

    /// Replaces the access token only.
    ///
    /// # Errors
    /// Returns an error if the token cannot be written.
    pub async fn store_access_token(&self, token: &str) -> Result<(), StorageError> {
        self.storage
            .set(ACCESS_TOKEN, token, access_token_ttl())
            .await
    }

    /// Returns the stored access token, if live.
    ///
    /// # Errors
    /// Returns an error if the storage cannot be read.
    pub async fn access_token(&self) -> Result<Option<String>, StorageError> {
        self.storage.get(ACCESS_TOKEN).await
    }

    /// Returns the stored refresh token, if live.
    ///
    /// # Errors
    /// Returns an error if the storage cannot be read.
    pub async fn refresh_token(&self) -> Result<Option<String>, StorageError> {
        self.storage.get(REFRESH_TOKEN).await
    }

    /// Removes both tokens.
    ///
    /// Both removals are attempted even if the first one fails.
    ///
    /// # Errors
    /// Returns the first removal error.
    pub async fn clear(&self) -> Result<(), StorageError> {
        let access = self.storage.remove(ACCESS_TOKEN).await;
        let refresh = self.storage.remove(REFRESH_TOKEN).await;
        debug!("cleared credential pair");
        access.and(refresh)
    }
}
