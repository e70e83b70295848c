//! In-memory cookie storage with expiry tracking.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use quill_domain::{CookieJar, StoredCookie};
use tokio::sync::RwLock;

use crate::ports::{Clock, CookieStorage, StorageError};

#[derive(Debug, Clone, Copy, Default)]
struct UtcClock;

impl Clock for UtcClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Thread-safe cookie storage that lives as long as the process.
///
/// Used by tests and by short-lived tools that should not leave tokens on
/// disk.
#[derive(Clone)]
pub struct MemoryCookieStorage {
    jar: Arc<RwLock<CookieJar>>,
    clock: Arc<dyn Clock>,
}

impl MemoryCookieStorage {
    /// Creates an empty storage using the system clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(Arc::new(UtcClock))
    }

    /// Creates an empty storage evaluating expiry against `clock`.
    #[must_use]
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            jar: Arc::new(RwLock::new(CookieJar::new())),
            clock,
        }
    }

    /// Number of stored entries, expired ones included.
    pub async fn len(&self) -> usize {
        self.jar.read().await.len()
    }

    /// Returns true if nothing is stored.
    pub async fn is_empty(&self) -> bool {
        self.jar.read().await.is_empty()
    }
}

impl Default for MemoryCookieStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MemoryCookieStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryCookieStorage").finish_non_exhaustive()
    }
}

#[async_trait]
impl CookieStorage for MemoryCookieStorage {
    async fn set(&self, name: &str, value: &str, ttl: Duration) -> Result<(), StorageError> {
        let now = self.clock.now();
        let cookie = StoredCookie::new(name, value, Some(ttl), now)?;
        let mut jar = self.jar.write().await;
        jar.prune(now);
        jar.set(cookie);
        Ok(())
    }

    async fn get(&self, name: &str) -> Result<Option<String>, StorageError> {
        let jar = self.jar.read().await;
        Ok(jar.get(name, self.clock.now()).map(str::to_string))
    }

    async fn remove(&self, name: &str) -> Result<(), StorageError> {
        self.jar.write().await.remove(name);
        Ok(())
    }
}
