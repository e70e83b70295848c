//! File-based cookie storage.
//!
//! Cookies live in a single JSON jar, by default
//! `<config dir>/quill/cookies.json`:
//! ```json
//! {
//!   "schema_version": 1,
//!   "cookies": {
//!     "access_token": {
//!       "name": "access_token",
//!       "value": "...",
//!       "expires": "2026-01-08T00:00:00Z",
//!       "created_at": "2026-01-01T00:00:00Z"
//!     }
//!   }
//! }
//! ```

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Duration;
use quill_application::ports::{Clock, CookieStorage, FileSystem, FileSystemError, StorageError};
use quill_domain::{CookieJar, StoredCookie};
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::adapters::SystemClock;
use crate::serialization::{from_json_bytes, to_json_stable_bytes};

/// Platform default location of the cookie jar.
#[must_use]
pub fn default_cookie_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("quill").join("cookies.json"))
}

/// Cookie storage persisted to a JSON file.
///
/// Writes are serialized through an internal lock so concurrent `set`
/// calls from one process do not lose updates.
#[derive(Debug)]
pub struct FileCookieStorage<F, K = SystemClock> {
    fs: F,
    clock: K,
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl<F: FileSystem> FileCookieStorage<F> {
    /// Creates a storage at `path` using the system clock.
    pub fn new(fs: F, path: impl Into<PathBuf>) -> Self {
        Self::with_clock(fs, SystemClock, path)
    }
}

impl<F: FileSystem, K: Clock> FileCookieStorage<F, K> {
    /// Creates a storage evaluating expiry against `clock`.
    pub fn with_clock(fs: F, clock: K, path: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            clock,
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Location of the jar.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<CookieJar, StorageError> {
        if !self.fs.exists(&self.path).await {
            return Ok(CookieJar::new());
        }

        let content = self.fs.read_file(&self.path).await.map_err(io_error)?;
        match from_json_bytes::<CookieJar>(&content) {
            Ok(jar) => Ok(jar),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "discarding unreadable cookie jar");
                Ok(CookieJar::new())
            }
        }
    }

    async fn save(&self, jar: &CookieJar) -> Result<(), StorageError> {
        let content =
            to_json_stable_bytes(jar).map_err(|e| StorageError::Serialization(e.to_string()))?;
        self.fs
            .write_file(&self.path, &content)
            .await
            .map_err(io_error)
    }
}

fn io_error(e: FileSystemError) -> StorageError {
    StorageError::Io(e.into())
}

#[async_trait]
impl<F: FileSystem, K: Clock> CookieStorage for FileCookieStorage<F, K> {
    async fn set(&self, name: &str, value: &str, ttl: Duration) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().await;
        let now = self.clock.now();
        let cookie = StoredCookie::new(name, value, Some(ttl), now)?;

        let mut jar = self.load().await?;
        let pruned = jar.prune(now);
        if pruned > 0 {
            debug!(pruned, "pruned expired cookies");
        }
        jar.set(cookie);
        self.save(&jar).await
    }

    async fn get(&self, name: &str) -> Result<Option<String>, StorageError> {
        let jar = self.load().await?;
        Ok(jar.get(name, self.clock.now()).map(str::to_string))
    }

    async fn remove(&self, name: &str) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().await;
        let mut jar = self.load().await?;
        if jar.remove(name).is_none() {
            return Ok(());
        }
        if jar.is_empty() {
            debug!(path = %self.path.display(), "cookie jar emptied, removing file");
            return match self.fs.remove_file(&self.path).await {
                Ok(()) | Err(FileSystemError::NotFound(_)) => Ok(()),
                Err(e) => Err(io_error(e)),
            };
        }
        self.save(&jar).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use std::sync::{Arc, Mutex as StdMutex};

    use chrono::{DateTime, TimeZone, Utc};
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    use super::*;
    use crate::persistence::TokioFileSystem;

    #[derive(Clone)]
    struct ManualClock(Arc<StdMutex<DateTime<Utc>>>);

    impl ManualClock {
        fn new() -> Self {
            Self(Arc::new(StdMutex::new(
                Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
            )))
        }

        fn advance(&self, by: Duration) {
            let mut now = self.0.lock().unwrap();
            *now += by;
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> DateTime<Utc> {
            *self.0.lock().unwrap()
        }
    }

    #[test]
    fn test_default_path_is_under_quill() {
        if let Some(path) = default_cookie_path() {
            assert!(path.ends_with("quill/cookies.json"));
        }
    }

    #[tokio::test]
    async fn test_values_survive_a_new_instance() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("cookies.json");

        let storage = FileCookieStorage::new(TokioFileSystem::new(), &path);
        storage
            .set("access_token", "T1", Duration::days(7))
            .await
            .expect("set");

        let reopened = FileCookieStorage::new(TokioFileSystem::new(), &path);
        assert_eq!(
            reopened.get("access_token").await.expect("get").as_deref(),
            Some("T1")
        );
    }

    #[tokio::test]
    async fn test_missing_file_reads_as_empty() {
        let dir = tempdir().expect("temp dir");
        let storage = FileCookieStorage::new(TokioFileSystem::new(), dir.path().join("none.json"));

        assert_eq!(storage.get("access_token").await.expect("get"), None);
        storage.remove("access_token").await.expect("remove");
        assert!(!dir.path().join("none.json").exists());
    }

    #[tokio::test]
    async fn test_expiry_is_per_cookie() {
        let dir = tempdir().expect("temp dir");
        let clock = ManualClock::new();
        let storage = FileCookieStorage::with_clock(
            TokioFileSystem::new(),
            clock.clone(),
            dir.path().join("cookies.json"),
        );
        storage.set("access_token", "T1", Duration::days(7)).await.unwrap();
        storage.set("refresh_token", "R1", Duration::days(30)).await.unwrap();

        clock.advance(Duration::days(8));

        assert_eq!(storage.get("access_token").await.unwrap(), None);
        assert_eq!(
            storage.get("refresh_token").await.unwrap().as_deref(),
            Some("R1")
        );
    }

    #[tokio::test]
    async fn test_write_prunes_expired_entries() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("cookies.json");
        let clock = ManualClock::new();
        let storage = FileCookieStorage::with_clock(TokioFileSystem::new(), clock.clone(), &path);
        storage.set("old", "1", Duration::days(1)).await.unwrap();

        clock.advance(Duration::days(2));
        storage.set("new", "2", Duration::days(1)).await.unwrap();

        let jar: CookieJar = from_json_bytes(&std::fs::read(&path).unwrap()).unwrap();
        assert_eq!(jar.cookies.keys().collect::<Vec<_>>(), vec!["new"]);
    }

    #[tokio::test]
    async fn test_remove_deletes_only_named_cookie() {
        let dir = tempdir().expect("temp dir");
        let storage = FileCookieStorage::new(TokioFileSystem::new(), dir.path().join("c.json"));
        storage.set("access_token", "T1", Duration::days(7)).await.unwrap();
        storage.set("refresh_token", "R1", Duration::days(30)).await.unwrap();

        storage.remove("access_token").await.unwrap();
        storage.remove("access_token").await.unwrap();

        assert_eq!(storage.get("access_token").await.unwrap(), None);
        assert_eq!(
            storage.get("refresh_token").await.unwrap().as_deref(),
            Some("R1")
        );
    }

    #[tokio::test]
    async fn test_removing_last_cookie_deletes_jar() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("cookies.json");
        let storage = FileCookieStorage::new(TokioFileSystem::new(), &path);
        storage.set("access_token", "T1", Duration::days(7)).await.unwrap();
        storage.set("refresh_token", "R1", Duration::days(30)).await.unwrap();

        storage.remove("access_token").await.unwrap();
        assert!(path.exists());

        storage.remove("refresh_token").await.unwrap();
        assert!(!path.exists());
        assert_eq!(storage.get("refresh_token").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_corrupt_jar_is_replaced() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("cookies.json");
        std::fs::write(&path, "not json").unwrap();
        let storage = FileCookieStorage::new(TokioFileSystem::new(), &path);

        assert_eq!(storage.get("access_token").await.unwrap(), None);
        storage.set("access_token", "T1", Duration::days(7)).await.unwrap();
        assert_eq!(
            storage.get("access_token").await.unwrap().as_deref(),
            Some("T1")
        );
    }

    #[tokio::test]
    async fn test_invalid_name_is_rejected() {
        let dir = tempdir().expect("temp dir");
        let storage = FileCookieStorage::new(TokioFileSystem::new(), dir.path().join("c.json"));

        let result = storage.set("bad name", "x", Duration::days(1)).await;

        assert!(matches!(result, Err(StorageError::Invalid(_))));
    }

    #[tokio::test]
    async fn test_jar_is_stable_json() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("cookies.json");
        let storage =
            FileCookieStorage::with_clock(TokioFileSystem::new(), ManualClock::new(), &path);
        storage.set("access_token", "T1", Duration::days(7)).await.unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.ends_with('\n'));
        assert!(text.contains("  \"schema_version\": 1"));
        assert!(text.contains("\"expires\": \"2026-01-08T00:00:00Z\""));
    }
}
