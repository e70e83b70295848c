//! Persisted cookie types.
//!
//! The token store keeps its two bearer tokens as named cookies with
//! independent expiry horizons. [`CookieJar`] is the serializable form
//! the file-backed storage writes to disk.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// Current on-disk jar format.
pub const JAR_SCHEMA_VERSION: u32 = 1;

/// A single named value with an optional expiry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoredCookie {
    /// Cookie name.
    pub name: String,
    /// Opaque cookie value.
    pub value: String,
    /// Expiration time (None for session cookies).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires: Option<DateTime<Utc>>,
    /// When the cookie was written.
    pub created_at: DateTime<Utc>,
}

impl StoredCookie {
    /// Creates a cookie that expires `ttl` after `now`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidCookieName` for empty names or names
    /// containing separators or whitespace.
    pub fn new(
        name: impl Into<String>,
        value: impl Into<String>,
        ttl: Option<Duration>,
        now: DateTime<Utc>,
    ) -> DomainResult<Self> {
        let name = name.into();
        validate_name(&name)?;
        Ok(Self {
            name,
            value: value.into(),
            expires: ttl.map(|ttl| now + ttl),
            created_at: now,
        })
    }

    /// Check if the cookie has expired at `now`.
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires.is_some_and(|exp| exp <= now)
    }

    /// Check if this is a session cookie (no expiration).
    #[must_use]
    pub const fn is_session(&self) -> bool {
        self.expires.is_none()
    }
}

fn validate_name(name: &str) -> DomainResult<()> {
    let invalid = name.is_empty()
        || name
            .chars()
            .any(|c| c.is_whitespace() || c.is_control() || matches!(c, '=' | ';' | ','));
    if invalid {
        return Err(DomainError::InvalidCookieName(name.to_string()));
    }
    Ok(())
}

/// Name-keyed collection of cookies.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CookieJar {
    /// Format version.
    pub schema_version: u32,
    /// Cookies by name.
    #[serde(default)]
    pub cookies: BTreeMap<String, StoredCookie>,
}

impl CookieJar {
    /// Creates an empty jar.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            schema_version: JAR_SCHEMA_VERSION,
            cookies: BTreeMap::new(),
        }
    }

    /// Inserts or replaces a cookie.
    pub fn set(&mut self, cookie: StoredCookie) {
        self.cookies.insert(cookie.name.clone(), cookie);
    }

    /// Returns the value of a live cookie.
    #[must_use]
    pub fn get(&self, name: &str, now: DateTime<Utc>) -> Option<&str> {
        self.cookies
            .get(name)
            .filter(|c| !c.is_expired_at(now))
            .map(|c| c.value.as_str())
    }

    /// Removes a cookie, returning it if it existed.
    pub fn remove(&mut self, name: &str) -> Option<StoredCookie> {
        self.cookies.remove(name)
    }

    /// Drops expired cookies. Returns how many were removed.
    pub fn prune(&mut self, now: DateTime<Utc>) -> usize {
        let before = self.cookies.len();
        self.cookies.retain(|_, c| !c.is_expired_at(now));
        before - self.cookies.len()
    }

    /// Number of stored cookies, expired ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cookies.len()
    }

    /// Returns true if the jar holds no cookies.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }
}

impl Default for CookieJar {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    fn now() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).expect("valid timestamp")
    }

    #[test]
    fn test_expiry() {
        let cookie = StoredCookie::new("access_token", "T1", Some(Duration::days(7)), now())
            .expect("valid cookie name");
        assert!(!cookie.is_expired_at(now()));
        assert!(!cookie.is_expired_at(now() + Duration::days(6)));
        assert!(cookie.is_expired_at(now() + Duration::days(7)));
        assert!(!cookie.is_session());
    }

    #[test]
    fn test_invalid_names() {
        assert!(StoredCookie::new("", "v", None, now()).is_err());
        assert!(StoredCookie::new("a b", "v", None, now()).is_err());
        assert!(StoredCookie::new("a=b", "v", None, now()).is_err());
        assert!(StoredCookie::new("refresh_token", "v", None, now()).is_ok());
    }

    #[test]
    fn test_jar_hides_and_prunes_expired() {
        let mut jar = CookieJar::new();
        for (name, days) in [("short", 1), ("long", 30)] {
            jar.set(
                StoredCookie::new(name, "v", Some(Duration::days(days)), now()).expect("cookie"),
            );
        }

        let later = now() + Duration::days(2);
        assert_eq!(jar.get("short", later), None);
        assert_eq!(jar.get("long", later), Some("v"));
        assert_eq!(jar.prune(later), 1);
        assert_eq!(jar.len(), 1);
    }

    #[test]
    fn test_remove() {
        let mut jar = CookieJar::new();
        jar.set(StoredCookie::new("a", "1", None, now()).expect("cookie"));
        assert!(jar.remove("a").is_some());
        assert!(jar.remove("a").is_none());
        assert!(jar.is_empty());
    }
}
