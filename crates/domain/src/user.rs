//! User profile types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::EntityId;

/// A registered user as returned by the API.
///
/// Only `id` and `username` are required; the remaining fields default when
/// the server omits them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Server-side identifier.
    pub id: EntityId,
    /// Login email.
    #[serde(default)]
    pub email: String,
    /// Unique handle.
    pub username: String,
    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    /// Avatar image reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    /// Free-form biography.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    /// Whether the email address has been verified.
    #[serde(default)]
    pub is_verified: bool,
    /// Creation timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    /// Number of followers, when the endpoint includes it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub followers_count: Option<u64>,
    /// Number of followed users, when the endpoint includes it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub following_count: Option<u64>,
    /// Number of authored articles, when the endpoint includes it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub articles_count: Option<u64>,
}

impl User {
    /// Creates a user with only the required fields set.
    #[must_use]
    pub fn new(id: impl Into<EntityId>, username: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: String::new(),
            username: username.into(),
            full_name: None,
            avatar_url: None,
            bio: None,
            is_verified: false,
            created_at: None,
            updated_at: None,
            followers_count: None,
            following_count: None,
            articles_count: None,
        }
    }

    /// Name to show in the UI: the full name when set, the username otherwise.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.full_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(&self.username)
    }

    /// Shallow-merges a patch into this user.
    ///
    /// Fields absent from the patch are left untouched.
    pub fn apply(&mut self, patch: UserPatch) {
        let UserPatch {
            email,
            username,
            full_name,
            avatar_url,
            bio,
            is_verified,
            updated_at,
            followers_count,
            following_count,
            articles_count,
        } = patch;

        if let Some(email) = email {
            self.email = email;
        }
        if let Some(username) = username {
            self.username = username;
        }
        if full_name.is_some() {
            self.full_name = full_name;
        }
        if avatar_url.is_some() {
            self.avatar_url = avatar_url;
        }
        if bio.is_some() {
            self.bio = bio;
        }
        if let Some(is_verified) = is_verified {
            self.is_verified = is_verified;
        }
        if updated_at.is_some() {
            self.updated_at = updated_at;
        }
        if followers_count.is_some() {
            self.followers_count = followers_count;
        }
        if following_count.is_some() {
            self.following_count = following_count;
        }
        if articles_count.is_some() {
            self.articles_count = articles_count;
        }
    }
}

/// Partial user record used for local optimistic edits.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[allow(missing_docs)]
pub struct UserPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_verified: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub followers_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub following_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub articles_count: Option<u64>,
}

impl UserPatch {
    /// Sets the biography.
    #[must_use]
    pub fn with_bio(mut self, bio: impl Into<String>) -> Self {
        self.bio = Some(bio.into());
        self
    }

    /// Sets the display name.
    #[must_use]
    pub fn with_full_name(mut self, full_name: impl Into<String>) -> Self {
        self.full_name = Some(full_name.into());
        self
    }
}
