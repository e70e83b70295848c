//! Articles, comments and pagination.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::EntityId;
use crate::user::User;

/// A topic label attached to articles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    /// Server-side identifier.
    pub id: EntityId,
    /// Label.
    pub name: String,
    /// URL-safe label.
    #[serde(default)]
    pub slug: String,
    /// Number of articles using this tag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub articles_count: Option<u64>,
}

/// A coarse grouping of articles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Server-side identifier.
    pub id: EntityId,
    /// Display name.
    pub name: String,
    /// URL-safe name.
    #[serde(default)]
    pub slug: String,
    /// Optional description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A published or draft article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    /// Server-side identifier.
    pub id: EntityId,
    /// Headline.
    pub title: String,
    /// URL-safe identifier.
    pub slug: String,
    /// Body text. Listing endpoints may omit it.
    #[serde(default)]
    pub content: String,
    /// Short summary.
    #[serde(default)]
    pub excerpt: Option<String>,
    /// Cover image reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    /// Whether the article is publicly visible.
    #[serde(default)]
    pub is_published: bool,
    /// Estimated reading time in minutes.
    #[serde(default)]
    pub read_time: u32,
    /// View counter.
    #[serde(default)]
    pub views_count: u64,
    /// Like counter.
    #[serde(default)]
    pub likes_count: u64,
    /// Comment counter.
    #[serde(default)]
    pub comments_count: u64,
    /// Creation timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Publication timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
    /// Author, when embedded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<User>,
    /// Attached tags.
    #[serde(default)]
    pub tags: Vec<Tag>,
    /// Category, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
}

/// Body of the create-article call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleDraft {
    /// Headline.
    pub title: String,
    /// Body text.
    pub content: String,
    /// Short summary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    /// Tag names.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Category to file the article under.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<EntityId>,
    /// Publish immediately.
    #[serde(default)]
    pub is_published: bool,
    /// Restrict visibility to the author.
    #[serde(default)]
    pub is_private: bool,
}

/// Body of the update-article call; absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[allow(missing_docs)]
pub struct ArticleUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_published: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_private: Option<bool>,
}

/// Sort order for article listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ArticleSort {
    /// Newest first.
    #[default]
    Latest,
    /// Most viewed first.
    Popular,
    /// Recently active first.
    Trending,
    /// Oldest first.
    Oldest,
}

/// Query string of the article listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleQuery {
    /// 1-based page number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Page size.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
    /// Free-text search.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    /// Filter by tag slug.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    /// Filter by author username.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Sort order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<ArticleSort>,
}

/// Plain page selection for nested listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageQuery {
    /// 1-based page number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Page size.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
}

impl PageQuery {
    /// Selects `page` with the server's default size.
    #[must_use]
    pub const fn page(page: u32) -> Self {
        Self {
            page: Some(page),
            per_page: None,
        }
    }
}

/// One page of a paginated listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Items on this page.
    pub items: Vec<T>,
    /// Total number of items.
    #[serde(default)]
    pub total: u64,
    /// 1-based page number.
    #[serde(default = "first_page")]
    pub page: u32,
    /// Page size.
    #[serde(default)]
    pub per_page: u32,
    /// Number of pages.
    #[serde(default)]
    pub pages: u32,
    /// Whether a following page exists.
    #[serde(default)]
    pub has_next: bool,
    /// Whether a preceding page exists.
    #[serde(default)]
    pub has_prev: bool,
}

const fn first_page() -> u32 {
    1
}

/// A comment on an article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// Server-side identifier.
    pub id: EntityId,
    /// Comment text.
    pub content: String,
    /// Article the comment belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub article_id: Option<EntityId>,
    /// Parent comment for replies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<EntityId>,
    /// Author, when embedded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<User>,
    /// Like counter.
    #[serde(default)]
    pub likes_count: u64,
    /// Whether the comment was edited after posting.
    #[serde(default)]
    pub is_edited: bool,
    /// Creation timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Body of the create/update comment calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentDraft {
    /// Comment text.
    pub content: String,
}

impl CommentDraft {
    /// Creates a draft.
    #[must_use]
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}
