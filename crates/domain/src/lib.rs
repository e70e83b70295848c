//! Quill Domain - Core types for the publishing client
//!
//! This crate defines the domain model shared by the session controller,
//! the request executor and the resource call sets.
//! All types here are pure Rust with no I/O dependencies.

pub mod api_error;
pub mod auth;
pub mod content;
pub mod cookie;
pub mod envelope;
pub mod error;
pub mod id;
pub mod outcome;
pub mod request;
pub mod response;
pub mod session;
pub mod settings;
pub mod user;

pub use api_error::{ApiError, ApiErrorKind};
pub use auth::{AuthResponse, CredentialPair, LoginCredentials, RefreshResponse, RegisterData};
pub use content::{
    Article, ArticleDraft, ArticleQuery, ArticleSort, ArticleUpdate, Category, Comment,
    CommentDraft, Page, PageQuery, Tag,
};
pub use cookie::{CookieJar, StoredCookie};
pub use envelope::{Ack, Envelope};
pub use error::{DomainError, DomainResult};
pub use id::EntityId;
pub use outcome::RequestOutcome;
pub use request::{HttpMethod, HttpRequest};
pub use response::HttpResponse;
pub use session::{Session, SessionPhase};
pub use settings::ClientConfig;
pub use user::{User, UserPatch};
