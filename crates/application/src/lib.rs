//! Quill Application - Session, request execution and ports
//!
//! This crate defines the application layer with:
//! - Port traits (interfaces for external dependencies)
//! - The API client and its error normalization
//! - The session controller and token store
//! - The generic request executor and resource call sets

pub mod api;
pub mod auth;
pub mod executor;
pub mod ports;
pub mod resources;

#[cfg(test)]
mod testing;

pub use api::{ApiClient, ApiRequest, AuthMode, Endpoint};
pub use auth::{MemoryCookieStorage, SessionController, SessionHandle, TokenStore};
pub use executor::{ExecutorOptions, Notify, RequestExecutor};
pub use ports::{
    Clock, CookieStorage, FileSystem, FileSystemError, HttpClient, HttpClientError, Navigator,
    Notification, NotificationLevel, Notifier, StorageError,
};
pub use resources::{ArticleCalls, AuthCalls, CallSets, CommentCalls, LikeCalls, UserCalls};
