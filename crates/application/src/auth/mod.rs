//! Authentication for the Quill client.
//!
//! This module provides:
//! - Token persistence with per-token expiry
//! - An in-memory cookie backend
//! - The session controller and its read handle

mod memory_storage;
mod session;
mod token_store;

pub use memory_storage::MemoryCookieStorage;
pub use session::{SessionController, SessionHandle};
pub use token_store::{
    access_token_ttl, refresh_token_ttl, TokenStore, ACCESS_TOKEN, REFRESH_TOKEN,
};
