//! Quill Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer, plus configuration loading.

pub mod adapters;
pub mod config;
pub mod persistence;
pub mod serialization;

pub use adapters::{ChannelNotifier, ReqwestHttpClient, SystemClock, TracingNotifier, WatchNavigator};
pub use crate::config::{ConfigError, ConfigLoader};
pub use persistence::{FileCookieStorage, TokioFileSystem, default_cookie_path};
pub use serialization::{SerializationError, from_json_bytes, to_json_stable, to_json_stable_bytes};
