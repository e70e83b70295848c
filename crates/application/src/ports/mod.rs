//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the application core and external systems.
//! Each port is a trait that can be implemented by adapters in the infrastructure layer.

mod clock;
mod cookie_storage;
mod file_system;
mod http_client;
mod navigator;
mod notifier;

pub use clock::Clock;
pub use cookie_storage::{CookieStorage, StorageError};
pub use file_system::{FileSystem, FileSystemError};
pub use http_client::{HttpClient, HttpClientError};
pub use navigator::Navigator;
pub use notifier::{Notification, NotificationLevel, Notifier};
