//! File-backed persistence.

mod cookie_file;
mod file_system;

pub use cookie_file::{FileCookieStorage, default_cookie_path};
pub use file_system::TokioFileSystem;
