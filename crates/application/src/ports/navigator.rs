//! Navigation port.

/// Moves the client to another route.
pub trait Navigator: Send + Sync {
    /// Navigates to `path`, e.g. `/` after logout.
    fn navigate(&self, path: &str);
}
