//! Navigation adapter.

use quill_application::ports::Navigator;
use tokio::sync::watch;
use tracing::debug;

/// Publishes the current route on a `watch` channel.
#[derive(Debug)]
pub struct WatchNavigator {
    route: watch::Sender<String>,
}

impl WatchNavigator {
    /// Starts at `/`.
    #[must_use]
    pub fn new() -> Self {
        let (route, _) = watch::channel("/".to_string());
        Self { route }
    }

    /// Current route.
    #[must_use]
    pub fn current(&self) -> String {
        self.route.borrow().clone()
    }

    /// Subscribes to route changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<String> {
        self.route.subscribe()
    }
}

impl Default for WatchNavigator {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator for WatchNavigator {
    fn navigate(&self, path: &str) {
        debug!(path, "navigate");
        self.route.send_replace(path.to_string());
    }
}
