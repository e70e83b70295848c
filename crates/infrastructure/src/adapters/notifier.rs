//! Notification sinks.

use quill_application::ports::{Notification, NotificationLevel, Notifier};
use tokio::sync::mpsc;
use tracing::{info, warn};

/// Writes notifications to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: Notification) {
        match notification.level {
            NotificationLevel::Success => info!(message = %notification.message, "notification"),
            NotificationLevel::Error => warn!(message = %notification.message, "notification"),
        }
    }
}

/// Forwards notifications to a channel for a UI loop to display.
///
/// Sending never blocks; notifications sent after the receiver is
/// dropped are logged and discarded.
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    tx: mpsc::UnboundedSender<Notification>,
}

impl ChannelNotifier {
    /// Creates the notifier and the receiving end.
    #[must_use]
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Notification>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl Notifier for ChannelNotifier {
    fn notify(&self, notification: Notification) {
        if let Err(mpsc::error::SendError(notification)) = self.tx.send(notification) {
            TracingNotifier.notify(notification);
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[tokio::test]
    async fn test_channel_delivers_in_order() {
        let (notifier, mut rx) = ChannelNotifier::channel();

        notifier.notify(Notification::success("Signed in successfully"));
        notifier.notify(Notification::error("Sign-in failed"));

        assert_eq!(
            rx.recv().await,
            Some(Notification::success("Signed in successfully"))
        );
        assert_eq!(rx.recv().await, Some(Notification::error("Sign-in failed")));
    }

    #[test]
    fn test_dropped_receiver_is_tolerated() {
        let (notifier, rx) = ChannelNotifier::channel();
        drop(rx);

        notifier.notify(Notification::success("ignored"));
    }
}
