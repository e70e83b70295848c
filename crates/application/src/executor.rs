//! Generic request executor.
//!
//! Wraps one asynchronous API call and exposes its observable
//! `{data, loading, error}` state. Every execution takes a sequence
//! number; only the most recent execution may write to the state, so a
//! slow response can never overwrite a newer one.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use quill_domain::{ApiError, Envelope, RequestOutcome};
use tokio::sync::watch;
use tracing::debug;

use crate::ports::{Notification, Notifier};

/// Which outcomes are surfaced through the [`Notifier`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Notify {
    /// Nothing is shown.
    Silent,
    /// Failures are shown, successes are not.
    #[default]
    ErrorsOnly,
    /// Failures are shown, and successes that carry a message.
    Always,
}

impl Notify {
    /// Whether a success message should be shown.
    #[must_use]
    pub const fn on_success(self) -> bool {
        matches!(self, Self::Always)
    }

    /// Whether a failure should be shown.
    #[must_use]
    pub const fn on_error(self) -> bool {
        !matches!(self, Self::Silent)
    }
}

/// Boxed future returned by a wrapped call.
pub type CallFuture<T> = Pin<Box<dyn Future<Output = Result<Envelope<T>, ApiError>> + Send>>;

type Call<I, T> = dyn Fn(I) -> CallFuture<T> + Send + Sync;
type SuccessHook<T> = Arc<dyn Fn(&T) + Send + Sync>;
type ErrorHook = Arc<dyn Fn(&ApiError) + Send + Sync>;

/// Per-executor behaviour.
pub struct ExecutorOptions<T> {
    /// Notification policy.
    pub notify: Notify,
    on_success: Option<SuccessHook<T>>,
    on_error: Option<ErrorHook>,
}

impl<T> ExecutorOptions<T> {
    /// Options with the given notification policy and no callbacks.
    #[must_use]
    pub const fn new(notify: Notify) -> Self {
        Self {
            notify,
            on_success: None,
            on_error: None,
        }
    }

    /// Runs `hook` with the payload of every successful execution that
    /// carries one.
    #[must_use]
    pub fn on_success(mut self, hook: impl Fn(&T) + Send + Sync + 'static) -> Self {
        self.on_success = Some(Arc::new(hook));
        self
    }

    /// Runs `hook` with the error of every failed execution.
    #[must_use]
    pub fn on_error(mut self, hook: impl Fn(&ApiError) + Send + Sync + 'static) -> Self {
        self.on_error = Some(Arc::new(hook));
        self
    }
}

impl<T> Default for ExecutorOptions<T> {
    fn default() -> Self {
        Self::new(Notify::default())
    }
}

impl<T> Clone for ExecutorOptions<T> {
    fn clone(&self) -> Self {
        Self {
            notify: self.notify,
            on_success: self.on_success.clone(),
            on_error: self.on_error.clone(),
        }
    }
}

impl<T> fmt::Debug for ExecutorOptions<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExecutorOptions")
            .field("notify", &self.notify)
            .field("on_success", &self.on_success.is_some())
            .field("on_error", &self.on_error.is_some())
            .finish()
    }
}

/// Observable wrapper around one API call.
///
/// Clones share the same state and sequence counter.
pub struct RequestExecutor<I, T> {
    call: Arc<Call<I, T>>,
    options: ExecutorOptions<T>,
    notifier: Arc<dyn Notifier>,
    state: Arc<watch::Sender<RequestOutcome<T>>>,
    latest: Arc<AtomicU64>,
}

impl<I, T> Clone for RequestExecutor<I, T> {
    fn clone(&self) -> Self {
        Self {
            call: Arc::clone(&self.call),
            options: self.options.clone(),
            notifier: Arc::clone(&self.notifier),
            state: Arc::clone(&self.state),
            latest: Arc::clone(&self.latest),
        }
    }
}

impl<I, T> fmt::Debug for RequestExecutor<I, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestExecutor")
            .field("options", &self.options)
            .field("latest", &self.latest.load(Ordering::SeqCst))
            .finish_non_exhaustive()
    }
}

impl<I, T> RequestExecutor<I, T>
where
    I: Send + 'static,
    T: Clone + Send + Sync + 'static,
{
    /// Wraps `call`. The executor starts idle.
    pub fn new<F, Fut>(call: F, notifier: Arc<dyn Notifier>) -> Self
    where
        F: Fn(I) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Envelope<T>, ApiError>> + Send + 'static,
    {
        let call: Arc<Call<I, T>> =
            Arc::new(move |input: I| -> CallFuture<T> { Box::pin(call(input)) });
        let (state, _) = watch::channel(RequestOutcome::idle());
        Self {
            call,
            options: ExecutorOptions::default(),
            notifier,
            state: Arc::new(state),
            latest: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Replaces the options.
    #[must_use]
    pub fn with_options(mut self, options: ExecutorOptions<T>) -> Self {
        self.options = options;
        self
    }

    /// Replaces the notification policy, keeping callbacks.
    #[must_use]
    pub fn notify(mut self, notify: Notify) -> Self {
        self.options.notify = notify;
        self
    }

    /// Current notification policy.
    #[must_use]
    pub const fn notify_policy(&self) -> Notify {
        self.options.notify
    }

    /// Runs the wrapped call.
    ///
    /// Returns the payload on success and `None` on failure or on a
    /// success without payload; check [`outcome`](Self::outcome) to tell
    /// the two apart. A call
    /// superseded by a later execution (or by [`reset`](Self::reset))
    /// still returns its own payload but leaves the state untouched and
    /// fires no callbacks or notifications.
    pub async fn execute(&self, input: I) -> Option<T> {
        let seq = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.send_modify(|outcome| {
            outcome.loading = true;
            outcome.error = None;
        });
        let _loading = LoadingGuard {
            state: &self.state,
            latest: &self.latest,
            seq,
        };

        let result = match (self.call)(input).await {
            Ok(envelope) => {
                let message = envelope.message.clone();
                envelope.into_result().map(|data| (data, message))
            }
            Err(error) => Err(error),
        };

        if !self.is_current(seq) {
            debug!(seq, "discarding stale response");
            return result.ok().and_then(|(data, _)| data);
        }

        match result {
            Ok((data, message)) => {
                self.succeed(data.as_ref(), message);
                data
            }
            Err(error) => {
                self.fail(error);
                None
            }
        }
    }

    /// Returns to the idle state and invalidates in-flight executions.
    pub fn reset(&self) {
        self.latest.fetch_add(1, Ordering::SeqCst);
        self.state.send_replace(RequestOutcome::idle());
    }

    /// Snapshot of the current state.
    #[must_use]
    pub fn outcome(&self) -> RequestOutcome<T> {
        self.state.borrow().clone()
    }

    /// Subscribes to state changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<RequestOutcome<T>> {
        self.state.subscribe()
    }

    /// Whether an execution is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.state.borrow().loading
    }

    fn is_current(&self, seq: u64) -> bool {
        self.latest.load(Ordering::SeqCst) == seq
    }

    fn succeed(&self, data: Option<&T>, message: Option<String>) {
        self.state.send_modify(|outcome| outcome.data = data.cloned());
        if let (Some(hook), Some(data)) = (&self.options.on_success, data) {
            hook(data);
        }
        if self.options.notify.on_success() {
            if let Some(message) = message.filter(|m| !m.trim().is_empty()) {
                self.notifier.notify(Notification::success(message));
            }
        }
    }

    fn fail(&self, mut error: ApiError) {
        if error.detail.trim().is_empty() {
            error.detail = ApiError::fallback().detail;
        }
        debug!(kind = ?error.kind, detail = %error.detail, "request failed");
        self.state
            .send_modify(|outcome| outcome.error = Some(error.clone()));
        if let Some(hook) = &self.options.on_error {
            hook(&error);
        }
        if self.options.notify.on_error() {
            self.notifier.notify(Notification::error(error.detail));
        }
    }
}

/// Clears `loading` when the execution that set it ends, however it ends.
struct LoadingGuard<'a, T> {
    state: &'a watch::Sender<RequestOutcome<T>>,
    latest: &'a AtomicU64,
    seq: u64,
}

impl<T> Drop for LoadingGuard<'_, T> {
    fn drop(&mut self) {
        if self.latest.load(Ordering::SeqCst) == self.seq {
            self.state.send_modify(|outcome| outcome.loading = false);
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use std::sync::Mutex;

    use pretty_assertions::assert_eq;
    use quill_domain::api_error::FALLBACK_DETAIL;
    use quill_domain::ApiErrorKind;
    use tokio::sync::oneshot;

    use super::*;
    use crate::testing::RecordingNotifier;

    fn answering(
        result: Result<Envelope<u32>, ApiError>,
        notifier: &Arc<RecordingNotifier>,
    ) -> RequestExecutor<(), u32> {
        RequestExecutor::new(
            move |()| {
                let result = result.clone();
                async move { result }
            },
            notifier.clone(),
        )
    }

    fn gated(notifier: &Arc<RecordingNotifier>) -> RequestExecutor<oneshot::Receiver<u32>, u32> {
        RequestExecutor::new(
            |gate: oneshot::Receiver<u32>| async move {
                gate.await
                    .map(Envelope::ok)
                    .map_err(|_| ApiError::transport("gate dropped"))
            },
            notifier.clone(),
        )
    }

    #[tokio::test]
    async fn test_starts_idle() {
        let notifier = RecordingNotifier::new();
        let executor = answering(Ok(Envelope::ok(1)), &notifier);
        assert!(executor.outcome().is_idle());
    }

    #[tokio::test]
    async fn test_success_stores_data() {
        let notifier = RecordingNotifier::new();
        let executor = answering(Ok(Envelope::ok(7).with_message("Saved")), &notifier);

        assert_eq!(executor.execute(()).await, Some(7));

        let outcome = executor.outcome();
        assert_eq!(outcome.data, Some(7));
        assert!(!outcome.loading);
        assert_eq!(outcome.error, None);
        assert!(notifier.notifications().is_empty());
    }

    #[tokio::test]
    async fn test_success_message_shown_when_always() {
        let notifier = RecordingNotifier::new();
        let executor = answering(Ok(Envelope::ok(7).with_message("Saved")), &notifier)
            .notify(Notify::Always);

        executor.execute(()).await;

        assert_eq!(notifier.notifications(), vec![Notification::success("Saved")]);
    }

    #[tokio::test]
    async fn test_success_without_message_shows_nothing() {
        let notifier = RecordingNotifier::new();
        let executor = answering(Ok(Envelope::ok(7)), &notifier).notify(Notify::Always);

        executor.execute(()).await;

        assert!(notifier.notifications().is_empty());
    }

    #[tokio::test]
    async fn test_transport_failure_is_published() {
        let notifier = RecordingNotifier::new();
        let executor = answering(Err(ApiError::transport("network down")), &notifier);

        assert_eq!(executor.execute(()).await, None);

        let outcome = executor.outcome();
        let error = outcome.error.expect("error recorded");
        assert_eq!(error.detail, "network down");
        assert_eq!(error.kind, ApiErrorKind::Transport);
        assert!(!outcome.loading);
        assert_eq!(notifier.notifications(), vec![Notification::error("network down")]);
    }

    #[tokio::test]
    async fn test_silent_shows_nothing() {
        let notifier = RecordingNotifier::new();
        let executor =
            answering(Err(ApiError::transport("network down")), &notifier).notify(Notify::Silent);

        executor.execute(()).await;

        assert!(executor.outcome().is_error());
        assert!(notifier.notifications().is_empty());
    }

    #[tokio::test]
    async fn test_rejected_envelope_uses_message() {
        let notifier = RecordingNotifier::new();
        let executor = answering(Ok(Envelope::failed("slug taken")), &notifier);

        assert_eq!(executor.execute(()).await, None);
        assert_eq!(executor.outcome().error.map(|e| e.detail).as_deref(), Some("slug taken"));
    }

    #[tokio::test]
    async fn test_blank_detail_falls_back() {
        let notifier = RecordingNotifier::new();
        let executor = answering(Err(ApiError::rejected("")), &notifier);

        executor.execute(()).await;

        assert_eq!(notifier.messages(), vec![FALLBACK_DETAIL.to_string()]);
    }

    #[tokio::test]
    async fn test_success_without_data_takes_success_path() {
        let notifier = RecordingNotifier::new();
        let executor = answering(
            Ok(Envelope {
                success: true,
                data: None,
                message: Some("Article deleted".to_string()),
            }),
            &notifier,
        )
        .notify(Notify::Always);

        assert_eq!(executor.execute(()).await, None);
        let outcome = executor.outcome();
        assert_eq!(outcome.error, None);
        assert_eq!(outcome.data, None);
        assert!(!outcome.loading);
        assert_eq!(notifier.messages(), vec!["Article deleted".to_string()]);
    }

    #[tokio::test]
    async fn test_new_execution_clears_previous_error_but_keeps_data() {
        let notifier = RecordingNotifier::new();
        let executor = gated(&notifier);

        let (tx, rx) = oneshot::channel();
        tx.send(1).unwrap();
        executor.execute(rx).await;

        let (tx, rx) = oneshot::channel::<u32>();
        drop(tx);
        executor.execute(rx).await;
        let outcome = executor.outcome();
        assert_eq!(outcome.data, Some(1));
        assert!(outcome.is_error());

        let (tx, rx) = oneshot::channel();
        tx.send(2).unwrap();
        executor.execute(rx).await;
        assert_eq!(executor.outcome().error, None);
    }

    #[tokio::test]
    async fn test_callbacks_receive_results() {
        let notifier = RecordingNotifier::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let ok_seen = seen.clone();
        let executor = answering(Ok(Envelope::ok(3)), &notifier).with_options(
            ExecutorOptions::new(Notify::Silent)
                .on_success(move |value| ok_seen.lock().unwrap().push(format!("ok {value}"))),
        );
        executor.execute(()).await;

        let err_seen = seen.clone();
        let executor = answering(Err(ApiError::rejected("nope")), &notifier).with_options(
            ExecutorOptions::new(Notify::Silent)
                .on_error(move |error| err_seen.lock().unwrap().push(format!("err {error}"))),
        );
        executor.execute(()).await;

        assert_eq!(*seen.lock().unwrap(), vec!["ok 3".to_string(), "err nope".to_string()]);
    }

    #[tokio::test]
    async fn test_reset_returns_to_idle() {
        let notifier = RecordingNotifier::new();
        let executor = answering(Ok(Envelope::ok(9)), &notifier);

        executor.execute(()).await;
        executor.reset();

        assert!(executor.outcome().is_idle());
    }

    #[tokio::test]
    async fn test_reset_discards_in_flight_result() {
        let notifier = RecordingNotifier::new();
        let executor = gated(&notifier);
        let (tx, rx) = oneshot::channel();

        let (returned, ()) = tokio::join!(executor.execute(rx), async {
            tokio::task::yield_now().await;
            executor.reset();
            tx.send(5).unwrap();
        });

        assert_eq!(returned, Some(5));
        assert!(executor.outcome().is_idle());
    }

    #[tokio::test]
    async fn test_stale_response_never_overwrites_newer_one() {
        let notifier = RecordingNotifier::new();
        let executor = gated(&notifier);
        let (first_tx, first_rx) = oneshot::channel();
        let (second_tx, second_rx) = oneshot::channel();

        let (first, second, ()) = tokio::join!(
            executor.execute(first_rx),
            executor.execute(second_rx),
            async {
                second_tx.send(2).unwrap();
                tokio::task::yield_now().await;
                first_tx.send(1).unwrap();
            }
        );

        assert_eq!(first, Some(1));
        assert_eq!(second, Some(2));
        let outcome = executor.outcome();
        assert_eq!(outcome.data, Some(2));
        assert!(!outcome.loading);
    }

    #[tokio::test]
    async fn test_loading_cleared_when_callback_panics() {
        let notifier = RecordingNotifier::new();
        let executor = answering(Ok(Envelope::ok(1)), &notifier).with_options(
            ExecutorOptions::new(Notify::Silent).on_success(|_| panic!("callback failed")),
        );

        let task = executor.clone();
        let joined = tokio::spawn(async move { task.execute(()).await }).await;

        assert!(joined.is_err());
        assert!(!executor.is_loading());
    }

    #[tokio::test]
    async fn test_loading_visible_while_in_flight() {
        let notifier = RecordingNotifier::new();
        let executor = gated(&notifier);
        let mut updates = executor.subscribe();
        let (tx, rx) = oneshot::channel();

        let (_, observed) = tokio::join!(executor.execute(rx), async {
            let loading = updates
                .wait_for(|o| o.loading)
                .await
                .map(|o| o.loading)
                .unwrap_or(false);
            tx.send(1).unwrap();
            loading
        });

        assert!(observed);
        assert!(!executor.is_loading());
    }
}
