//! Recording and stub ports shared by the unit tests.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::collections::VecDeque;
use std::future::Future;
use std::sync::{Arc, Mutex};

use quill_domain::{HttpRequest, HttpResponse};

use crate::ports::{HttpClient, HttpClientError, Navigator, Notification, Notifier};

/// Notifier that remembers everything it was asked to show.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    seen: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.seen.lock().unwrap().clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.notifications()
            .into_iter()
            .map(|n| n.message)
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.seen.lock().unwrap().push(notification);
    }
}

/// Navigator that remembers visited paths.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    paths: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn paths(&self) -> Vec<String> {
        self.paths.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, path: &str) {
        self.paths.lock().unwrap().push(path.to_string());
    }
}

/// HTTP client answering from a queue of canned responses.
///
/// A `None` entry is a request the server never answers.
#[derive(Debug, Default)]
pub struct StubHttp {
    responses: Mutex<VecDeque<Option<Result<HttpResponse, HttpClientError>>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl StubHttp {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, status: u16, body: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(Some(Ok(HttpResponse::new(status, body.as_bytes().to_vec()))));
        self
    }

    pub fn fail(self, error: HttpClientError) -> Self {
        self.responses.lock().unwrap().push_back(Some(Err(error)));
        self
    }

    pub fn hang(self) -> Self {
        self.responses.lock().unwrap().push_back(None);
        self
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl HttpClient for StubHttp {
    fn execute(
        &self,
        request: &HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, HttpClientError>> + Send {
        self.requests.lock().unwrap().push(request.clone());
        let next = self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Some(Err(HttpClientError::Other("no stubbed response".to_string())))
            });
        async move {
            match next {
                Some(reply) => reply,
                None => std::future::pending().await,
            }
        }
    }
}
