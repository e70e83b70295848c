//! Like routes.

use std::sync::Arc;

use quill_domain::{Ack, EntityId};

use crate::api::{ApiClient, Endpoint};
use crate::executor::{Notify, RequestExecutor};
use crate::ports::{CookieStorage, HttpClient, Notifier};

/// Like an article; only failures are shown.
pub const LIKE: Endpoint = Endpoint::post("/articles/{id}/like").with_notify(Notify::ErrorsOnly);
/// Remove a like; only failures are shown.
pub const UNLIKE: Endpoint =
    Endpoint::delete("/articles/{id}/like").with_notify(Notify::ErrorsOnly);

/// Article likes.
pub struct LikeCalls<C, S> {
    api: ApiClient<C, S>,
    notifier: Arc<dyn Notifier>,
}

impl<C, S> Clone for LikeCalls<C, S> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            notifier: Arc::clone(&self.notifier),
        }
    }
}

impl<C, S> LikeCalls<C, S>
where
    C: HttpClient + 'static,
    S: CookieStorage + 'static,
{
    /// Binds the calls to `api`, reporting through `notifier`.
    pub fn new(api: ApiClient<C, S>, notifier: Arc<dyn Notifier>) -> Self {
        Self { api, notifier }
    }

    /// `POST /articles/{id}/like`
    pub fn like(&self) -> RequestExecutor<EntityId, Ack> {
        self.api.bind(LIKE, self.notifier.clone(), |endpoint, id| {
            endpoint.request(&[("id", &id)])
        })
    }

    /// `DELETE /articles/{id}/like`
    pub fn unlike(&self) -> RequestExecutor<EntityId, Ack> {
        self.api.bind(UNLIKE, self.notifier.clone(), |endpoint, id| {
            endpoint.request(&[("id", &id)])
        })
    }
}
