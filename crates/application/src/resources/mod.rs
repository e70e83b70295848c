//! Resource call sets.
//!
//! Declarative bindings of API routes to [`RequestExecutor`]s. Each
//! method returns a fresh executor with its own state; reads are silent,
//! mutations notify.
//!
//! [`RequestExecutor`]: crate::executor::RequestExecutor

pub mod articles;
pub mod auth;
pub mod comments;
pub mod likes;
pub mod users;

use std::sync::Arc;

pub use articles::ArticleCalls;
pub use auth::AuthCalls;
pub use comments::CommentCalls;
pub use likes::LikeCalls;
pub use users::UserCalls;

use crate::api::ApiClient;
use crate::ports::{CookieStorage, HttpClient, Notifier};

/// Every call set over one shared client.
pub struct CallSets<C, S> {
    /// Authentication routes.
    pub auth: AuthCalls<C, S>,
    /// Article routes.
    pub articles: ArticleCalls<C, S>,
    /// Profile and follow routes.
    pub users: UserCalls<C, S>,
    /// Comment routes.
    pub comments: CommentCalls<C, S>,
    /// Like routes.
    pub likes: LikeCalls<C, S>,
}

impl<C, S> CallSets<C, S>
where
    C: HttpClient + 'static,
    S: CookieStorage + 'static,
{
    /// Builds every call set over clones of `api`.
    pub fn new(api: &ApiClient<C, S>, notifier: &Arc<dyn Notifier>) -> Self {
        Self {
            auth: AuthCalls::new(api.clone(), Arc::clone(notifier)),
            articles: ArticleCalls::new(api.clone(), Arc::clone(notifier)),
            users: UserCalls::new(api.clone(), Arc::clone(notifier)),
            comments: CommentCalls::new(api.clone(), Arc::clone(notifier)),
            likes: LikeCalls::new(api.clone(), Arc::clone(notifier)),
        }
    }
}
