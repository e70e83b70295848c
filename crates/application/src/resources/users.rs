//! Profile and follow routes.

use std::sync::Arc;

use quill_domain::{Ack, Article, Page, PageQuery, User};

use crate::api::{ApiClient, Endpoint};
use crate::executor::RequestExecutor;
use crate::ports::{CookieStorage, HttpClient, Notifier};

/// Public profile.
pub const GET: Endpoint = Endpoint::get("/users/{username}");
/// A user's articles.
pub const ARTICLES: Endpoint = Endpoint::get("/users/{username}/articles");
/// Follow a user.
pub const FOLLOW: Endpoint = Endpoint::post("/users/{username}/follow");
/// Stop following a user.
pub const UNFOLLOW: Endpoint = Endpoint::delete("/users/{username}/follow");

/// Profiles and follows.
pub struct UserCalls<C, S> {
    api: ApiClient<C, S>,
    notifier: Arc<dyn Notifier>,
}

impl<C, S> Clone for UserCalls<C, S> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            notifier: Arc::clone(&self.notifier),
        }
    }
}

impl<C, S> UserCalls<C, S>
where
    C: HttpClient + 'static,
    S: CookieStorage + 'static,
{
    /// Binds the calls to `api`, reporting through `notifier`.
    pub fn new(api: ApiClient<C, S>, notifier: Arc<dyn Notifier>) -> Self {
        Self { api, notifier }
    }

    /// `GET /users/{username}`
    pub fn get(&self) -> RequestExecutor<String, User> {
        self.api.bind(GET, self.notifier.clone(), |endpoint, username| {
            endpoint.request(&[("username", &username)])
        })
    }

    /// `GET /users/{username}/articles`
    pub fn articles(&self) -> RequestExecutor<(String, PageQuery), Page<Article>> {
        self.api
            .bind(ARTICLES, self.notifier.clone(), |endpoint, (username, page)| {
                endpoint.request(&[("username", &username)]).query(&page)
            })
    }

    /// `POST /users/{username}/follow`
    pub fn follow(&self) -> RequestExecutor<String, Ack> {
        self.api.bind(FOLLOW, self.notifier.clone(), |endpoint, username| {
            endpoint.request(&[("username", &username)])
        })
    }

    /// `DELETE /users/{username}/follow`
    pub fn unfollow(&self) -> RequestExecutor<String, Ack> {
        self.api.bind(UNFOLLOW, self.notifier.clone(), |endpoint, username| {
            endpoint.request(&[("username", &username)])
        })
    }
}
