//! Comment routes.

use std::sync::Arc;

use quill_domain::{Ack, Comment, CommentDraft, EntityId, Page, PageQuery};

use crate::api::{ApiClient, Endpoint};
use crate::executor::RequestExecutor;
use crate::ports::{CookieStorage, HttpClient, Notifier};

/// Comments on an article.
pub const LIST: Endpoint = Endpoint::get("/articles/{article_id}/comments");
/// New comment on an article.
pub const CREATE: Endpoint = Endpoint::post("/articles/{article_id}/comments");
/// Edit a comment.
pub const UPDATE: Endpoint = Endpoint::put("/comments/{id}");
/// Remove a comment.
pub const DELETE: Endpoint = Endpoint::delete("/comments/{id}");

/// Article discussion.
pub struct CommentCalls<C, S> {
    api: ApiClient<C, S>,
    notifier: Arc<dyn Notifier>,
}

impl<C, S> Clone for CommentCalls<C, S> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            notifier: Arc::clone(&self.notifier),
        }
    }
}

impl<C, S> CommentCalls<C, S>
where
    C: HttpClient + 'static,
    S: CookieStorage + 'static,
{
    /// Binds the calls to `api`, reporting through `notifier`.
    pub fn new(api: ApiClient<C, S>, notifier: Arc<dyn Notifier>) -> Self {
        Self { api, notifier }
    }

    /// `GET /articles/{article_id}/comments`
    pub fn list(&self) -> RequestExecutor<(EntityId, PageQuery), Page<Comment>> {
        self.api
            .bind(LIST, self.notifier.clone(), |endpoint, (article_id, page)| {
                endpoint
                    .request(&[("article_id", &article_id)])
                    .query(&page)
            })
    }

    /// `POST /articles/{article_id}/comments`
    pub fn create(&self) -> RequestExecutor<(EntityId, String), Comment> {
        self.api
            .bind(CREATE, self.notifier.clone(), |endpoint, (article_id, content)| {
                endpoint
                    .request(&[("article_id", &article_id)])
                    .json(&CommentDraft::new(content))
            })
    }

    /// `PUT /comments/{id}`
    pub fn update(&self) -> RequestExecutor<(EntityId, String), Comment> {
        self.api
            .bind(UPDATE, self.notifier.clone(), |endpoint, (id, content)| {
                endpoint
                    .request(&[("id", &id)])
                    .json(&CommentDraft::new(content))
            })
    }

    /// `DELETE /comments/{id}`
    pub fn delete(&self) -> RequestExecutor<EntityId, Ack> {
        self.api.bind(DELETE, self.notifier.clone(), |endpoint, id| {
            endpoint.request(&[("id", &id)])
        })
    }
}
