//! Article routes.

use std::sync::Arc;

use quill_domain::{Ack, Article, ArticleDraft, ArticleQuery, ArticleUpdate, EntityId, Page};

use crate::api::{ApiClient, Endpoint};
use crate::executor::RequestExecutor;
use crate::ports::{CookieStorage, HttpClient, Notifier};

/// Paginated article listing.
pub const LIST: Endpoint = Endpoint::get("/articles");
/// One article by slug.
pub const GET: Endpoint = Endpoint::get("/articles/{slug}");
/// New article.
pub const CREATE: Endpoint = Endpoint::post("/articles");
/// Edit an article by id.
pub const UPDATE: Endpoint = Endpoint::put("/articles/{id}");
/// Remove an article by id.
pub const DELETE: Endpoint = Endpoint::delete("/articles/{id}");

/// Article listing and editing.
pub struct ArticleCalls<C, S> {
    api: ApiClient<C, S>,
    notifier: Arc<dyn Notifier>,
}

impl<C, S> Clone for ArticleCalls<C, S> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            notifier: Arc::clone(&self.notifier),
        }
    }
}

impl<C, S> ArticleCalls<C, S>
where
    C: HttpClient + 'static,
    S: CookieStorage + 'static,
{
    /// Binds the calls to `api`, reporting through `notifier`.
    pub fn new(api: ApiClient<C, S>, notifier: Arc<dyn Notifier>) -> Self {
        Self { api, notifier }
    }

    /// `GET /articles?page=..&search=..`
    pub fn list(&self) -> RequestExecutor<ArticleQuery, Page<Article>> {
        self.api.bind(LIST, self.notifier.clone(), |endpoint, query| {
            endpoint.request(&[]).query(&query)
        })
    }

    /// `GET /articles/{slug}`
    pub fn get(&self) -> RequestExecutor<String, Article> {
        self.api.bind(GET, self.notifier.clone(), |endpoint, slug| {
            endpoint.request(&[("slug", &slug)])
        })
    }

    /// `POST /articles`
    pub fn create(&self) -> RequestExecutor<ArticleDraft, Article> {
        self.api.bind(CREATE, self.notifier.clone(), |endpoint, draft| {
            endpoint.request(&[]).json(&draft)
        })
    }

    /// `PUT /articles/{id}`
    pub fn update(&self) -> RequestExecutor<(EntityId, ArticleUpdate), Article> {
        self.api
            .bind(UPDATE, self.notifier.clone(), |endpoint, (id, update)| {
                endpoint.request(&[("id", &id)]).json(&update)
            })
    }

    /// `DELETE /articles/{id}`
    pub fn delete(&self) -> RequestExecutor<EntityId, Ack> {
        self.api.bind(DELETE, self.notifier.clone(), |endpoint, id| {
            endpoint.request(&[("id", &id)])
        })
    }
}
