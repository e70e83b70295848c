//! Authentication routes.

use std::sync::Arc;

use quill_domain::{Ack, AuthResponse, LoginCredentials, RegisterData, User};

use crate::api::{ApiClient, Endpoint};
use crate::executor::{Notify, RequestExecutor};
use crate::ports::{CookieStorage, HttpClient, Notifier};

/// Credential exchange.
pub const LOGIN: Endpoint = Endpoint::post("/auth/login").public();
/// Account creation.
pub const REGISTER: Endpoint = Endpoint::post("/auth/register").public();
/// Server-side sign-out.
pub const LOGOUT: Endpoint = Endpoint::post("/auth/logout");
/// Access token renewal with the refresh token.
pub const REFRESH: Endpoint = Endpoint::post("/auth/refresh")
    .public()
    .with_notify(Notify::Silent);
/// The user behind the access token.
pub const ME: Endpoint = Endpoint::get("/auth/me");

/// Raw authentication calls.
///
/// These do not touch the session or the token store; use
/// [`SessionController`](crate::auth::SessionController) for that.
pub struct AuthCalls<C, S> {
    api: ApiClient<C, S>,
    notifier: Arc<dyn Notifier>,
}

impl<C, S> Clone for AuthCalls<C, S> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            notifier: Arc::clone(&self.notifier),
        }
    }
}

impl<C, S> AuthCalls<C, S>
where
    C: HttpClient + 'static,
    S: CookieStorage + 'static,
{
    /// Binds the calls to `api`, reporting through `notifier`.
    pub fn new(api: ApiClient<C, S>, notifier: Arc<dyn Notifier>) -> Self {
        Self { api, notifier }
    }

    /// `POST /auth/login`
    pub fn login(&self) -> RequestExecutor<LoginCredentials, AuthResponse> {
        self.api.bind(LOGIN, self.notifier.clone(), |endpoint, credentials| {
            endpoint.request(&[]).json(&credentials)
        })
    }

    /// `POST /auth/register`
    pub fn register(&self) -> RequestExecutor<RegisterData, AuthResponse> {
        self.api.bind(REGISTER, self.notifier.clone(), |endpoint, data| {
            endpoint.request(&[]).json(&data)
        })
    }

    /// `POST /auth/logout`
    pub fn logout(&self) -> RequestExecutor<(), Ack> {
        self.api
            .bind(LOGOUT, self.notifier.clone(), |endpoint, ()| endpoint.request(&[]))
    }

    /// `GET /auth/me`
    pub fn me(&self) -> RequestExecutor<(), User> {
        self.api
            .bind(ME, self.notifier.clone(), |endpoint, ()| endpoint.request(&[]))
    }
}
