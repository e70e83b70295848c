//! Session controller.
//!
//! Owns the process-wide [`Session`] and the login/logout state machine:
//!
//! ```text
//! Bootstrapping --bootstrap--> Authenticated | Anonymous
//! Anonymous --login/register ok--> Authenticated
//! Authenticated --logout--> Anonymous
//! ```
//!
//! No operation here returns an error. Failures become a `false` return
//! plus an error [`Notification`].

use std::sync::Arc;

use quill_domain::{
    Ack, ApiError, ApiErrorKind, AuthResponse, LoginCredentials, RefreshResponse, RegisterData, Session,
    SessionPhase, User, UserPatch,
};
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

use crate::api::{ApiClient, ApiRequest, AuthMode};
use crate::auth::TokenStore;
use crate::ports::{CookieStorage, HttpClient, Navigator, Notification, Notifier};
use crate::resources::auth as routes;

const CONNECTION_FAILED: &str = "Could not connect to the server";
const SIGNED_IN: &str = "Signed in successfully";
const SIGN_IN_FAILED: &str = "Sign-in failed";
const REGISTERED: &str = "Registration successful! Welcome!";
const REGISTRATION_FAILED: &str = "Registration failed";
const SIGNED_OUT: &str = "Signed out";
const CREDENTIALS_NOT_SAVED: &str = "Could not save your credentials";

/// Read side of the session, safe to hand to any consumer.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    rx: watch::Receiver<Session>,
}

impl SessionHandle {
    /// Current session.
    #[must_use]
    pub fn snapshot(&self) -> Session {
        self.rx.borrow().clone()
    }

    /// Signed-in user, if any.
    #[must_use]
    pub fn user(&self) -> Option<User> {
        self.rx.borrow().user.clone()
    }

    /// Whether bootstrap is still running.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.rx.borrow().loading
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.rx.borrow().phase()
    }

    /// Waits until bootstrap has finished and returns the session.
    pub async fn wait_ready(&self) -> Session {
        let mut rx = self.rx.clone();
        let ready = rx.wait_for(|session| !session.loading).await.map(|s| s.clone());
        match ready {
            Ok(session) => session,
            Err(_) => rx.borrow().clone(),
        }
    }

    /// Waits for the next session change.
    ///
    /// Returns `false` once the controller is gone.
    pub async fn changed(&mut self) -> bool {
        self.rx.changed().await.is_ok()
    }
}

/// Drives authentication and owns the session.
pub struct SessionController<C, S> {
    api: ApiClient<C, S>,
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn Navigator>,
    state: watch::Sender<Session>,
}

impl<C: HttpClient, S: CookieStorage> SessionController<C, S> {
    /// Creates the controller in the `Bootstrapping` state.
    ///
    /// Call [`bootstrap`](Self::bootstrap) once to resolve it.
    pub fn init(
        api: ApiClient<C, S>,
        notifier: Arc<dyn Notifier>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        let (state, _) = watch::channel(Session::bootstrapping());
        Self {
            api,
            notifier,
            navigator,
            state,
        }
    }

    /// A new read handle.
    #[must_use]
    pub fn handle(&self) -> SessionHandle {
        SessionHandle {
            rx: self.state.subscribe(),
        }
    }

    /// Current session.
    #[must_use]
    pub fn session(&self) -> Session {
        self.state.borrow().clone()
    }

    /// The client this controller talks through.
    #[must_use]
    pub const fn api(&self) -> &ApiClient<C, S> {
        &self.api
    }

    fn tokens(&self) -> &TokenStore<S> {
        self.api.tokens()
    }

    /// Resolves the initial session from the stored access token.
    ///
    /// A rejected or unreadable token is cleared without notifying the
    /// user; the session ends up `Anonymous` either way.
    pub async fn bootstrap(&self) {
        let token = match self.tokens().access_token().await {
            Ok(token) => token,
            Err(e) => {
                warn!(error = %e, "could not read stored access token");
                None
            }
        };

        let Some(token) = token else {
            debug!("no stored access token");
            self.state.send_replace(Session::anonymous());
            return;
        };

        let request = routes::ME.request(&[]).auth(AuthMode::Bearer(token));
        match self.api.fetch::<User>(request).await {
            Ok(user) => {
                info!(username = %user.username, "session restored");
                self.state.send_replace(Session::authenticated(user));
            }
            Err(e) => {
                warn!(error = %e, kind = ?e.kind, "stored credentials rejected, signing out locally");
                self.clear_tokens().await;
                self.state.send_replace(Session::anonymous());
            }
        }
    }

    /// Exchanges credentials for a token pair and signs the user in.
    pub async fn login(&self, email: &str, password: &str) -> bool {
        let request = routes::LOGIN
            .request(&[])
            .json(&LoginCredentials::new(email, password));
        self.sign_in(request, SIGNED_IN, SIGN_IN_FAILED).await
    }

    /// Creates an account and signs the new user in.
    pub async fn register(&self, data: &RegisterData) -> bool {
        let request = routes::REGISTER.request(&[]).json(data);
        self.sign_in(request, REGISTERED, REGISTRATION_FAILED).await
    }

    /// Signs out locally, navigates to the root, then tells the server.
    ///
    /// Local state is gone before the server call starts, so dropping
    /// the future early or a server that never answers still leaves the
    /// client signed out. The server's answer does not affect the outcome.
    pub async fn logout(&self) {
        self.state.send_replace(Session::anonymous());
        let token = self.tokens().access_token().await.ok().flatten();
        self.clear_tokens().await;
        info!("signed out");
        self.navigator.navigate("/");
        self.notifier.notify(Notification::success(SIGNED_OUT));

        if let Some(token) = token {
            let request = routes::LOGOUT.request(&[]).auth(AuthMode::Bearer(token));
            if let Err(e) = self.api.fetch::<Ack>(request).await {
                debug!(error = %e, "server-side logout failed");
            }
        }
    }

    /// Exchanges the refresh token for a new access token.
    ///
    /// Silent: failures are logged, never notified.
    pub async fn refresh(&self) -> bool {
        let token = match self.tokens().refresh_token().await {
            Ok(Some(token)) => token,
            Ok(None) => {
                debug!("no refresh token stored");
                return false;
            }
            Err(e) => {
                warn!(error = %e, "could not read refresh token");
                return false;
            }
        };

        let request = routes::REFRESH
            .request(&[])
            .auth(AuthMode::Bearer(token));
        let response = match self.api.fetch::<RefreshResponse>(request).await {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "token refresh failed");
                return false;
            }
        };

        match self.tokens().store_access_token(&response.access_token).await {
            Ok(()) => {
                debug!("access token refreshed");
                true
            }
            Err(e) => {
                warn!(error = %e, "could not store refreshed access token");
                false
            }
        }
    }

    /// Shallow-merges `patch` into the signed-in user.
    ///
    /// Does nothing when nobody is signed in.
    pub fn update_user(&self, patch: UserPatch) {
        let updated = self.state.send_if_modified(|session| match &mut session.user {
            Some(user) => {
                user.apply(patch);
                true
            }
            None => false,
        });
        if !updated {
            debug!("ignored user update without a session");
        }
    }

    async fn sign_in(&self, request: ApiRequest, success: &str, fallback: &str) -> bool {
        let response = match self.api.fetch::<AuthResponse>(request).await {
            Ok(response) => response,
            Err(e) => {
                debug!(error = %e, kind = ?e.kind, "credential exchange failed");
                self.notifier
                    .notify(Notification::error(failure_message(&e, fallback)));
                return false;
            }
        };

        let (pair, user) = response.into_parts();
        if let Err(e) = self.tokens().store_pair(&pair).await {
            error!(error = %e, "could not persist credentials");
            self.clear_tokens().await;
            self.state.send_replace(Session::anonymous());
            self.notifier
                .notify(Notification::error(CREDENTIALS_NOT_SAVED));
            return false;
        }

        info!(username = %user.username, "signed in");
        self.state.send_replace(Session::authenticated(user));
        self.notifier.notify(Notification::success(success));
        true
    }

    async fn clear_tokens(&self) {
        if let Err(e) = self.tokens().clear().await {
            warn!(error = %e, "could not clear stored credentials");
        }
    }
}

fn failure_message(error: &ApiError, fallback: &str) -> String {
    match error.kind {
        ApiErrorKind::Transport => CONNECTION_FAILED.to_string(),
        ApiErrorKind::Malformed => fallback.to_string(),
        ApiErrorKind::Unauthorized | ApiErrorKind::Rejected => {
            error.detail_or(fallback).to_string()
        }
    }
}
