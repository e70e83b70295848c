//! API client.
//!
//! Builds requests against the configured base URL, attaches bearer
//! credentials from the [`TokenStore`], and hands responses to
//! [`normalize`] so that callers only ever see an [`Envelope`] or an
//! [`ApiError`].

mod endpoint;
pub mod normalize;

pub use endpoint::Endpoint;

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use quill_domain::{ApiError, ClientConfig, DomainResult, Envelope, HttpMethod, HttpRequest};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::auth::TokenStore;
use crate::executor::RequestExecutor;
use crate::ports::{CookieStorage, HttpClient, Notifier};

/// How a request is authenticated.
#[derive(Clone, PartialEq, Eq, Default)]
pub enum AuthMode {
    /// No `Authorization` header.
    None,
    /// The stored access token, when one is live.
    #[default]
    Access,
    /// An explicit bearer token.
    Bearer(String),
}

impl fmt::Debug for AuthMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("None"),
            Self::Access => f.write_str("Access"),
            Self::Bearer(_) => f.write_str("Bearer(<redacted>)"),
        }
    }
}

/// One API call before it is sent.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    method: HttpMethod,
    path: String,
    query: Option<String>,
    body: Option<String>,
    auth: AuthMode,
    encode_error: Option<String>,
}

impl ApiRequest {
    /// Request for `path`, relative to the API base URL.
    #[must_use]
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: None,
            body: None,
            auth: AuthMode::default(),
            encode_error: None,
        }
    }

    /// `GET` request for `path`.
    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path)
    }

    /// `POST` request for `path`.
    #[must_use]
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, path)
    }

    /// Serializes `body` as the JSON payload.
    ///
    /// Encoding failures surface when the request is sent.
    #[must_use]
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Self {
        match serde_json::to_string(body) {
            Ok(json) => self.body = Some(json),
            Err(e) => self.encode_error = Some(e.to_string()),
        }
        self
    }

    /// Serializes `query` as the URL query string. Empty queries are dropped.
    #[must_use]
    pub fn query<Q: Serialize + ?Sized>(mut self, query: &Q) -> Self {
        match serde_urlencoded::to_string(query) {
            Ok(encoded) if encoded.is_empty() => self.query = None,
            Ok(encoded) => self.query = Some(encoded),
            Err(e) => self.encode_error = Some(e.to_string()),
        }
        self
    }

    /// Sets the authentication mode.
    #[must_use]
    pub fn auth(mut self, auth: AuthMode) -> Self {
        self.auth = auth;
        self
    }

    /// HTTP method.
    #[must_use]
    pub const fn method(&self) -> HttpMethod {
        self.method
    }

    /// Path below the base URL.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Encoded query, without the leading `?`.
    #[must_use]
    pub fn query_string(&self) -> Option<&str> {
        self.query.as_deref()
    }

    /// Serialized JSON body, if any.
    #[must_use]
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    /// How the request authenticates.
    #[must_use]
    pub const fn auth_mode(&self) -> &AuthMode {
        &self.auth
    }
}

/// Shared client for the publishing API. Cheap to clone.
pub struct ApiClient<C, S> {
    http: Arc<C>,
    tokens: TokenStore<S>,
    base_url: Arc<str>,
    timeout: Duration,
}

impl<C, S> Clone for ApiClient<C, S> {
    fn clone(&self) -> Self {
        Self {
            http: Arc::clone(&self.http),
            tokens: self.tokens.clone(),
            base_url: Arc::clone(&self.base_url),
            timeout: self.timeout,
        }
    }
}

impl<C, S> fmt::Debug for ApiClient<C, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl<C: HttpClient, S: CookieStorage> ApiClient<C, S> {
    /// Creates a client for the API described by `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured URL or timeout is invalid.
    pub fn new(http: C, tokens: TokenStore<S>, config: &ClientConfig) -> DomainResult<Self> {
        Ok(Self {
            http: Arc::new(http),
            tokens,
            base_url: config.base_url()?.into(),
            timeout: config.timeout(),
        })
    }

    /// The token store used for bearer credentials.
    #[must_use]
    pub const fn tokens(&self) -> &TokenStore<S> {
        &self.tokens
    }

    /// The HTTP port.
    #[must_use]
    pub const fn http(&self) -> &Arc<C> {
        &self.http
    }

    /// Base URL every path is appended to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for `path` and an optional encoded query.
    #[must_use]
    pub fn url_for(&self, path: &str, query: Option<&str>) -> String {
        let path = path.trim_start_matches('/');
        match query {
            Some(query) => format!("{}/{path}?{query}", self.base_url),
            None => format!("{}/{path}", self.base_url),
        }
    }

    /// Sends `request` and decodes the response into an envelope.
    ///
    /// # Errors
    ///
    /// Returns a normalized [`ApiError`] for transport failures, non-2xx
    /// statuses and undecodable payloads.
    pub async fn send<T: DeserializeOwned>(
        &self,
        request: ApiRequest,
    ) -> Result<Envelope<T>, ApiError> {
        let ApiRequest {
            method,
            path,
            query,
            body,
            auth,
            encode_error,
        } = request;

        if let Some(reason) = encode_error {
            return Err(
                ApiError::malformed(format!("could not encode request: {reason}"))
                    .with_code("invalid_request"),
            );
        }

        let mut http_request = HttpRequest::new(
            method,
            self.url_for(&path, query.as_deref()),
            self.timeout,
        )
        .with_header("Accept", "application/json");
        if let Some(token) = self.bearer(auth).await {
            http_request = http_request.with_header("Authorization", format!("Bearer {token}"));
        }
        if let Some(body) = body {
            http_request = http_request.with_json_body(body);
        }

        debug!(%method, %path, "sending API request");
        let response = self.http.execute(&http_request).await.map_err(|e| {
            warn!(%method, %path, error = %e, "API request did not complete");
            normalize::transport_error(&e)
        })?;
        debug!(
            %method,
            %path,
            status = response.status,
            duration_ms = u64::try_from(response.duration.as_millis()).unwrap_or(u64::MAX),
            "received API response"
        );

        normalize::decode_response(&response)
    }

    /// Sends `request` and unwraps the envelope payload.
    ///
    /// # Errors
    ///
    /// Same as [`send`](Self::send), plus rejected envelopes and
    /// successes that carry no payload.
    pub async fn fetch<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, ApiError> {
        self.send(request)
            .await?
            .into_result()?
            .ok_or_else(|| ApiError::malformed("response carried no data"))
    }

    async fn bearer(&self, auth: AuthMode) -> Option<String> {
        match auth {
            AuthMode::None => None,
            AuthMode::Bearer(token) => Some(token),
            AuthMode::Access => match self.tokens.access_token().await {
                Ok(token) => token,
                Err(e) => {
                    warn!(error = %e, "could not read access token, sending anonymously");
                    None
                }
            },
        }
    }
}

impl<C, S> ApiClient<C, S>
where
    C: HttpClient + 'static,
    S: CookieStorage + 'static,
{
    /// Binds `endpoint` to a [`RequestExecutor`].
    ///
    /// `build` turns the executor input into a request; the executor
    /// inherits the endpoint's notification policy.
    pub fn bind<I, T, B>(
        &self,
        endpoint: Endpoint,
        notifier: Arc<dyn Notifier>,
        build: B,
    ) -> RequestExecutor<I, T>
    where
        I: Send + 'static,
        T: DeserializeOwned + Clone + Send + Sync + 'static,
        B: Fn(&Endpoint, I) -> ApiRequest + Send + Sync + 'static,
    {
        let api = self.clone();
        RequestExecutor::new(
            move |input: I| {
                let api = api.clone();
                let request = build(&endpoint, input);
                async move { api.send::<T>(request).await }
            },
            notifier,
        )
        .notify(endpoint.notify)
    }
}
