//! Static endpoint descriptions.

use std::fmt::Display;

use quill_domain::HttpMethod;

use super::{ApiRequest, AuthMode};
use crate::executor::Notify;

/// Method, path template and default notification policy of one API route.
///
/// Path templates use `{name}` placeholders, filled by [`Endpoint::render`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    /// HTTP method.
    pub method: HttpMethod,
    /// Path template relative to the API base URL.
    pub path: &'static str,
    /// Default notification policy for executors bound to this route.
    pub notify: Notify,
    /// Whether the stored access token is attached.
    pub authenticated: bool,
}

impl Endpoint {
    /// Reads are silent, mutations notify on success and failure.
    #[must_use]
    pub const fn new(method: HttpMethod, path: &'static str) -> Self {
        let notify = if method.is_mutating() {
            Notify::Always
        } else {
            Notify::Silent
        };
        Self {
            method,
            path,
            notify,
            authenticated: true,
        }
    }

    /// Read endpoint, silent by default.
    #[must_use]
    pub const fn get(path: &'static str) -> Self {
        Self::new(HttpMethod::Get, path)
    }

    /// Create endpoint, notifying by default.
    #[must_use]
    pub const fn post(path: &'static str) -> Self {
        Self::new(HttpMethod::Post, path)
    }

    /// Update endpoint, notifying by default.
    #[must_use]
    pub const fn put(path: &'static str) -> Self {
        Self::new(HttpMethod::Put, path)
    }

    /// Delete endpoint, notifying by default.
    #[must_use]
    pub const fn delete(path: &'static str) -> Self {
        Self::new(HttpMethod::Delete, path)
    }

    /// Overrides the notification policy.
    #[must_use]
    pub const fn with_notify(self, notify: Notify) -> Self {
        Self { notify, ..self }
    }

    /// Never attaches the access token.
    #[must_use]
    pub const fn public(self) -> Self {
        Self {
            authenticated: false,
            ..self
        }
    }

    /// Fills `{name}` placeholders with percent-encoded values.
    ///
    /// Placeholders without a matching parameter are left as they are.
    #[must_use]
    pub fn render(&self, params: &[(&str, &dyn Display)]) -> String {
        let mut out = String::with_capacity(self.path.len());
        let mut rest = self.path;

        while let Some(open) = rest.find('{') {
            out.push_str(&rest[..open]);
            let after = &rest[open + 1..];
            let Some(close) = after.find('}') else {
                out.push_str(&rest[open..]);
                rest = "";
                break;
            };
            let name = &after[..close];
            match params.iter().find(|(key, _)| *key == name) {
                Some((_, value)) => out.push_str(&urlencoding::encode(&value.to_string())),
                None => out.push_str(&rest[open..=open + 1 + close]),
            }
            rest = &after[close + 1..];
        }

        out.push_str(rest);
        out
    }

    /// Starts a request for this route.
    #[must_use]
    pub fn request(&self, params: &[(&str, &dyn Display)]) -> ApiRequest {
        let request = ApiRequest::new(self.method, self.render(params));
        if self.authenticated {
            request
        } else {
            request.auth(AuthMode::None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policies() {
        assert_eq!(Endpoint::get("/articles").notify, Notify::Silent);
        assert_eq!(Endpoint::delete("/articles/{id}").notify, Notify::Always);
        assert_eq!(
            Endpoint::post("/x").with_notify(Notify::ErrorsOnly).notify,
            Notify::ErrorsOnly
        );
    }

    #[test]
    fn test_render_fills_and_encodes() {
        let endpoint = Endpoint::get("/users/{username}/articles");
        assert_eq!(
            endpoint.render(&[("username", &"jane doe")]),
            "/users/jane%20doe/articles"
        );
        assert_eq!(
            Endpoint::get("/articles/{id}/comments").render(&[("id", &42)]),
            "/articles/42/comments"
        );
    }

    #[test]
    fn test_render_leaves_unknown_placeholders() {
        assert_eq!(Endpoint::get("/a/{b}/c").render(&[]), "/a/{b}/c");
        assert_eq!(Endpoint::get("/a/{b").render(&[]), "/a/{b");
    }

    #[test]
    fn test_public_endpoints_skip_auth() {
        let request = Endpoint::post("/auth/login").public().request(&[]);
        assert_eq!(request.auth_mode(), &AuthMode::None);
        assert_eq!(request.path(), "/auth/login");
    }
}
