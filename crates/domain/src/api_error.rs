//! Normalized API error.
//!
//! Every failure that can reach UI code is folded into [`ApiError`]
//! before it leaves the application layer.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Message used when no better description of a failure is available.
pub const FALLBACK_DETAIL: &str = "Something went wrong";

/// Category of a failed API call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ApiErrorKind {
    /// The request never produced a response (network down, timeout, ...).
    Transport,
    /// The server refused the credentials (401/403, expired or absent token).
    Unauthorized,
    /// The server answered but rejected the operation.
    #[default]
    Rejected,
    /// The response could not be decoded into the expected shape.
    Malformed,
}

impl ApiErrorKind {
    /// Returns a human-readable title for this error kind.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Transport => "Connection Failed",
            Self::Unauthorized => "Not Authorized",
            Self::Rejected => "Request Rejected",
            Self::Malformed => "Unexpected Response",
        }
    }
}

/// Structured error description handed to UI code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    /// Failure category.
    #[serde(default)]
    pub kind: ApiErrorKind,
    /// Human-readable message.
    pub detail: String,
    /// Machine-readable code, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Offending input field, for validation failures.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl ApiError {
    /// Creates an error of the given kind.
    #[must_use]
    pub fn new(kind: ApiErrorKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: detail.into(),
            code: None,
            field: None,
        }
    }

    /// Transport failure carrying the underlying message.
    #[must_use]
    pub fn transport(detail: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Transport, detail).with_code("transport")
    }

    /// Authorization failure.
    #[must_use]
    pub fn unauthorized(detail: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Unauthorized, detail).with_code("unauthorized")
    }

    /// Application-level rejection.
    #[must_use]
    pub fn rejected(detail: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Rejected, detail)
    }

    /// Payload that could not be decoded.
    #[must_use]
    pub fn malformed(detail: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Malformed, detail).with_code("malformed_response")
    }

    /// Rejection with the generic fallback message.
    #[must_use]
    pub fn fallback() -> Self {
        Self::rejected(FALLBACK_DETAIL)
    }

    /// Sets the machine-readable code.
    #[must_use]
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Sets the offending field.
    #[must_use]
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Returns true for transport failures.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self.kind, ApiErrorKind::Transport)
    }

    /// Returns true for authorization failures.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self.kind, ApiErrorKind::Unauthorized)
    }

    /// Returns the detail, or `fallback` when the detail is blank or generic.
    #[must_use]
    pub fn detail_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        let detail = self.detail.trim();
        if detail.is_empty() || detail == FALLBACK_DETAIL {
            fallback
        } else {
            detail
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.field {
            Some(field) => write!(f, "{} ({field})", self.detail),
            None => f.write_str(&self.detail),
        }
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_set_kind_and_code() {
        let err = ApiError::transport("network down");
        assert!(err.is_transport());
        assert_eq!(err.detail, "network down");
        assert_eq!(err.code.as_deref(), Some("transport"));

        let err = ApiError::unauthorized("expired");
        assert!(err.is_unauthorized());

        let err = ApiError::fallback();
        assert_eq!(err.detail, FALLBACK_DETAIL);
        assert_eq!(err.kind, ApiErrorKind::Rejected);
    }

    #[test]
    fn test_display_includes_field() {
        let err = ApiError::rejected("too short").with_field("password");
        assert_eq!(err.to_string(), "too short (password)");
    }

    #[test]
    fn test_detail_or() {
        assert_eq!(ApiError::fallback().detail_or("Sign-in failed"), "Sign-in failed");
        assert_eq!(ApiError::rejected("  ").detail_or("x"), "x");
        assert_eq!(ApiError::rejected("Email taken").detail_or("x"), "Email taken");
    }

    #[test]
    fn test_kind_title() {
        assert_eq!(ApiErrorKind::Transport.title(), "Connection Failed");
        assert_eq!(ApiErrorKind::Malformed.title(), "Unexpected Response");
    }
}
