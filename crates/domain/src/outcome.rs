//! Per-call request state for UI binding.

use serde::{Deserialize, Serialize};

use crate::api_error::ApiError;

/// Observable state of one request executor.
///
/// Replaced wholesale on each new call; never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestOutcome<T> {
    /// Result of the last successful call.
    pub data: Option<T>,
    /// True while a call is in flight.
    pub loading: bool,
    /// Error of the last failed call.
    pub error: Option<ApiError>,
}

impl<T> RequestOutcome<T> {
    /// Initial state: nothing loaded, nothing failed.
    #[must_use]
    pub const fn idle() -> Self {
        Self {
            data: None,
            loading: false,
            error: None,
        }
    }

    /// Returns true if no call has produced anything yet.
    #[must_use]
    pub const fn is_idle(&self) -> bool {
        self.data.is_none() && !self.loading && self.error.is_none()
    }

    /// Returns true if the last call failed.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

impl<T> Default for RequestOutcome<T> {
    fn default() -> Self {
        Self::idle()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn test_idle() {
        let outcome = RequestOutcome::<u8>::default();
        assert!(outcome.is_idle());
        assert!(!outcome.is_error());
    }

    #[test]
    fn test_error_state() {
        let outcome = RequestOutcome::<u8> {
            data: None,
            loading: false,
            error: Some(ApiError::fallback()),
        };
        assert!(outcome.is_error());
        assert!(!outcome.is_idle());
    }
}
