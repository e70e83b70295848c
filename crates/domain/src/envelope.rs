//! Response envelope.

use serde::{Deserialize, Serialize};

use crate::api_error::{ApiError, FALLBACK_DETAIL};

/// The `{success, data, message}` wrapper every API call resolves to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Envelope<T> {
    /// Whether the server accepted the operation.
    pub success: bool,
    /// Payload on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Optional user-facing message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> Envelope<T> {
    /// Successful envelope carrying `data`.
    #[must_use]
    pub const fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    /// Failed envelope carrying a message.
    #[must_use]
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.into()),
        }
    }

    /// Attaches a message.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Converts the envelope into its payload or a normalized error.
    ///
    /// A successful envelope yields its data, which may be absent; a
    /// failed envelope yields a rejection carrying its message.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] when `success` is false.
    pub fn into_result(self) -> Result<Option<T>, ApiError> {
        if self.success {
            return Ok(self.data);
        }
        Err(ApiError::rejected(
            self.message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| FALLBACK_DETAIL.to_string()),
        ))
    }
}

/// Payload of endpoints that only acknowledge an operation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ack {
    /// Server-provided message, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
