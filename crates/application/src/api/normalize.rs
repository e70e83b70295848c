//! Boundary normalization of API outcomes.
//!
//! This is the only place that looks at raw statuses and bodies. Every
//! path out of here is either a decoded [`Envelope`] or an [`ApiError`].

use quill_domain::api_error::FALLBACK_DETAIL;
use quill_domain::{ApiError, ApiErrorKind, Envelope, HttpResponse};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::ports::HttpClientError;

/// Converts a transport failure.
#[must_use]
pub fn transport_error(error: &HttpClientError) -> ApiError {
    let code = match error {
        HttpClientError::Timeout { .. } => "timeout",
        HttpClientError::ConnectionFailed(_) => "connection_failed",
        HttpClientError::InvalidUrl(_) => "invalid_url",
        HttpClientError::Body(_) | HttpClientError::Other(_) => "transport",
    };
    ApiError::transport(error.to_string()).with_code(code)
}

/// Decodes a raw response into an envelope or a normalized error.
///
/// # Errors
///
/// Returns an error for non-2xx statuses and for bodies that do not
/// match the expected shape.
pub fn decode_response<T: DeserializeOwned>(
    response: &HttpResponse,
) -> Result<Envelope<T>, ApiError> {
    if response.is_success() {
        decode_success(response)
    } else {
        Err(error_from_status(response.status, &response.body))
    }
}

fn decode_success<T: DeserializeOwned>(response: &HttpResponse) -> Result<Envelope<T>, ApiError> {
    let value = if response.is_empty_body() {
        Value::Object(Map::new())
    } else {
        serde_json::from_slice::<Value>(&response.body)
            .map_err(|e| ApiError::malformed(format!("response is not valid JSON: {e}")))?
    };

    if is_envelope(&value) {
        let mut envelope: Envelope<T> = serde_json::from_value(value)
            .map_err(|e| ApiError::malformed(format!("unexpected envelope shape: {e}")))?;
        if envelope.success && envelope.data.is_none() {
            envelope.data = acknowledgement(envelope.message.as_deref());
        }
        return Ok(envelope);
    }

    let message = value
        .get("message")
        .and_then(Value::as_str)
        .map(str::to_string);
    let data: T = serde_json::from_value(value)
        .map_err(|e| ApiError::malformed(format!("unexpected response shape: {e}")))?;

    Ok(Envelope {
        success: true,
        data: Some(data),
        message,
    })
}

/// Payload for a data-less success, when `T` can be built from the
/// envelope message alone (as [`Ack`](quill_domain::Ack) can).
fn acknowledgement<T: DeserializeOwned>(message: Option<&str>) -> Option<T> {
    let mut fields = Map::new();
    if let Some(message) = message {
        fields.insert("message".to_string(), Value::String(message.to_string()));
    }
    serde_json::from_value(Value::Object(fields)).ok()
}

fn is_envelope(value: &Value) -> bool {
    value.get("success").is_some_and(Value::is_boolean)
}

/// Builds the error for a non-2xx response.
#[must_use]
pub fn error_from_status(status: u16, body: &[u8]) -> ApiError {
    let mut error = serde_json::from_slice::<Value>(body)
        .ok()
        .as_ref()
        .and_then(error_from_body)
        .unwrap_or_else(|| ApiError::rejected(FALLBACK_DETAIL));

    error.kind = if matches!(status, 401 | 403) {
        ApiErrorKind::Unauthorized
    } else {
        ApiErrorKind::Rejected
    };
    if error.code.is_none() {
        error.code = Some(default_code(status));
    }
    error
}

fn error_from_body(body: &Value) -> Option<ApiError> {
    let mut error = match body.get("detail") {
        Some(Value::String(detail)) => non_empty(detail).map(ApiError::rejected),
        Some(Value::Array(entries)) => entries.first().and_then(validation_entry),
        Some(Value::Object(detail)) => detail
            .get("message")
            .or_else(|| detail.get("msg"))
            .and_then(Value::as_str)
            .and_then(non_empty)
            .map(ApiError::rejected),
        _ => None,
    }
    .or_else(|| {
        body.get("message")
            .and_then(Value::as_str)
            .and_then(non_empty)
            .map(ApiError::rejected)
    })?;

    if let Some(code) = body.get("code").and_then(Value::as_str) {
        error.code = Some(code.to_string());
    }
    if let Some(field) = body.get("field").and_then(Value::as_str) {
        error.field = Some(field.to_string());
    }
    Some(error)
}

/// `{"loc": ["body", "email"], "msg": "...", "type": "..."}`
fn validation_entry(entry: &Value) -> Option<ApiError> {
    let message = entry.get("msg").and_then(Value::as_str).and_then(non_empty)?;
    let mut error = ApiError::rejected(message);

    error.field = entry
        .get("loc")
        .and_then(Value::as_array)
        .and_then(|loc| loc.last())
        .and_then(|segment| match segment {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        });
    error.code = entry
        .get("type")
        .and_then(Value::as_str)
        .map(str::to_string);
    Some(error)
}

fn non_empty(s: &str) -> Option<&str> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

fn default_code(status: u16) -> String {
    match status {
        401 => "unauthorized".to_string(),
        403 => "forbidden".to_string(),
        404 => "not_found".to_string(),
        422 => "validation_error".to_string(),
        500..=599 => "server_error".to_string(),
        _ => format!("http_{status}"),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use quill_domain::{Ack, User};

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse::new(status, body.as_bytes().to_vec())
    }

    #[test]
    fn test_plain_object_is_wrapped() {
        let envelope: Envelope<User> =
            decode_response(&response(200, r#"{"id": 1, "username": "a"}"#)).unwrap();
        assert!(envelope.success);
        assert_eq!(envelope.data.map(|u| u.username).as_deref(), Some("a"));
    }

    #[test]
    fn test_envelope_is_passed_through() {
        let envelope: Envelope<Ack> = decode_response(&response(
            200,
            r#"{"success": false, "message": "slug taken"}"#,
        ))
        .unwrap();
        assert!(!envelope.success);
        assert_eq!(envelope.message.as_deref(), Some("slug taken"));
    }

    #[test]
    fn test_dataless_success_acknowledges() {
        let body = r#"{"success": true, "message": "Article deleted"}"#;

        let ack: Envelope<Ack> = decode_response(&response(200, body)).unwrap();
        assert_eq!(
            ack.data.and_then(|a| a.message).as_deref(),
            Some("Article deleted")
        );

        let user: Envelope<User> = decode_response(&response(200, body)).unwrap();
        assert!(user.success);
        assert_eq!(user.data, None);
    }

    #[test]
    fn test_message_is_lifted_from_plain_bodies() {
        let envelope: Envelope<Ack> =
            decode_response(&response(200, r#"{"message": "Successfully logged out"}"#)).unwrap();
        assert_eq!(envelope.message.as_deref(), Some("Successfully logged out"));
    }

    #[test]
    fn test_empty_body_decodes_as_empty_object() {
        let envelope: Envelope<Ack> = decode_response(&response(204, "")).unwrap();
        assert_eq!(envelope.data, Some(Ack::default()));
    }

    #[test]
    fn test_non_json_body_is_malformed() {
        let error = decode_response::<Ack>(&response(200, "<html>")).unwrap_err();
        assert_eq!(error.kind, ApiErrorKind::Malformed);
    }

    #[test]
    fn test_wrong_shape_is_malformed() {
        let error = decode_response::<User>(&response(200, r#"{"nope": true}"#)).unwrap_err();
        assert_eq!(error.kind, ApiErrorKind::Malformed);
        assert_eq!(error.code.as_deref(), Some("malformed_response"));
    }

    #[test]
    fn test_detail_string() {
        let error = error_from_status(401, br#"{"detail": "Incorrect email or password"}"#);
        assert_eq!(error.kind, ApiErrorKind::Unauthorized);
        assert_eq!(error.detail, "Incorrect email or password");
        assert_eq!(error.code.as_deref(), Some("unauthorized"));
    }

    #[test]
    fn test_validation_list() {
        let body = br#"{"detail": [{"loc": ["body", "password"], "msg": "Password must be at least 8 characters long", "type": "value_error"}]}"#;
        let error = error_from_status(422, body);
        assert_eq!(error.kind, ApiErrorKind::Rejected);
        assert_eq!(error.detail, "Password must be at least 8 characters long");
        assert_eq!(error.field.as_deref(), Some("password"));
        assert_eq!(error.code.as_deref(), Some("value_error"));
    }

    #[test]
    fn test_explicit_code_and_field() {
        let error = error_from_status(
            400,
            br#"{"message": "taken", "code": "duplicate", "field": "username"}"#,
        );
        assert_eq!(error.detail, "taken");
        assert_eq!(error.code.as_deref(), Some("duplicate"));
        assert_eq!(error.field.as_deref(), Some("username"));
    }

    #[test]
    fn test_unknown_body_falls_back() {
        let error = error_from_status(503, b"upstream unavailable");
        assert_eq!(error.detail, FALLBACK_DETAIL);
        assert_eq!(error.code.as_deref(), Some("server_error"));

        let error = error_from_status(409, b"{}");
        assert_eq!(error.code.as_deref(), Some("http_409"));
    }

    #[test]
    fn test_transport_codes() {
        let error = transport_error(&HttpClientError::Timeout { timeout_ms: 10 });
        assert!(error.is_transport());
        assert_eq!(error.code.as_deref(), Some("timeout"));
        assert_eq!(error.detail, "request timed out after 10 ms");
    }
}
