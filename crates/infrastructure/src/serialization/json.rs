//! JSON serialization helpers for deterministic output.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::ser::{PrettyFormatter, Serializer};

/// Error type for serialization operations.
#[derive(Debug, thiserror::Error)]
pub enum SerializationError {
    /// JSON serialization failed.
    #[error("JSON serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    /// JSON deserialization failed.
    #[error("JSON deserialization failed: {0}")]
    Deserialize(serde_json::Error),

    /// UTF-8 encoding error.
    #[error("UTF-8 encoding error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Serializes a value to pretty JSON with 2-space indentation and a
/// trailing newline.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_json_stable<T: Serialize>(value: &T) -> Result<String, SerializationError> {
    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"  ");
    let mut serializer = Serializer::with_formatter(&mut buffer, formatter);
    value.serialize(&mut serializer)?;

    let mut json = String::from_utf8(buffer)?;
    json.push('\n');
    Ok(json)
}

/// Same as [`to_json_stable`], as bytes for direct file writing.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_json_stable_bytes<T: Serialize>(value: &T) -> Result<Vec<u8>, SerializationError> {
    to_json_stable(value).map(String::into_bytes)
}

/// Deserializes JSON from bytes.
///
/// # Errors
///
/// Returns an error if the JSON is invalid or doesn't match the expected type.
pub fn from_json_bytes<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, SerializationError> {
    serde_json::from_slice(bytes).map_err(SerializationError::Deserialize)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use quill_domain::{CookieJar, StoredCookie};

    use super::*;

    #[test]
    fn test_trailing_newline_and_indent() {
        let json = to_json_stable(&CookieJar::new()).expect("serialization should work");
        assert!(json.ends_with('\n'));
        assert!(json.contains("  \"schema_version\""));
    }

    #[test]
    fn test_cookies_are_ordered_by_name() {
        let now = chrono::Utc::now();
        let mut jar = CookieJar::new();
        jar.set(StoredCookie::new("refresh_token", "R", None, now).unwrap());
        jar.set(StoredCookie::new("access_token", "A", None, now).unwrap());

        let json = to_json_stable(&jar).expect("serialization should work");
        let access = json.find("\"access_token\"").expect("access present");
        let refresh = json.find("\"refresh_token\"").expect("refresh present");
        assert!(access < refresh);
    }

    #[test]
    fn test_from_json_bytes_rejects_garbage() {
        let result: Result<CookieJar, _> = from_json_bytes(b"{\"cookies\": 3}");
        assert!(matches!(result, Err(SerializationError::Deserialize(_))));
    }
}
