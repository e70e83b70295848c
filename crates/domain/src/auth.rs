//! Authentication payloads.

use serde::{Deserialize, Serialize};

use crate::user::User;

/// Body of the credential-exchange request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginCredentials {
    /// Account email.
    pub email: String,
    /// Plain-text password.
    pub password: String,
}

impl LoginCredentials {
    /// Creates a credential body.
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

/// Body of the registration request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterData {
    /// Account email.
    pub email: String,
    /// Requested handle.
    pub username: String,
    /// Plain-text password.
    pub password: String,
    /// Optional display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
}

/// Successful login or registration response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResponse {
    /// Short-lived bearer token.
    pub access_token: String,
    /// Long-lived token used to mint new access tokens.
    pub refresh_token: String,
    /// The authenticated user.
    pub user: User,
    /// Access token lifetime in seconds, when the server reports it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<u64>,
}

impl AuthResponse {
    /// Splits the response into the credential pair and the user.
    #[must_use]
    pub fn into_parts(self) -> (CredentialPair, User) {
        (
            CredentialPair {
                access_token: self.access_token,
                refresh_token: self.refresh_token,
            },
            self.user,
        )
    }
}

/// Response of the token refresh endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshResponse {
    /// Newly minted access token.
    pub access_token: String,
}

/// Access + refresh bearer tokens issued by the authentication API.
#[derive(Clone, PartialEq, Eq)]
pub struct CredentialPair {
    /// Short-lived bearer token.
    pub access_token: String,
    /// Long-lived refresh token.
    pub refresh_token: String,
}

impl std::fmt::Debug for CredentialPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialPair")
            .field("access_token", &"<redacted>")
            .field("refresh_token", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn test_register_omits_missing_full_name() {
        let data = RegisterData {
            email: "a@b.com".to_string(),
            username: "a".to_string(),
            password: "pw".to_string(),
            full_name: None,
        };
        let json = serde_json::to_string(&data).expect("serialize");
        assert!(!json.contains("full_name"));
    }

    #[test]
    fn test_credential_pair_debug_is_redacted() {
        let pair = CredentialPair {
            access_token: "secret-access".to_string(),
            refresh_token: "secret-refresh".to_string(),
        };
        let debug = format!("{pair:?}");
        assert!(!debug.contains("secret"));
    }
}
