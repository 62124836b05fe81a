//! Auth endpoint request/response types.

use serde::{Deserialize, Serialize};

use campus_core::{AccessToken, RefreshToken, StoredCredentials, TokenPair};

/// Request body for the login endpoint.
#[derive(Debug, Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Request body for the refresh endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RefreshRequest<'a> {
    pub token: &'a str,
    pub refresh_token: &'a str,
}

/// Response from the login and refresh endpoints.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SessionResponse {
    pub token: String,
    pub refresh_token: String,
    /// Profile of the authenticated user.
    #[serde(default)]
    pub usuario: Option<serde_json::Value>,
}

impl SessionResponse {
    pub fn token_pair(&self) -> TokenPair {
        TokenPair::new(
            AccessToken::new(self.token.clone()),
            RefreshToken::new(self.refresh_token.clone()),
        )
    }

    /// Credentials to persist. A response without a profile keeps
    /// `previous_user`.
    pub fn into_stored(self, previous_user: Option<serde_json::Value>) -> StoredCredentials {
        let pair = self.token_pair();
        StoredCredentials::new(pair, self.usuario.or(previous_user))
    }
}

/// Error body format.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}
