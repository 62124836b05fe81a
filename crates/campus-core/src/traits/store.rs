//! Credential store trait.

use crate::{AccessToken, RefreshToken, Result, TokenPair};

/// The persisted authentication state: access token, refresh token and
/// the cached user profile returned at login.
///
/// Stored under the logical keys `auth_token`, `refresh_token` and
/// `user_data`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoredCredentials {
    pub access_token: Option<AccessToken>,
    pub refresh_token: Option<RefreshToken>,
    pub user: Option<serde_json::Value>,
}

impl StoredCredentials {
    /// Credentials for a freshly issued token pair.
    pub fn new(pair: TokenPair, user: Option<serde_json::Value>) -> Self {
        Self {
            access_token: Some(pair.access),
            refresh_token: Some(pair.refresh),
            user,
        }
    }

    /// Returns the token pair if both tokens are present.
    pub fn token_pair(&self) -> Option<TokenPair> {
        match (&self.access_token, &self.refresh_token) {
            (Some(access), Some(refresh)) => Some(TokenPair::new(access.clone(), refresh.clone())),
            _ => None,
        }
    }

    /// Returns true if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.access_token.is_none() && self.refresh_token.is_none() && self.user.is_none()
    }
}

/// Persistent storage for [`StoredCredentials`].
///
/// Implementations must write and clear all three keys as one unit: after
/// [`CredentialStore::clear`] returns, none of them may be readable.
///
/// The methods are synchronous. The gateway reads the store while holding
/// its refresh lock, so a load must not yield to the executor.
pub trait CredentialStore: Send + Sync {
    /// Load the stored credentials. Missing state loads as empty.
    fn load(&self) -> Result<StoredCredentials>;

    /// Replace the stored credentials.
    fn save(&self, credentials: &StoredCredentials) -> Result<()>;

    /// Remove all stored credentials.
    fn clear(&self) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn token_pair_requires_both_tokens() {
        let mut stored = StoredCredentials {
            access_token: Some(AccessToken::new("A1")),
            refresh_token: None,
            user: None,
        };
        assert!(stored.token_pair().is_none());

        stored.refresh_token = Some(RefreshToken::new("R1"));
        let pair = stored.token_pair().unwrap();
        assert_eq!(pair.access.as_str(), "A1");
        assert_eq!(pair.refresh.as_str(), "R1");
    }

    #[test]
    fn new_fills_all_keys() {
        let stored = StoredCredentials::new(
            TokenPair::new(AccessToken::new("A1"), RefreshToken::new("R1")),
            Some(json!({ "nombre": "Ana" })),
        );
        assert!(!stored.is_empty());
        assert!(StoredCredentials::default().is_empty());
    }
}
