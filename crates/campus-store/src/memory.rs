//! In-process credential store.

use std::sync::{PoisonError, RwLock};

use campus_core::{CredentialStore, Result, StoredCredentials};

/// A credential store that lives only as long as the process.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    inner: RwLock<StoredCredentials>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with credentials.
    pub fn with_credentials(credentials: StoredCredentials) -> Self {
        Self {
            inner: RwLock::new(credentials),
        }
    }

    /// A copy of the current contents.
    pub fn snapshot(&self) -> StoredCredentials {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn load(&self) -> Result<StoredCredentials> {
        Ok(self.snapshot())
    }

    fn save(&self, credentials: &StoredCredentials) -> Result<()> {
        *self.inner.write().unwrap_or_else(PoisonError::into_inner) = credentials.clone();
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.inner.write().unwrap_or_else(PoisonError::into_inner) = StoredCredentials::default();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use campus_core::{AccessToken, RefreshToken, TokenPair};

    #[test]
    fn save_load_clear() {
        let store = MemoryCredentialStore::new();
        assert!(store.load().unwrap().is_empty());

        let stored = StoredCredentials::new(
            TokenPair::new(AccessToken::new("A1"), RefreshToken::new("R1")),
            None,
        );
        store.save(&stored).unwrap();
        assert_eq!(store.load().unwrap(), stored);

        store.clear().unwrap();
        assert!(store.snapshot().is_empty());
    }
}
