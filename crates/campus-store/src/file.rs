//! File-backed credential store.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use campus_core::error::{Error, StorageError};
use campus_core::{AccessToken, CredentialStore, RefreshToken, Result, StoredCredentials};

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

fn map_io(path: &Path, err: io::Error) -> Error {
    Error::Storage(StorageError::Io {
        path: path.display().to_string(),
        message: err.to_string(),
    })
}

/// On-disk layout, one JSON object keyed like the dashboard's storage.
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoredFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    auth_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    refresh_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    user_data: Option<serde_json::Value>,
}

impl From<&StoredCredentials> for StoredFile {
    fn from(credentials: &StoredCredentials) -> Self {
        Self {
            auth_token: credentials
                .access_token
                .as_ref()
                .map(|t| t.as_str().to_string()),
            refresh_token: credentials
                .refresh_token
                .as_ref()
                .map(|t| t.as_str().to_string()),
            user_data: credentials.user.clone(),
        }
    }
}

impl From<StoredFile> for StoredCredentials {
    fn from(file: StoredFile) -> Self {
        Self {
            access_token: file.auth_token.map(AccessToken::new),
            refresh_token: file.refresh_token.map(RefreshToken::new),
            user: file.user_data,
        }
    }
}

/// Credentials persisted as a single JSON file.
///
/// Writes go to a temporary file that is renamed over the target, so a
/// reader sees either the old triple or the new one. An advisory lock on a
/// sibling `.lock` file serializes writers across processes. On Unix the
/// file is readable only by its owner.
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    /// Create a store backed by the file at `path`.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Get the credentials file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock_path(&self) -> PathBuf {
        self.path.with_extension("lock")
    }

    fn tmp_path(&self) -> PathBuf {
        self.path.with_extension("json.tmp")
    }

    fn open_lock(&self) -> Result<File> {
        let lock_path = self.lock_path();
        if let Some(parent) = lock_path.parent() {
            fs::create_dir_all(parent).map_err(|e| map_io(parent, e))?;
        }

        OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(&lock_path)
            .map_err(|e| map_io(&lock_path, e))
    }

    fn write_atomic(&self, contents: &str) -> Result<()> {
        let tmp_path = self.tmp_path();

        let mut file = File::create(&tmp_path).map_err(|e| map_io(&tmp_path, e))?;

        // Set restrictive permissions before any token is written (Unix only)
        #[cfg(unix)]
        {
            let mut perms = file
                .metadata()
                .map_err(|e| map_io(&tmp_path, e))?
                .permissions();
            perms.set_mode(0o600);
            fs::set_permissions(&tmp_path, perms).map_err(|e| map_io(&tmp_path, e))?;
        }

        file.write_all(contents.as_bytes())
            .map_err(|e| map_io(&tmp_path, e))?;
        file.sync_all().map_err(|e| map_io(&tmp_path, e))?;

        fs::rename(&tmp_path, &self.path).map_err(|e| map_io(&self.path, e))
    }
}

impl CredentialStore for FileCredentialStore {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn load(&self) -> Result<StoredCredentials> {
        if !self.path.exists() {
            return Ok(StoredCredentials::default());
        }

        let lock_file = self.open_lock()?;
        lock_file
            .lock_shared()
            .map_err(|e| map_io(&self.lock_path(), e))?;

        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => String::new(),
            Err(e) => return Err(map_io(&self.path, e)),
        };

        lock_file
            .unlock()
            .map_err(|e| map_io(&self.lock_path(), e))?;

        if contents.trim().is_empty() {
            return Ok(StoredCredentials::default());
        }

        let stored: StoredFile = serde_json::from_str(&contents).map_err(|e| {
            Error::Storage(StorageError::Corrupt {
                message: e.to_string(),
            })
        })?;

        Ok(stored.into())
    }

    #[instrument(skip(self, credentials), fields(path = %self.path.display()))]
    fn save(&self, credentials: &StoredCredentials) -> Result<()> {
        let json = serde_json::to_string_pretty(&StoredFile::from(credentials)).map_err(|e| {
            Error::Storage(StorageError::Corrupt {
                message: e.to_string(),
            })
        })?;

        let lock_file = self.open_lock()?;
        lock_file
            .lock_exclusive()
            .map_err(|e| map_io(&self.lock_path(), e))?;

        let result = self.write_atomic(&json);

        lock_file
            .unlock()
            .map_err(|e| map_io(&self.lock_path(), e))?;

        debug!("Credentials saved");
        result
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn clear(&self) -> Result<()> {
        let lock_file = self.open_lock()?;
        lock_file
            .lock_exclusive()
            .map_err(|e| map_io(&self.lock_path(), e))?;

        let result = match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(map_io(&self.path, e)),
        };

        lock_file
            .unlock()
            .map_err(|e| map_io(&self.lock_path(), e))?;

        debug!("Credentials cleared");
        result
    }
}
