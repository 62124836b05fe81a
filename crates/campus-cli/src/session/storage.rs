//! Location of the persisted credentials.

use std::path::PathBuf;

use anyhow::{Context, Result};
use directories::ProjectDirs;

use campus_store::FileCredentialStore;

/// Get the credentials file path.
pub fn credentials_path() -> Result<PathBuf> {
    let dirs =
        ProjectDirs::from("", "", "campus").context("Could not determine data directory")?;

    Ok(dirs.data_dir().join("credentials.json"))
}

/// Open the credential store in the user's data directory.
pub fn open_store() -> Result<FileCredentialStore> {
    Ok(FileCredentialStore::new(credentials_path()?))
}
