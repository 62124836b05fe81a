//! campus-core - Core types and traits for the academic administration API client.

pub mod credentials;
pub mod error;
pub mod request;
pub mod tokens;
pub mod traits;
pub mod types;

pub use credentials::Credentials;
pub use error::Error;
pub use request::{ApiRequest, ApiResponse};
pub use tokens::{AccessToken, RefreshToken, TokenPair};
pub use traits::{CredentialStore, SessionListener, StoredCredentials};
pub use types::{ApiUrl, Method};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
