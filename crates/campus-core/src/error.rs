//! Error types for the campus client.
//!
//! This module provides a unified error type with explicit variants for
//! transport, authentication, API, storage, and input validation errors.

use std::fmt;
use std::sync::Arc;

use thiserror::Error;

/// The unified error type for campus operations.
///
/// Callers can match on the variant to decide how to react: a
/// [`Error::Api`] is a backend response the client does not interpret,
/// while [`Error::Auth`] means the session could not be recovered.
#[derive(Debug, Error)]
pub enum Error {
    /// Network transport errors (connection, timeout, TLS).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Authentication errors (missing credentials, failed refresh).
    #[error("authentication error: {0}")]
    Auth(#[from] AuthError),

    /// Non-success responses from the backend.
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Credential storage errors.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Input validation errors (invalid URL, request body).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),
}

impl Error {
    /// Returns the API error if this is a backend response error.
    pub fn as_api(&self) -> Option<&ApiError> {
        match self {
            Error::Api(err) => Some(err),
            _ => None,
        }
    }

    /// Returns true if this error ended the session (refresh failed or
    /// credentials were missing).
    pub fn is_session_error(&self) -> bool {
        matches!(
            self,
            Error::Auth(AuthError::RefreshFailed { .. })
                | Error::Auth(AuthError::MissingCredentials)
                | Error::Auth(AuthError::SessionExpired)
        )
    }
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out after {duration_ms}ms")]
    Timeout { duration_ms: u64 },

    /// Generic HTTP client error.
    #[error("HTTP error: {message}")]
    Http { message: String },
}

/// Authentication-related errors.
#[derive(Debug, Error)]
pub enum AuthError {
    /// No access/refresh token pair is stored.
    #[error("no stored credentials")]
    MissingCredentials,

    /// The session ended while the request was waiting on it.
    #[error("session expired")]
    SessionExpired,

    /// Exchanging the refresh token failed.
    ///
    /// The underlying error is shared by every request that waited on the
    /// same refresh.
    #[error("token refresh failed: {source}")]
    RefreshFailed {
        #[source]
        source: Arc<Error>,
    },
}

/// A non-success response from the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// HTTP status code.
    pub status: u16,
    /// Machine-readable error code (if present).
    pub error: Option<String>,
    /// Error message from the server.
    pub message: Option<String>,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}", self.status)?;
        if let Some(ref error) = self.error {
            write!(f, " [{}]", error)?;
        }
        if let Some(ref message) = self.message {
            write!(f, ": {}", message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {}

impl ApiError {
    /// Create a new API error.
    pub fn new(status: u16, error: Option<String>, message: Option<String>) -> Self {
        Self {
            status,
            error,
            message,
        }
    }

    /// Check if this is an authentication failure (HTTP 401).
    pub fn is_auth_error(&self) -> bool {
        self.status == 401
    }
}

/// Credential storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    #[error("I/O error on {path}: {message}")]
    Io { path: String, message: String },

    /// Stored data could not be encoded or decoded.
    #[error("corrupt credential data: {message}")]
    Corrupt { message: String },
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid API base URL.
    #[error("invalid API URL '{value}': {reason}")]
    ApiUrl { value: String, reason: String },

    /// Invalid HTTP method name.
    #[error("invalid HTTP method '{value}'")]
    Method { value: String },

    /// Request or response body could not be (de)serialized.
    #[error("invalid body: {message}")]
    Body { message: String },

    /// Generic invalid input.
    #[error("invalid input: {message}")]
    Other { message: String },
}
