//! API base URL type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::Url;

use crate::error::{Error, InvalidInputError};

/// A validated base URL for the administration REST API.
///
/// The base may carry a path prefix (e.g. `https://campus.example.edu/api`);
/// request paths are appended to it.
///
/// # Example
///
/// ```
/// use campus_core::ApiUrl;
///
/// let api = ApiUrl::new("https://campus.example.edu/api").unwrap();
/// assert_eq!(api.endpoint("/auth/login"),
///            "https://campus.example.edu/api/auth/login");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ApiUrl(Url);

impl ApiUrl {
    /// Create a new API URL from a string, validating the format.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is not absolute, has no host, or uses
    /// plain HTTP for a non-local host.
    pub fn new(s: impl AsRef<str>) -> Result<Self, Error> {
        let s = s.as_ref();
        let url = Url::parse(s).map_err(|e| InvalidInputError::ApiUrl {
            value: s.to_string(),
            reason: e.to_string(),
        })?;

        Self::validate(&url, s)?;

        Ok(Self(url))
    }

    /// Returns the full URL for a request path.
    pub fn endpoint(&self, path: &str) -> String {
        let base = self.0.as_str().trim_end_matches('/');
        format!("{}/{}", base, path.trim_start_matches('/'))
    }

    /// Returns the base URL as a string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    fn validate(url: &Url, original: &str) -> Result<(), Error> {
        if url.cannot_be_a_base() {
            return Err(InvalidInputError::ApiUrl {
                value: original.to_string(),
                reason: "must be an absolute URL".to_string(),
            }
            .into());
        }

        if url.host_str().is_none() {
            return Err(InvalidInputError::ApiUrl {
                value: original.to_string(),
                reason: "must have a host".to_string(),
            }
            .into());
        }

        let scheme = url.scheme();
        if scheme != "https" && !(scheme == "http" && is_local_host(url)) {
            return Err(InvalidInputError::ApiUrl {
                value: original.to_string(),
                reason: "must use HTTPS (HTTP allowed only for localhost)".to_string(),
            }
            .into());
        }

        Ok(())
    }
}

fn is_local_host(url: &Url) -> bool {
    url.host_str()
        .is_some_and(|h| h == "localhost" || h == "127.0.0.1" || h == "[::1]")
}

impl fmt::Display for ApiUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ApiUrl {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for ApiUrl {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.0.as_str())
    }
}

impl<'de> Deserialize<'de> for ApiUrl {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        ApiUrl::new(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_https_url() {
        let api = ApiUrl::new("https://campus.example.edu").unwrap();
        assert_eq!(api.as_str(), "https://campus.example.edu/");
    }

    #[test]
    fn valid_localhost_http() {
        let api = ApiUrl::new("http://localhost:3000/api").unwrap();
        assert!(ApiUrl::new("http://127.0.0.1:3000").is_ok());
        assert!(ApiUrl::new("http://[::1]:3000").is_ok());
        assert_eq!(
            api.endpoint("auth/refresh"),
            "http://localhost:3000/api/auth/refresh"
        );
    }

    #[test]
    fn endpoint_joins_without_double_slash() {
        let api = ApiUrl::new("https://campus.example.edu/api/").unwrap();
        assert_eq!(
            api.endpoint("/cursos"),
            "https://campus.example.edu/api/cursos"
        );

        let root = ApiUrl::new("https://campus.example.edu").unwrap();
        assert_eq!(root.endpoint("/cursos"), "https://campus.example.edu/cursos");
    }

    #[test]
    fn invalid_http_non_localhost() {
        assert!(ApiUrl::new("http://campus.example.edu").is_err());
    }

    #[test]
    fn invalid_relative_url() {
        assert!(ApiUrl::new("/api/cursos").is_err());
    }

    #[test]
    fn file_url_rejected() {
        assert!(ApiUrl::new("file:///tmp/api").is_err());
    }

    #[test]
    fn deserializes_with_validation() {
        let ok: ApiUrl = serde_json::from_str("\"https://campus.example.edu\"").unwrap();
        assert_eq!(ok.endpoint("cursos"), "https://campus.example.edu/cursos");
        assert!(serde_json::from_str::<ApiUrl>("\"http://remote.example\"").is_err());
    }
}
