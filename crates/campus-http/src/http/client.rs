//! HTTP client implementation.

use reqwest::header::{AUTHORIZATION, HeaderName, HeaderValue};
use tracing::{debug, instrument, trace};

use campus_core::error::{ApiError, Error, InvalidInputError, TransportError};
use campus_core::{AccessToken, ApiRequest, ApiResponse, Method, Result, TokenPair};

use crate::config::GatewayConfig;

use super::endpoints::{ErrorBody, RefreshRequest, SessionResponse};

/// HTTP client for the administration API.
///
/// Sends exactly what it is given: no retries, no token handling beyond
/// attaching the token passed in.
#[derive(Debug, Clone)]
pub(crate) struct HttpClient {
    client: reqwest::Client,
    config: GatewayConfig,
}

impl HttpClient {
    /// Create a new client for the configured API.
    pub fn new(config: GatewayConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.timeout)
            .build()
            .map_err(|e| TransportError::Http {
                message: format!("failed to build HTTP client: {}", e),
            })?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Send a request, attaching `token` as a bearer credential if given.
    ///
    /// Non-success statuses become [`Error::Api`].
    #[instrument(skip(self, request, token), fields(method = %request.method, path = %request.path))]
    pub async fn execute(
        &self,
        request: &ApiRequest,
        token: Option<&AccessToken>,
    ) -> Result<ApiResponse> {
        let url = self.config.base_url.endpoint(&request.path);
        debug!(authenticated = token.is_some(), "API request");
        trace!(query = ?request.query, "query parameters");

        let mut builder = self
            .client
            .request(to_reqwest_method(request.method), &url)
            .query(&request.query);

        for (name, value) in &request.headers {
            let name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
                InvalidInputError::Other {
                    message: format!("invalid header name '{}': {}", name, e),
                }
            })?;
            if token.is_some() && name == AUTHORIZATION {
                continue;
            }
            let value = HeaderValue::from_str(value).map_err(|e| InvalidInputError::Other {
                message: format!("invalid header value: {}", e),
            })?;
            builder = builder.header(name, value);
        }

        if let Some(token) = token {
            builder = builder.header(AUTHORIZATION, bearer_header(token)?);
        }

        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| self.map_reqwest(e))?;
        self.handle_response(response).await
    }

    /// Exchange a token pair at the refresh endpoint.
    #[instrument(skip(self, pair))]
    pub async fn refresh(&self, pair: &TokenPair) -> Result<SessionResponse> {
        let url = self.config.base_url.endpoint(&self.config.refresh_path);
        debug!("Token refresh request");

        let body = RefreshRequest {
            token: pair.access.as_str(),
            refresh_token: pair.refresh.as_str(),
        };

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.map_reqwest(e))?;

        self.handle_response(response).await?.json()
    }

    /// Handle a response, reading the body or error.
    async fn handle_response(&self, response: reqwest::Response) -> Result<ApiResponse> {
        let status = response.status();
        trace!(status = %status, "API response");

        if status.is_success() {
            let body = response.bytes().await.map_err(|e| self.map_reqwest(e))?;
            Ok(ApiResponse::new(status.as_u16(), body.to_vec()))
        } else {
            Err(Error::Api(self.parse_error_response(response).await))
        }
    }

    /// Parse an error response, falling back to the bare status.
    async fn parse_error_response(&self, response: reqwest::Response) -> ApiError {
        let status = response.status().as_u16();

        match response.json::<ErrorBody>().await {
            Ok(body) => ApiError::new(status, body.error, body.message),
            Err(_) => ApiError::new(status, None, None),
        }
    }

    fn map_reqwest(&self, err: reqwest::Error) -> Error {
        let err = if err.is_timeout() {
            TransportError::Timeout {
                duration_ms: self.config.timeout.as_millis() as u64,
            }
        } else if err.is_connect() {
            TransportError::Connection {
                message: err.to_string(),
            }
        } else {
            TransportError::Http {
                message: err.to_string(),
            }
        };
        Error::Transport(err)
    }
}

fn to_reqwest_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Patch => reqwest::Method::PATCH,
        Method::Delete => reqwest::Method::DELETE,
    }
}

fn bearer_header(token: &AccessToken) -> Result<HeaderValue> {
    let mut value = HeaderValue::from_str(&token.bearer()).map_err(|_| {
        InvalidInputError::Other {
            message: "access token contains invalid header characters".to_string(),
        }
    })?;
    value.set_sensitive(true);
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use campus_core::ApiUrl;

    #[test]
    fn client_creation() {
        let config = GatewayConfig::new(ApiUrl::new("https://campus.example.edu/api").unwrap());
        let client = HttpClient::new(config).unwrap();
        assert_eq!(
            client.config().base_url.as_str(),
            "https://campus.example.edu/api"
        );
    }

    #[test]
    fn bearer_header_is_sensitive() {
        let value = bearer_header(&AccessToken::new("A1")).unwrap();
        assert!(value.is_sensitive());
        assert_eq!(value.to_str().unwrap(), "Bearer A1");
    }

    #[test]
    fn bearer_header_rejects_newlines() {
        assert!(bearer_header(&AccessToken::new("A1\nX-Evil: 1")).is_err());
    }
}
