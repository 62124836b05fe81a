//! Gateway configuration.

use std::time::Duration;

use campus_core::ApiUrl;

/// Default per-request timeout, applied to the refresh call as well.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Login endpoint path.
pub const LOGIN_PATH: &str = "/auth/login";

/// Token refresh endpoint path.
pub const REFRESH_PATH: &str = "/auth/refresh";

/// Settings for an [`AuthGateway`](crate::AuthGateway).
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Base URL that request paths are appended to.
    pub base_url: ApiUrl,
    /// Per-request timeout, refresh calls included.
    pub timeout: Duration,
    /// Path of the login endpoint.
    pub login_path: String,
    /// Path of the token refresh endpoint.
    pub refresh_path: String,
    /// A request whose path contains any of these never triggers a
    /// refresh; a 401 on it ends the session.
    pub exempt_paths: Vec<String>,
    /// `User-Agent` header sent with every request.
    pub user_agent: String,
}

impl GatewayConfig {
    /// Configuration with the backend's standard auth endpoints and a
    /// 30 second timeout.
    pub fn new(base_url: ApiUrl) -> Self {
        Self {
            base_url,
            timeout: DEFAULT_TIMEOUT,
            login_path: LOGIN_PATH.to_string(),
            refresh_path: REFRESH_PATH.to_string(),
            exempt_paths: vec![LOGIN_PATH.to_string(), REFRESH_PATH.to_string()],
            user_agent: concat!("campus/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Add a path that must not trigger a refresh.
    pub fn with_exempt_path(mut self, path: impl Into<String>) -> Self {
        self.exempt_paths.push(path.into());
        self
    }

    /// Returns true if a 401 on `path` is unrecoverable.
    pub fn is_exempt(&self, path: &str) -> bool {
        self.exempt_paths.iter().any(|p| path.contains(p.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> GatewayConfig {
        GatewayConfig::new(ApiUrl::new("https://campus.example.edu/api").unwrap())
    }

    #[test]
    fn defaults() {
        let config = config();
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.login_path, "/auth/login");
        assert_eq!(config.refresh_path, "/auth/refresh");
    }

    #[test]
    fn auth_endpoints_are_exempt_by_substring() {
        let config = config();
        assert!(config.is_exempt("/auth/login"));
        assert!(config.is_exempt("/v2/auth/refresh?x=1"));
        assert!(!config.is_exempt("/cursos"));
        assert!(!config.is_exempt("/auth/passkey/options"));
    }

    #[test]
    fn extra_exempt_paths() {
        let config = config().with_exempt_path("/auth/passkey");
        assert!(config.is_exempt("/auth/passkey/verify"));
    }
}
