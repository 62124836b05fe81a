//! Authenticated request gateway with single-flight token refresh.
//!
//! When the backend answers 401, the first failing request (the leader)
//! starts a refresh; every request that fails while it is running (the
//! followers) waits for that same refresh instead of starting its own.
//! Once it settles all waiters are released together, and each replays its
//! original request once with the new token.

use std::mem;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::de::DeserializeOwned;
use tokio::sync::oneshot;
use tracing::{debug, info, instrument, warn};

use campus_core::error::{AuthError, Error};
use campus_core::{
    AccessToken, ApiRequest, ApiResponse, CredentialStore, Credentials, Result, SessionListener,
    StoredCredentials,
};

use crate::config::GatewayConfig;
use crate::http::client::HttpClient;
use crate::http::endpoints::{LoginRequest, SessionResponse};

/// Sends requests to the administration API with bearer authentication and
/// transparent token refresh.
///
/// Gateways are cheap to clone (they share internal state through an
/// `Arc`). All clones coordinate through the same refresh state, so an
/// application should build one gateway and hand out clones.
///
/// # Refresh behavior
///
/// - A 401 on any request other than login/refresh triggers at most one
///   refresh, however many requests fail concurrently.
/// - Each request is replayed at most once; a 401 on the replay is
///   returned to the caller.
/// - If the refresh fails, or a login/refresh call itself gets a 401, the
///   stored credentials are cleared and the [`SessionListener`] is
///   notified.
#[derive(Clone)]
pub struct AuthGateway {
    inner: Arc<GatewayInner>,
}

struct GatewayInner {
    client: HttpClient,
    store: Arc<dyn CredentialStore>,
    listener: Arc<dyn SessionListener>,
    state: Mutex<RefreshState>,
}

/// Whether a refresh is in flight, and who is waiting on it.
enum RefreshState {
    Idle,
    Refreshing(Vec<oneshot::Sender<RefreshOutcome>>),
}

/// How a shared refresh settled. Cloned to every waiter.
#[derive(Debug, Clone)]
enum RefreshOutcome {
    Refreshed(AccessToken),
    /// No token pair was stored, so the refresh endpoint was never called.
    NoCredentials,
    Failed(Arc<Error>),
}

/// What started a refresh.
enum Trigger {
    /// A request carrying this token (or none) was rejected with 401.
    Rejected(Option<AccessToken>),
    /// An explicit [`AuthGateway::refresh`] call.
    Explicit,
}

impl AuthGateway {
    /// Create a gateway.
    ///
    /// # Arguments
    ///
    /// * `config` - API location, timeout and auth endpoint paths
    /// * `store` - Where the token pair and user profile are persisted
    /// * `listener` - Notified when the session is torn down
    pub fn new(
        config: GatewayConfig,
        store: Arc<dyn CredentialStore>,
        listener: Arc<dyn SessionListener>,
    ) -> Result<Self> {
        Ok(Self {
            inner: Arc::new(GatewayInner {
                client: HttpClient::new(config)?,
                store,
                listener,
                state: Mutex::new(RefreshState::Idle),
            }),
        })
    }

    /// Returns the gateway configuration.
    pub fn config(&self) -> &GatewayConfig {
        self.inner.client.config()
    }

    /// Send a request with the stored bearer token.
    ///
    /// A 401 is recovered by refreshing the token pair and replaying the
    /// request once. Any other error status is returned unchanged as
    /// [`Error::Api`].
    ///
    /// # Errors
    ///
    /// - [`Error::Api`] for non-success responses, including the original
    ///   401 when the session cannot be recovered
    /// - [`AuthError::RefreshFailed`] when the shared refresh failed
    /// - [`Error::Transport`] for network failures and timeouts
    #[instrument(skip(self, request), fields(method = %request.method, path = %request.path))]
    pub async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        let token = self.inner.store.load()?.access_token;

        let rejection = match self.inner.client.execute(&request, token.as_ref()).await {
            Err(Error::Api(err)) if err.is_auth_error() => err,
            other => return other,
        };

        if self.config().is_exempt(&request.path) {
            warn!("Authentication endpoint rejected the request; ending session");
            self.inner.end_session();
            return Err(Error::Api(rejection));
        }

        match self.await_refresh(Trigger::Rejected(token)).await? {
            RefreshOutcome::Refreshed(token) => {
                debug!("Replaying request with refreshed token");
                self.inner.client.execute(&request, Some(&token)).await
            }
            RefreshOutcome::NoCredentials => Err(Error::Api(rejection)),
            RefreshOutcome::Failed(source) => Err(AuthError::RefreshFailed { source }.into()),
        }
    }

    /// Send a request and decode the JSON response body.
    pub async fn send_json<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T> {
        self.send(request).await?.json()
    }

    /// Log in and store the issued token pair and user profile.
    ///
    /// A 401 from the login endpoint clears any stored session, notifies the
    /// listener and is returned as [`Error::Api`].
    #[instrument(skip(self, credentials), fields(email = %credentials.email()))]
    pub async fn login(&self, credentials: &Credentials) -> Result<StoredCredentials> {
        info!("Logging in");

        let request = ApiRequest::post(self.config().login_path.clone()).json(&LoginRequest {
            email: credentials.email(),
            password: credentials.password(),
        })?;

        let response: SessionResponse = self.send_json(request).await?;
        let stored = response.into_stored(None);
        self.inner.store.save(&stored)?;

        debug!("Login successful");
        Ok(stored)
    }

    /// Forget the stored session.
    #[instrument(skip(self))]
    pub fn logout(&self) -> Result<()> {
        info!("Logging out");
        self.inner.store.clear()
    }

    /// Refresh the token pair now.
    ///
    /// Joins a refresh that is already in flight rather than starting a
    /// second one.
    ///
    /// # Errors
    ///
    /// - [`AuthError::MissingCredentials`] if no token pair is stored
    /// - [`AuthError::RefreshFailed`] if the refresh endpoint failed
    /// - [`AuthError::SessionExpired`] if the refresh ended without an outcome
    #[instrument(skip(self))]
    pub async fn refresh(&self) -> Result<()> {
        match self.await_refresh(Trigger::Explicit).await? {
            RefreshOutcome::Refreshed(_) => Ok(()),
            RefreshOutcome::NoCredentials => Err(AuthError::MissingCredentials.into()),
            RefreshOutcome::Failed(source) => Err(AuthError::RefreshFailed { source }.into()),
        }
    }

    /// The cached profile of the logged-in user, if any.
    pub fn current_user(&self) -> Result<Option<serde_json::Value>> {
        Ok(self.inner.store.load()?.user)
    }

    /// Returns true if a token pair is stored.
    pub fn is_authenticated(&self) -> Result<bool> {
        Ok(self.inner.store.load()?.token_pair().is_some())
    }

    /// Lead or join a refresh and wait for it to settle.
    async fn await_refresh(&self, trigger: Trigger) -> Result<RefreshOutcome> {
        let receiver = {
            // Check-and-set with no await while the lock is held
            let mut state = self.inner.lock_state();
            match &mut *state {
                RefreshState::Refreshing(waiters) => {
                    debug!(waiting = waiters.len() + 1, "Joining in-flight token refresh");
                    let (tx, rx) = oneshot::channel();
                    waiters.push(tx);
                    rx
                }
                RefreshState::Idle => {
                    if let Trigger::Rejected(used) = &trigger {
                        // A refresh may have settled while this request was in
                        // flight; if so its token is already stored.
                        if let Some(current) = self.inner.store.load()?.access_token {
                            if used.as_ref() != Some(&current) {
                                debug!("Token changed since request was sent; replaying");
                                return Ok(RefreshOutcome::Refreshed(current));
                            }
                        }
                    }

                    info!("Starting token refresh");
                    let (tx, rx) = oneshot::channel();
                    *state = RefreshState::Refreshing(vec![tx]);

                    // The refresh runs detached so that dropping the leader's
                    // future cannot strand the followers.
                    let inner = self.inner.clone();
                    tokio::spawn(async move { inner.run_refresh().await });
                    rx
                }
            }
        };

        // Closed without an outcome only if the refresh task unwound
        receiver.await.map_err(|_| AuthError::SessionExpired.into())
    }
}

impl GatewayInner {
    fn lock_state(&self) -> MutexGuard<'_, RefreshState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Perform the refresh, then release every waiter with its outcome.
    async fn run_refresh(&self) {
        let _release = ReleaseOnUnwind(self);
        let outcome = self.exchange_tokens().await;

        match &outcome {
            RefreshOutcome::Refreshed(_) => info!("Token refresh succeeded"),
            RefreshOutcome::NoCredentials => {
                warn!("No stored token pair; ending session");
                self.end_session();
            }
            RefreshOutcome::Failed(err) => {
                warn!(error = %err, "Token refresh failed; ending session");
                self.end_session();
            }
        }

        let waiters = match mem::replace(&mut *self.lock_state(), RefreshState::Idle) {
            RefreshState::Refreshing(waiters) => waiters,
            RefreshState::Idle => Vec::new(),
        };

        debug!(waiters = waiters.len(), "Releasing refresh waiters");
        for waiter in waiters {
            // A waiter whose caller went away has dropped its receiver
            let _ = waiter.send(outcome.clone());
        }
    }

    async fn exchange_tokens(&self) -> RefreshOutcome {
        let stored = match self.store.load() {
            Ok(stored) => stored,
            Err(err) => return RefreshOutcome::Failed(Arc::new(err)),
        };

        let Some(pair) = stored.token_pair() else {
            return RefreshOutcome::NoCredentials;
        };

        let response = match self.client.refresh(&pair).await {
            Ok(response) => response,
            Err(err) => return RefreshOutcome::Failed(Arc::new(err)),
        };

        let pair = response.token_pair();
        let refreshed = StoredCredentials::new(pair.clone(), response.usuario.or(stored.user));
        if let Err(err) = self.store.save(&refreshed) {
            return RefreshOutcome::Failed(Arc::new(err));
        }

        RefreshOutcome::Refreshed(pair.access)
    }

    /// Clear all stored credentials and notify the listener.
    fn end_session(&self) {
        if let Err(err) = self.store.clear() {
            warn!(error = %err, "Failed to clear stored credentials");
        }
        self.listener.session_expired();
    }
}

/// Drops the queued waiters if the refresh task panics, so they observe a
/// closed channel and the gateway can refresh again.
struct ReleaseOnUnwind<'a>(&'a GatewayInner);

impl Drop for ReleaseOnUnwind<'_> {
    fn drop(&mut self) {
        if std::thread::panicking() {
            *self.0.lock_state() = RefreshState::Idle;
        }
    }
}

impl std::fmt::Debug for AuthGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let refreshing = matches!(*self.inner.lock_state(), RefreshState::Refreshing(_));
        f.debug_struct("AuthGateway")
            .field("base_url", &self.config().base_url)
            .field("refreshing", &refreshing)
            .finish()
    }
}
