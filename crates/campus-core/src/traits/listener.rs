//! Session-expired notification trait.

/// Receives a notification when the session can no longer be recovered.
///
/// A dashboard sends the user back to the login screen here; a CLI tells
/// the user to log in again. Implemented for any `Fn()` closure.
pub trait SessionListener: Send + Sync {
    /// Called once each time the gateway tears the session down.
    fn session_expired(&self);
}

impl<F> SessionListener for F
where
    F: Fn() + Send + Sync,
{
    fn session_expired(&self) {
        self()
    }
}
