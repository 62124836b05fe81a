//! Collaborator traits for the request gateway.

mod listener;
mod store;

pub use listener::SessionListener;
pub use store::{CredentialStore, StoredCredentials};
