//! Command implementations.

pub mod auth;
pub mod request;
