//! HTTP transport for the administration API.

pub(crate) mod client;
pub(crate) mod endpoints;
