//! campus-http - Authenticated HTTP gateway for the administration API.
//!
//! All calls go through an [`AuthGateway`], which attaches the stored
//! bearer token and, when the backend answers 401, runs a single shared
//! token refresh for every request that failed at the same time.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use campus_core::{ApiRequest, ApiUrl, Credentials};
//! use campus_http::{AuthGateway, GatewayConfig};
//! use campus_store::MemoryCredentialStore;
//!
//! # async fn example() -> campus_core::Result<()> {
//! let config = GatewayConfig::new(ApiUrl::new("https://campus.example.edu/api")?);
//! let gateway = AuthGateway::new(
//!     config,
//!     Arc::new(MemoryCredentialStore::new()),
//!     Arc::new(|| eprintln!("session expired")),
//! )?;
//!
//! gateway.login(&Credentials::new("admin@colegio.edu", "secret")).await?;
//! let cursos: serde_json::Value = gateway.send_json(ApiRequest::get("/cursos")).await?;
//! # Ok(())
//! # }
//! ```

mod config;
mod gateway;
mod http;

pub use config::GatewayConfig;
pub use gateway::AuthGateway;
