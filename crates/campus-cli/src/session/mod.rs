//! Gateway construction for CLI commands.

pub mod storage;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::debug;

use campus_core::ApiUrl;
use campus_http::{AuthGateway, GatewayConfig};

use crate::cli::ApiOptions;
use crate::output;

/// Build a gateway over the on-disk credential store.
pub fn open_gateway(options: &ApiOptions) -> Result<AuthGateway> {
    let base_url = ApiUrl::new(&options.url).context("Invalid API URL")?;
    let config = GatewayConfig::new(base_url)
        .with_timeout(Duration::from_secs(options.timeout))
        .with_user_agent(concat!("campus-cli/", env!("CAMPUS_VERSION")));

    let store = storage::open_store()?;
    debug!(api = %config.base_url, credentials = %store.path().display(), "Opening gateway");

    AuthGateway::new(config, Arc::new(store), Arc::new(session_expired))
        .context("Failed to create HTTP client")
}

fn session_expired() {
    output::error("Session expired. Run 'campus auth login' to sign in again.");
}
