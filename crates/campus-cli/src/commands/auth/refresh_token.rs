//! Refresh token command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use crate::cli::ApiOptions;
use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct RefreshTokenArgs {}

pub async fn run(_args: RefreshTokenArgs, options: &ApiOptions) -> Result<()> {
    let gateway = session::open_gateway(options)?;

    if !gateway.is_authenticated().context("Failed to load session")? {
        anyhow::bail!("No active session. Run 'campus auth login' first.");
    }

    eprintln!("{}", "Refreshing session...".dimmed());

    gateway
        .refresh()
        .await
        .context("Failed to refresh session")?;

    output::success("Session refreshed successfully");
    Ok(())
}
