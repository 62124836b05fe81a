//! Logout command implementation.

use anyhow::{Context, Result};
use clap::Args;

use crate::cli::ApiOptions;
use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct LogoutArgs {}

pub fn run(_args: LogoutArgs, options: &ApiOptions) -> Result<()> {
    let gateway = session::open_gateway(options)?;

    gateway.logout().context("Failed to clear stored session")?;

    output::success("Logged out");
    Ok(())
}
