//! Whoami command implementation.

use anyhow::{Context, Result};
use clap::Args;

use crate::cli::ApiOptions;
use crate::output;
use crate::session;

use super::login::print_profile;

#[derive(Args, Debug)]
pub struct WhoamiArgs {
    /// Print the full cached profile as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: WhoamiArgs, options: &ApiOptions) -> Result<()> {
    let gateway = session::open_gateway(options)?;

    if !gateway
        .is_authenticated()
        .context("Failed to read stored session")?
    {
        anyhow::bail!("No active session. Run 'campus auth login' first.");
    }

    let user = gateway
        .current_user()
        .context("Failed to read stored session")?
        .unwrap_or(serde_json::Value::Null);

    if args.json {
        return output::json(&user, false);
    }

    output::field("API", gateway.config().base_url.as_str());
    print_profile(&user);

    Ok(())
}
