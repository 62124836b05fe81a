//! Login command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use campus_core::Credentials;

use crate::cli::ApiOptions;
use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Account email
    #[arg(long)]
    pub email: String,

    /// Account password
    #[arg(long, env = "CAMPUS_PASSWORD", hide_env_values = true)]
    pub password: String,
}

pub async fn run(args: LoginArgs, options: &ApiOptions) -> Result<()> {
    let gateway = session::open_gateway(options)?;
    let credentials = Credentials::new(&args.email, &args.password);

    eprintln!("{}", "Logging in...".dimmed());

    let stored = gateway
        .login(&credentials)
        .await
        .context("Failed to login")?;

    output::success("Logged in successfully");
    println!();
    output::field("API", gateway.config().base_url.as_str());
    if let Some(user) = &stored.user {
        print_profile(user);
    }

    Ok(())
}

/// Print the commonly present profile fields.
pub(super) fn print_profile(user: &serde_json::Value) {
    for key in ["nombre", "email", "rol"] {
        if let Some(value) = user.get(key).and_then(|v| v.as_str()) {
            output::field(key, value);
        }
    }
}
