//! Session subcommand implementations.

mod login;
mod logout;
mod refresh_token;
mod whoami;

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::cli::ApiOptions;

#[derive(Args, Debug)]
pub struct AuthCommand {
    #[command(subcommand)]
    pub command: AuthSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum AuthSubcommand {
    /// Create a new session (login)
    Login(login::LoginArgs),

    /// Display the stored session
    Whoami(whoami::WhoamiArgs),

    /// Refresh the session tokens
    RefreshToken(refresh_token::RefreshTokenArgs),

    /// Forget the stored session
    Logout(logout::LogoutArgs),
}

pub async fn handle(cmd: AuthCommand, options: &ApiOptions) -> Result<()> {
    match cmd.command {
        AuthSubcommand::Login(args) => login::run(args, options).await,
        AuthSubcommand::Whoami(args) => whoami::run(args, options),
        AuthSubcommand::RefreshToken(args) => refresh_token::run(args, options).await,
        AuthSubcommand::Logout(args) => logout::run(args, options),
    }
}
