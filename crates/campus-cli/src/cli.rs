//! CLI argument definitions.

use clap::{Args, Parser, Subcommand};

use crate::commands::auth::AuthCommand;
use crate::commands::request::RequestArgs;

/// Command-line client for the academic administration API.
#[derive(Parser, Debug)]
#[command(name = "campus")]
#[command(author, version = env!("CAMPUS_VERSION"), about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(flatten)]
    pub api: ApiOptions,

    #[command(subcommand)]
    pub command: Commands,
}

/// Where and how to reach the API.
#[derive(Args, Debug, Clone)]
pub struct ApiOptions {
    /// API base URL
    #[arg(
        long = "api",
        env = "CAMPUS_API_URL",
        default_value = "http://localhost:3000/api",
        global = true
    )]
    pub url: String,

    /// Per-request timeout in seconds
    #[arg(long, env = "CAMPUS_TIMEOUT", default_value_t = 30, global = true)]
    pub timeout: u64,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Session management (login, logout, whoami)
    Auth(AuthCommand),

    /// Send an authenticated request to the API
    Request(RequestArgs),
}
