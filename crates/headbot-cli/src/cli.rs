//! CLI argument definitions.

use clap::{Args, Parser};

use crate::commands::Command;

/// Headbot API CLI tool.
#[derive(Parser, Debug)]
#[command(name = "headbot")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// API root selection shared by every command.
#[derive(Args, Debug)]
pub struct ApiArgs {
    /// API root URL
    #[arg(long, default_value = headbot::DEFAULT_API_URL)]
    pub api_url: String,
}

/// Account credentials.
#[derive(Args, Debug)]
pub struct CredentialArgs {
    /// Account email
    #[arg(long)]
    pub email: String,

    /// Account password
    #[arg(long)]
    pub password: String,
}
