//! Refresh token command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use headbot::Session;

use crate::cli::ApiArgs;
use crate::output;

#[derive(Args, Debug)]
pub struct RefreshTokenArgs {
    #[command(flatten)]
    pub api: ApiArgs,

    /// Refresh token to exchange for a new token pair
    #[arg(long)]
    pub refresh_token: String,

    /// Print the issued tokens
    #[arg(long)]
    pub show_tokens: bool,
}

pub async fn run(args: RefreshTokenArgs) -> Result<()> {
    let api = super::parse_api_url(&args.api.api_url)?;

    eprintln!("{}", "Refreshing session...".dimmed());

    let session = Session::from_refresh_token(&api, &args.refresh_token)
        .await
        .context("Failed to refresh session")?;

    output::success("Session refreshed successfully");
    output::field("API", session.api().as_str());
    if args.show_tokens {
        super::print_tokens(&session).await;
    }

    session.close().await;
    Ok(())
}
