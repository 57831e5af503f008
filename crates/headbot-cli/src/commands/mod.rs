//! Subcommand implementations.

mod crawlers;
mod login;
mod refresh_token;

use anyhow::{Context, Result};
use clap::Subcommand;
use tracing::debug;

use headbot::ApiUrl;

use crate::output;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Log in with email and password
    Login(login::LoginArgs),

    /// Open a session from a refresh token
    RefreshToken(refresh_token::RefreshTokenArgs),

    /// List crawlers
    Crawlers(crawlers::CrawlersArgs),
}

impl Command {
    fn name(&self) -> &'static str {
        match self {
            Command::Login(_) => "login",
            Command::RefreshToken(_) => "refresh-token",
            Command::Crawlers(_) => "crawlers",
        }
    }
}

pub async fn handle(cmd: Command) -> Result<()> {
    debug!(command = cmd.name(), "Dispatching command");
    match cmd {
        Command::Login(args) => login::run(args).await,
        Command::RefreshToken(args) => refresh_token::run(args).await,
        Command::Crawlers(args) => crawlers::run(args).await,
    }
}

fn parse_api_url(value: &str) -> Result<ApiUrl> {
    let api = ApiUrl::new(value).context("Invalid API URL")?;
    debug!(api = %api, "Using API root");
    Ok(api)
}

async fn print_tokens(session: &headbot::Session) {
    if let Some(access) = session.access_token().await {
        output::field("Access token", &access);
    }
    if let Some(refresh) = session.refresh_token().await {
        output::field("Refresh token", &refresh);
    }
}
