//! Login command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use headbot::{Credentials, Session};

use crate::cli::{ApiArgs, CredentialArgs};
use crate::output;

#[derive(Args, Debug)]
pub struct LoginArgs {
    #[command(flatten)]
    pub api: ApiArgs,

    #[command(flatten)]
    pub credentials: CredentialArgs,

    /// Print the issued tokens
    #[arg(long)]
    pub show_tokens: bool,
}

pub async fn run(args: LoginArgs) -> Result<()> {
    let api = super::parse_api_url(&args.api.api_url)?;
    let credentials = Credentials::new(&args.credentials.email, &args.credentials.password);

    eprintln!("{}", "Logging in...".dimmed());

    let session = Session::open(&api, credentials)
        .await
        .context("Failed to login")?;

    output::success("Logged in successfully");
    println!();
    output::field("API", session.api().as_str());
    if args.show_tokens {
        super::print_tokens(&session).await;
    }

    session.close().await;
    Ok(())
}
