//! Crawlers command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use headbot::{Credentials, Session};

use crate::cli::{ApiArgs, CredentialArgs};
use crate::output;

#[derive(Args, Debug)]
pub struct CrawlersArgs {
    #[command(flatten)]
    pub api: ApiArgs,

    #[command(flatten)]
    pub credentials: CredentialArgs,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

pub async fn run(args: CrawlersArgs) -> Result<()> {
    let api = super::parse_api_url(&args.api.api_url)?;
    let credentials = Credentials::new(&args.credentials.email, &args.credentials.password);

    // Lazy session: login happens on the first call.
    let session = Session::new(api, credentials).context("Failed to create session")?;

    let crawlers = session
        .crawlers()
        .await
        .context("Failed to list crawlers")?;

    if crawlers.is_empty() {
        eprintln!("{}", "No crawlers found.".dimmed());
    }

    for crawler in &crawlers {
        if args.pretty {
            output::json_pretty(crawler)?;
        } else {
            output::json(crawler)?;
        }
    }

    session.close().await;
    Ok(())
}
