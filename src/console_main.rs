//! AWS Access Key Console
//!
//! Interactive menu for listing, creating and deleting IAM access keys.
//! Credentials are typed in at startup and never written anywhere.

use anyhow::Result;
use aws_key_updater::console::{self, TerminalConsole};
use aws_key_updater::iam::{IamClient, IamClientConfig};
use clap::Parser;

/// Interactively manage IAM access keys for the signed-in user.
#[derive(Parser, Debug)]
#[command(name = "aws-key-console", author, version, about)]
struct Args {
    /// Send IAM requests to this endpoint instead of the AWS default
    #[arg(long, env = "AWS_KEY_UPDATER_ENDPOINT_URL")]
    endpoint_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    aws_key_updater::init_logging();

    tracing::info!("Starting aws-key-console v{}", env!("CARGO_PKG_VERSION"));

    let mut terminal = TerminalConsole::new();
    let endpoint_url = args.endpoint_url;

    let session = console::sign_in(&mut terminal, |credentials| {
        let config =
            IamClientConfig::from_session(&credentials).with_endpoint_url(endpoint_url.clone());
        IamClient::with_config(config)
    })
    .await?;

    tracing::info!("Signed in to IAM in {}", session.service().region());

    session.run(&mut terminal).await?;

    Ok(())
}
