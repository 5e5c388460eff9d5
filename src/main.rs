//! AWS Access Key Updater
//!
//! Creates, lists or deletes IAM access keys for the user whose credentials are
//! stored in a shared credentials file.

use std::process::ExitCode;

use anyhow::Result;
use aws_key_updater::cli::{self, Args, Invocation};
use aws_key_updater::settings::Settings;
use clap::Parser;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    aws_key_updater::init_logging();

    tracing::info!("Starting aws-key-updater v{}", env!("CARGO_PKG_VERSION"));

    let invocation = match Invocation::parse(&args.args) {
        Ok(invocation) => invocation,
        Err(e) => {
            tracing::debug!("Rejected arguments: {}", e);
            if let Err(e) = cli::write_usage(&mut std::io::stdout()) {
                tracing::warn!("Failed to print usage: {}", e);
            }
            return ExitCode::SUCCESS;
        }
    };

    match run(&invocation, &args.settings()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(invocation: &Invocation, settings: &Settings) -> Result<()> {
    let client = cli::connect(invocation, settings).await?;
    cli::execute(&client, &invocation.command, &mut std::io::stdout().lock()).await?;
    Ok(())
}
