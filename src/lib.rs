//! AWS access key updater library
//!
//! This crate provides the pieces behind the two binaries:
//! - `aws-key-updater`: one-shot create/list/delete driven by a credentials file
//! - `aws-key-console`: an interactive menu over the same operations

pub mod cli;
pub mod console;
pub mod iam;
pub mod settings;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global tracing subscriber.
///
/// Logs go to stderr so stdout only carries command output. The level comes
/// from `RUST_LOG`, defaulting to `warn`.
pub fn init_logging() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();
}
