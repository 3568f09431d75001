//! Binary crate for the `gopnik` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments into the pipeline's input type
//! - Interactive configuration
//! - Printing the reply (or the user-facing failure sentence)

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gopnik=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cmd = cli::Cli::parse();
    cmd.run().await
}
