//! SF Report - Main Entry Point
//!
//! Runs the Salesforce weekly report function from the command line.

mod cli;
mod commands;

use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing; logs go to stderr so stdout stays JSON
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    match &cli.env_file {
        Some(path) => {
            dotenv::from_path(path)?;
        }
        None => {
            dotenv::dotenv().ok();
        }
    }

    tracing::debug!("sf-report v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Run {
            data,
            invocation,
            timeout_secs,
        } => {
            commands::run(
                data,
                invocation.as_deref(),
                Duration::from_secs(timeout_secs),
            )
            .await
        }
        Commands::Token { refresh } => commands::token(refresh).await,
        Commands::Manifest => commands::manifest(),
    }
}
