//! Command line definition

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "sf-report")]
#[command(about = "Summarize Salesforce report data into a weekly report", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Load environment variables from this file instead of `./.env`
    #[arg(long, global = true, value_name = "FILE")]
    pub env_file: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the weekly report function once and print its outputs as JSON
    Run {
        /// Report data; read from stdin when neither this nor --invocation is given
        #[arg(short, long, conflicts_with = "invocation")]
        data: Option<String>,

        /// JSON invocation payload (`{"inputs": {...}, "env": {...}}`)
        #[arg(long, value_name = "FILE")]
        invocation: Option<PathBuf>,

        /// Give up after this many seconds
        #[arg(long, default_value = "120", env = "SF_REPORT_RUN_TIMEOUT_SECS")]
        timeout_secs: u64,
    },

    /// Fetch an access token and show its status
    Token {
        /// Discard any cached token and request a new one
        #[arg(short, long)]
        refresh: bool,
    },

    /// Print the app manifest as JSON
    Manifest,
}
