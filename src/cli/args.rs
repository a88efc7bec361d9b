//! CLI argument definitions using clap
//!
//! Commands:
//! - riskwizard serve --config <path> [--port <port>]
//! - riskwizard evaluate --config <path> [--explain]
//! - riskwizard lint --config <path>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// riskwizard - AI Act risk classification engine
#[derive(Parser, Debug)]
#[command(name = "riskwizard")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Load the rule table and serve the HTTP API
    Serve {
        /// Path to configuration file
        #[arg(long, default_value = "./riskwizard.json")]
        config: PathBuf,

        /// Override the configured HTTP port
        #[arg(long)]
        port: Option<u16>,
    },

    /// Evaluate one JSON answer object read from stdin
    Evaluate {
        /// Path to configuration file
        #[arg(long, default_value = "./riskwizard.json")]
        config: PathBuf,

        /// Include the matching rule in the output
        #[arg(long)]
        explain: bool,
    },

    /// Load the rule table and report lint warnings
    Lint {
        /// Path to configuration file
        #[arg(long, default_value = "./riskwizard.json")]
        config: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
