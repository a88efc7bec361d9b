//! CLI module for riskwizard
//!
//! Provides command-line interface for:
//! - serve: Load the rule table and serve the HTTP API
//! - evaluate: One-shot evaluation of answers read from stdin
//! - lint: Rule table lint report

mod args;
mod commands;
mod config;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{evaluate, evaluate_value, lint, lint_report, run, run_command, serve};
pub use config::Config;
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{read_request, write_response};
