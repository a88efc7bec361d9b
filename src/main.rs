//! riskwizard CLI entry point
//!
//! Minimal entrypoint: parse, dispatch, print errors to stderr, exit non-zero
//! on failure. All logic is delegated to the CLI module.

use riskwizard::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
