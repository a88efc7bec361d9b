//! CLI command implementations
//!
//! Boot order for `serve`:
//! 1. Configuration load
//! 2. Rule table load (FATAL on failure, before any request is accepted)
//! 3. Lint warnings
//! 4. HTTP activation

use std::path::Path;
use std::sync::Arc;

use serde_json::{json, Value};

use crate::answers::AnswerSet;
use crate::engine::RiskEngine;
use crate::http_server::HttpServer;
use crate::observability::{log_event, log_event_with_fields, Event, Logger};

use super::args::Command;
use super::config::Config;
use super::errors::{CliError, CliResult};
use super::io::{read_request, write_response};

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Serve { config, port } => serve(&config, port),
        Command::Evaluate { config, explain } => evaluate(&config, explain),
        Command::Lint { config } => lint(&config),
    }
}

fn load_config(config_path: &Path) -> CliResult<Config> {
    let config = Config::load(config_path)?;
    Logger::set_min_severity(config.severity()?);

    let wizard_path = config.wizard_config_path().display().to_string();
    log_event_with_fields(Event::ConfigLoaded, &[("wizard_config", wizard_path.as_str())]);

    Ok(config)
}

/// Load the rule table and serve the HTTP API
pub fn serve(config_path: &Path, port: Option<u16>) -> CliResult<()> {
    log_event(Event::BootStart);
    let config = load_config(config_path)?;

    let engine =
        Arc::new(RiskEngine::new(config.wizard_config_path()).with_lint_on_load(config.lint_on_load));

    // Warm the cache so a broken rule table stops boot instead of failing requests
    engine.loaded()?;
    log_event(Event::BootComplete);

    let mut http_config = config.http.clone();
    if let Some(port) = port {
        http_config.port = port;
    }
    let server = HttpServer::new(http_config, engine);

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::boot_failed(format!("HTTP server failed: {}", e)))
    })?;

    Ok(())
}

/// Evaluate the answer object read from stdin
pub fn evaluate(config_path: &Path, explain: bool) -> CliResult<()> {
    let config = load_config(config_path)?;
    let engine = RiskEngine::new(config.wizard_config_path()).with_lint_on_load(config.lint_on_load);

    let request = read_request()?;
    let output = evaluate_value(&engine, request, explain)?;
    write_response(output)
}

/// Evaluates a JSON answer object with `engine`
pub fn evaluate_value(engine: &RiskEngine, request: Value, explain: bool) -> CliResult<Value> {
    if !request.is_object() {
        return Err(CliError::io_error("Answers must be a JSON object"));
    }
    let answers = AnswerSet::from_json(request);

    let output = if explain {
        serde_json::to_value(engine.evaluate_traced(&answers)?)?
    } else {
        serde_json::to_value(engine.evaluate(&answers)?)?
    };
    Ok(output)
}

/// Load the rule table and report lint warnings
pub fn lint(config_path: &Path) -> CliResult<()> {
    let config = load_config(config_path)?;
    let engine = RiskEngine::new(config.wizard_config_path()).with_lint_on_load(false);
    write_response(lint_report(&engine)?)
}

/// Builds the lint report for `engine`
pub fn lint_report(engine: &RiskEngine) -> CliResult<Value> {
    let loaded = engine.loaded()?;
    let warnings = engine.lint()?;

    Ok(json!({
        "source": loaded.source,
        "fingerprint": loaded.fingerprint,
        "rules": loaded.table.rules().len(),
        "warnings": warnings,
    }))
}
