//! Service configuration file
//!
//! ```json
//! {
//!   "wizard_config": "./config/risk-wizard.json",
//!   "http": { "host": "0.0.0.0", "port": 8000, "cors_origins": [] },
//!   "lint_on_load": true,
//!   "log_level": "info"
//! }
//! ```
//!
//! Only `wizard_config` is required. A relative `wizard_config` is resolved
//! against the directory holding the configuration file.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::errors::{CliError, CliResult};
use crate::http_server::HttpServerConfig;
use crate::observability::Severity;

/// Configuration file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the risk wizard document (required)
    pub wizard_config: String,

    /// HTTP server settings (optional)
    #[serde(default)]
    pub http: HttpServerConfig,

    /// Log lint warnings when the rule table loads (default: true)
    #[serde(default = "default_lint_on_load")]
    pub lint_on_load: bool,

    /// Lowest logged severity (default: "info")
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Directory of the configuration file
    #[serde(skip)]
    base_dir: PathBuf,
}

fn default_lint_on_load() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        let mut config = Self::from_json_str(&content)?;
        config.base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();

        Ok(config)
    }

    /// Parse and validate configuration text
    pub fn from_json_str(content: &str) -> CliResult<Self> {
        let config: Config = serde_json::from_str(content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> CliResult<()> {
        if self.wizard_config.trim().is_empty() {
            return Err(CliError::config_error("wizard_config must not be empty"));
        }

        if self.http.port == 0 {
            return Err(CliError::config_error("http.port must be > 0"));
        }

        self.severity()?;

        Ok(())
    }

    /// Parsed `log_level`
    pub fn severity(&self) -> CliResult<Severity> {
        Severity::parse(&self.log_level).ok_or_else(|| {
            CliError::config_error(format!(
                "Invalid log_level: '{}'. Must be one of trace, info, warn, error, fatal.",
                self.log_level
            ))
        })
    }

    /// Resolved path of the wizard document
    pub fn wizard_config_path(&self) -> PathBuf {
        let path = Path::new(&self.wizard_config);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }
}
