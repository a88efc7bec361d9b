//! Rule table configuration errors
//!
//! Error codes:
//! - RW_CONFIG_UNREADABLE (FATAL)
//! - RW_CONFIG_MALFORMED (FATAL)
//! - RW_RESULT_STEP_MISSING (FATAL)
//!
//! Configuration errors surface on first use. A failed load leaves the cache
//! empty, so the next caller tries again. The HTTP layer maps them to a 5xx
//! response.

use std::fmt;
use std::io;

/// Severity levels for configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The engine cannot evaluate anything until the configuration is fixed
    Fatal,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Fatal => write!(f, "FATAL"),
        }
    }
}

/// Configuration error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigurationErrorCode {
    /// Configuration file could not be read
    RwConfigUnreadable,
    /// Configuration is not valid JSON or has an invalid rule shape
    RwConfigMalformed,
    /// No step carries both `rules` and `default`
    RwResultStepMissing,
}

impl ConfigurationErrorCode {
    /// Returns the stable string code
    pub fn code(&self) -> &'static str {
        match self {
            ConfigurationErrorCode::RwConfigUnreadable => "RW_CONFIG_UNREADABLE",
            ConfigurationErrorCode::RwConfigMalformed => "RW_CONFIG_MALFORMED",
            ConfigurationErrorCode::RwResultStepMissing => "RW_RESULT_STEP_MISSING",
        }
    }

    /// Returns the severity level for this error
    pub fn severity(&self) -> Severity {
        Severity::Fatal
    }
}

impl fmt::Display for ConfigurationErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Configuration error with source location
#[derive(Debug)]
pub struct ConfigurationError {
    code: ConfigurationErrorCode,
    /// Path of the configuration resource, or `<in-memory>`
    source_name: String,
    message: String,
    cause: Option<io::Error>,
}

impl ConfigurationError {
    /// Create an unreadable-file error
    pub fn unreadable(source_name: impl Into<String>, cause: io::Error) -> Self {
        Self {
            code: ConfigurationErrorCode::RwConfigUnreadable,
            source_name: source_name.into(),
            message: "failed to read risk wizard configuration".to_string(),
            cause: Some(cause),
        }
    }

    /// Create a malformed-configuration error
    pub fn malformed(source_name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            code: ConfigurationErrorCode::RwConfigMalformed,
            source_name: source_name.into(),
            message: reason.into(),
            cause: None,
        }
    }

    /// Create a missing-result-step error
    pub fn result_step_missing(source_name: impl Into<String>) -> Self {
        Self {
            code: ConfigurationErrorCode::RwResultStepMissing,
            source_name: source_name.into(),
            message: "risk wizard configuration missing result step definition".to_string(),
            cause: None,
        }
    }

    /// Returns the error code
    pub fn code(&self) -> ConfigurationErrorCode {
        self.code
    }

    /// Returns the severity level
    pub fn severity(&self) -> Severity {
        self.code.severity()
    }

    /// Returns the configuration source this error refers to
    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Configuration errors are always fatal
    pub fn is_fatal(&self) -> bool {
        self.severity() == Severity::Fatal
    }
}

impl fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {} ({})",
            self.code.severity(),
            self.code.code(),
            self.message,
            self.source_name
        )?;
        if let Some(ref cause) = self.cause {
            write!(f, " (caused by: {})", cause)?;
        }
        Ok(())
    }
}

impl std::error::Error for ConfigurationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.cause
            .as_ref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

/// Result type for rule table operations
pub type RulesResult<T> = Result<T, ConfigurationError>;
