//! Observable events
//!
//! Events are explicit and typed. Each maps to one stable event name.

use std::fmt;

/// Observable events in riskwizard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Boot & Lifecycle
    /// Startup begins
    BootStart,
    /// Startup complete, ready to serve
    BootComplete,
    /// HTTP server listening
    Serving,
    /// Shutdown complete
    ShutdownComplete,

    // Configuration
    /// Service configuration loaded
    ConfigLoaded,
    /// Rule table parsed from the wizard configuration
    RuleTableLoaded,
    /// Rule table could not be loaded (FATAL)
    RuleTableLoadFailed,
    /// More than one step carries `rules` and `default`
    ResultStepDuplicate,
    /// Load-time lint finding
    LintWarning,

    // Evaluation
    /// Evaluation finished
    EvaluationComplete,
    /// Risk assessment recorded for a system
    AssessmentRecorded,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::BootStart => "RISKWIZARD_STARTUP_BEGIN",
            Event::BootComplete => "RISKWIZARD_STARTUP_COMPLETE",
            Event::Serving => "RISKWIZARD_SERVING",
            Event::ShutdownComplete => "SHUTDOWN_COMPLETE",

            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::RuleTableLoaded => "RULE_TABLE_LOADED",
            Event::RuleTableLoadFailed => "RULE_TABLE_LOAD_FAILED",
            Event::ResultStepDuplicate => "RESULT_STEP_DUPLICATE",
            Event::LintWarning => "LINT_WARNING",

            Event::EvaluationComplete => "EVALUATION_COMPLETE",
            Event::AssessmentRecorded => "ASSESSMENT_RECORDED",
        }
    }

    /// Returns true if this event indicates a fatal condition
    pub fn is_fatal(&self) -> bool {
        matches!(self, Event::RuleTableLoadFailed)
    }

    /// Returns true if this event indicates a recoverable issue
    pub fn is_warning(&self) -> bool {
        matches!(self, Event::ResultStepDuplicate | Event::LintWarning)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
