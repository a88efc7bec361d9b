//! Rule table subsystem
//!
//! Loads the ordered classification rules and default outcome from the risk
//! wizard configuration, caches them for the life of the process, and lints
//! them at load time.
//!
//! # Invariants
//!
//! - Rule declaration order is preserved exactly; it is the precedence order
//! - The table is read-only after load
//! - A missing result step is FATAL and surfaces on first use

mod cache;
mod errors;
mod lint;
mod loader;
mod types;

pub use cache::RuleTableCache;
pub use errors::{ConfigurationError, ConfigurationErrorCode, RulesResult, Severity};
pub use lint::{lint, log_warnings, LintWarning};
pub use loader::{LoadedRuleTable, RuleTableLoader, IN_MEMORY_SOURCE};
pub use types::{
    ConditionSpecifier, Outcome, Rule, RuleTable, FALLBACK_CLASSIFICATION, NOT_EMPTY_SENTINEL,
};
