//! Risk evaluation subsystem
//!
//! Maps an answer set to a classification, justification and obligations
//! using a loaded rule table.
//!
//! # Invariants
//!
//! - First match wins; declaration order is precedence
//! - A rule matches only when all of its conditions match
//! - No rule matches: default outcome
//! - Malformed or missing answers never raise
//! - Deterministic: no hidden state, no randomness

mod evaluator;
mod matcher;
mod result;

pub use evaluator::RiskEvaluator;
pub use matcher::ConditionMatcher;
pub use result::{EvaluationResult, MatchSource, TracedEvaluation};
