//! Evaluation result types

use serde::{Deserialize, Serialize};

/// The result of one evaluation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub classification: String,
    pub justification: String,
    /// Ordered obligations for the classification; empty when none are defined
    #[serde(default)]
    pub obligations: Vec<String>,
}

/// Which part of the rule table produced a result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum MatchSource {
    /// Zero-based index of the first matching rule
    Rule { index: usize },
    /// No rule matched
    Default,
}

impl MatchSource {
    /// Returns the rule index, if a rule matched
    pub fn rule_index(&self) -> Option<usize> {
        match self {
            MatchSource::Rule { index } => Some(*index),
            MatchSource::Default => None,
        }
    }

    /// Value for the `matched` log field
    pub fn label(&self) -> String {
        match self {
            MatchSource::Rule { index } => format!("rule:{}", index),
            MatchSource::Default => "default".to_string(),
        }
    }
}

/// A result together with the rule that produced it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TracedEvaluation {
    #[serde(flatten)]
    pub result: EvaluationResult,
    pub matched: MatchSource,
}
