//! riskwizard - A deterministic AI Act risk-classification engine
//!
//! Maps risk-wizard questionnaire answers to a classification, a
//! justification and the regulatory obligations of that tier, using an
//! ordered rule table loaded from the wizard configuration.

pub mod answers;
pub mod cli;
pub mod engine;
pub mod evaluator;
pub mod http_server;
pub mod obligations;
pub mod observability;
pub mod rules;

pub use answers::{AnswerSet, AnswerValue};
pub use engine::RiskEngine;
pub use evaluator::{EvaluationResult, RiskEvaluator};
