//! Risk engine
//!
//! Ties the lazily loaded rule table to the evaluator. This is the entry
//! point the HTTP layer and CLI call; the evaluator itself stays a plain
//! constructible value for tests and embedding.

use std::path::PathBuf;
use std::sync::Arc;

use crate::answers::AnswerSet;
use crate::evaluator::{EvaluationResult, RiskEvaluator, TracedEvaluation};
use crate::obligations::ObligationTable;
use crate::observability::{log_event_with_fields, Event};
use crate::rules::{self, LintWarning, LoadedRuleTable, RuleTableCache, RulesResult};

/// Lazily configured risk evaluation engine
#[derive(Debug)]
pub struct RiskEngine {
    cache: RuleTableCache,
    obligations: Arc<ObligationTable>,
    lint_on_load: bool,
}

impl RiskEngine {
    /// Creates an engine that loads `wizard_config` on first evaluation
    pub fn new(wizard_config: impl Into<PathBuf>) -> Self {
        Self {
            cache: RuleTableCache::new(wizard_config),
            obligations: Arc::new(ObligationTable::builtin()),
            lint_on_load: true,
        }
    }

    /// Creates an engine around an already loaded table
    pub fn preloaded(loaded: LoadedRuleTable) -> Self {
        Self {
            cache: RuleTableCache::preloaded(loaded),
            obligations: Arc::new(ObligationTable::builtin()),
            lint_on_load: false,
        }
    }

    /// Replaces the obligation table
    pub fn with_obligations(mut self, obligations: ObligationTable) -> Self {
        self.obligations = Arc::new(obligations);
        self
    }

    /// Enables or disables lint logging when the table is first loaded
    pub fn with_lint_on_load(mut self, enabled: bool) -> Self {
        self.lint_on_load = enabled;
        self
    }

    /// Returns the loaded table, loading it on first use
    pub fn loaded(&self) -> RulesResult<Arc<LoadedRuleTable>> {
        let lint_on_load = self.lint_on_load;
        let obligations = &self.obligations;
        self.cache.get_or_load_with(|loaded| {
            if lint_on_load {
                let warnings = rules::lint(&loaded.table, obligations);
                rules::log_warnings(&loaded.source, &warnings);
            }
        })
    }

    /// Returns true once the rule table has been loaded
    pub fn is_loaded(&self) -> bool {
        self.cache.is_loaded()
    }

    /// Builds an evaluator over the loaded table
    pub fn evaluator(&self) -> RulesResult<RiskEvaluator> {
        let loaded = self.loaded()?;
        Ok(RiskEvaluator::with_obligations(
            Arc::clone(&loaded.table),
            Arc::clone(&self.obligations),
        ))
    }

    /// Evaluates `answers`
    pub fn evaluate(&self, answers: &AnswerSet) -> RulesResult<EvaluationResult> {
        self.evaluate_traced(answers).map(|traced| traced.result)
    }

    /// Evaluates `answers` and reports which rule matched
    pub fn evaluate_traced(&self, answers: &AnswerSet) -> RulesResult<TracedEvaluation> {
        let traced = self.evaluator()?.evaluate_traced(answers);

        let matched = traced.matched.label();
        let answer_count = answers.len().to_string();
        log_event_with_fields(
            Event::EvaluationComplete,
            &[
                ("answers", answer_count.as_str()),
                ("classification", traced.result.classification.as_str()),
                ("matched", matched.as_str()),
            ],
        );

        Ok(traced)
    }

    /// Runs the rule table lint on demand
    pub fn lint(&self) -> RulesResult<Vec<LintWarning>> {
        let loaded = self.loaded()?;
        Ok(rules::lint(&loaded.table, &self.obligations))
    }
}
