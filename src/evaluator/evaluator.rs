//! Rule evaluation
//!
//! First-match-wins over the ordered rule list, default outcome otherwise.
//!
//! # Execution Flow (strict order)
//!
//! 1. Walk rules in declaration order
//! 2. A rule matches only if every condition matches (AND)
//! 3. Return the first matching rule's outcome
//! 4. Otherwise return the default outcome
//! 5. Attach obligations for the resulting classification
//!
//! Evaluation is pure: same table and answers, same result.

use std::sync::Arc;

use super::matcher::ConditionMatcher;
use super::result::{EvaluationResult, MatchSource, TracedEvaluation};
use crate::answers::AnswerSet;
use crate::obligations::ObligationTable;
use crate::rules::{Outcome, Rule, RuleTable};

/// Evaluates answer sets against a loaded rule table
#[derive(Debug, Clone)]
pub struct RiskEvaluator {
    table: Arc<RuleTable>,
    obligations: Arc<ObligationTable>,
}

impl RiskEvaluator {
    /// Creates an evaluator with the built-in obligation table
    pub fn new(table: impl Into<Arc<RuleTable>>) -> Self {
        Self::with_obligations(table, ObligationTable::builtin())
    }

    /// Creates an evaluator with a custom obligation table
    pub fn with_obligations(
        table: impl Into<Arc<RuleTable>>,
        obligations: impl Into<Arc<ObligationTable>>,
    ) -> Self {
        Self {
            table: table.into(),
            obligations: obligations.into(),
        }
    }

    pub fn rule_table(&self) -> &RuleTable {
        &self.table
    }

    pub fn obligation_table(&self) -> &ObligationTable {
        &self.obligations
    }

    /// Evaluates `answers` and returns the classification result
    pub fn evaluate(&self, answers: &AnswerSet) -> EvaluationResult {
        self.evaluate_traced(answers).result
    }

    /// Evaluates `answers` and reports which rule produced the result
    pub fn evaluate_traced(&self, answers: &AnswerSet) -> TracedEvaluation {
        let (outcome, matched) = match self.first_match(answers) {
            Some(index) => (&self.table.rules()[index].outcome, MatchSource::Rule { index }),
            None => (self.table.default_outcome(), MatchSource::Default),
        };

        TracedEvaluation {
            result: self.resolve(outcome),
            matched,
        }
    }

    /// Index of the first rule whose conditions all match
    pub fn first_match(&self, answers: &AnswerSet) -> Option<usize> {
        self.table
            .rules()
            .iter()
            .position(|rule| Self::rule_matches(rule, answers))
    }

    /// Checks if every condition of `rule` matches (AND semantics)
    pub fn rule_matches(rule: &Rule, answers: &AnswerSet) -> bool {
        rule.conditions
            .iter()
            .all(|(question_id, expected)| ConditionMatcher::matches(expected, answers.get(question_id)))
    }

    fn resolve(&self, outcome: &Outcome) -> EvaluationResult {
        EvaluationResult {
            classification: outcome.classification.clone(),
            justification: outcome.justification.clone(),
            obligations: self.obligations.obligations_for(&outcome.classification),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::answers::AnswerValue;
    use crate::rules::ConditionSpecifier;

    fn scenario_table() -> RuleTable {
        RuleTable::new(
            vec![Rule::new("alto", "J1").when("q1", ConditionSpecifier::NotEmpty)],
            Outcome::new("minimo", "D"),
        )
    }

    fn region_table() -> RuleTable {
        RuleTable::new(
            vec![
                Rule::new("alto", "listed region").when(
                    "region",
                    ConditionSpecifier::AnyOf(vec![AnswerValue::from("EU"), AnswerValue::from("US")]),
                ),
                Rule::new("limitado", "catch-all"),
            ],
            Outcome::new("minimo", "D"),
        )
    }

    #[test]
    fn test_rule_match() {
        let evaluator = RiskEvaluator::new(scenario_table());
        let result = evaluator.evaluate(&AnswerSet::new().with("q1", "yes"));

        assert_eq!(result.classification, "alto");
        assert_eq!(result.justification, "J1");
        assert_eq!(result.obligations.len(), 5);
    }

    #[test]
    fn test_default_fallback() {
        let evaluator = RiskEvaluator::new(scenario_table());
        let traced = evaluator.evaluate_traced(&AnswerSet::new());

        assert_eq!(traced.matched, MatchSource::Default);
        assert_eq!(traced.result.classification, "minimo");
        assert_eq!(traced.result.justification, "D");
        assert_eq!(traced.result.obligations.len(), 3);
    }

    #[test]
    fn test_catch_all_after_specific_rule() {
        let evaluator = RiskEvaluator::new(region_table());

        let eu = evaluator.evaluate_traced(&AnswerSet::new().with("region", "EU"));
        assert_eq!(eu.matched, MatchSource::Rule { index: 0 });
        assert_eq!(eu.result.classification, "alto");

        let jp = evaluator.evaluate_traced(&AnswerSet::new().with("region", "JP"));
        assert_eq!(jp.matched, MatchSource::Rule { index: 1 });
        assert_eq!(jp.result.classification, "limitado");
    }

    #[test]
    fn test_all_conditions_required() {
        let table = RuleTable::new(
            vec![Rule::new("alto", "")
                .when("a", ConditionSpecifier::NotEmpty)
                .when("b", ConditionSpecifier::Exactly(AnswerValue::Bool(true)))],
            Outcome::new("minimo", ""),
        );
        let evaluator = RiskEvaluator::new(table);

        let partial = AnswerSet::new().with("a", "x");
        assert_eq!(evaluator.first_match(&partial), None);

        let full = AnswerSet::new().with("a", "x").with("b", true);
        assert_eq!(evaluator.first_match(&full), Some(0));
    }

    #[test]
    fn test_unknown_answers_ignored() {
        let evaluator = RiskEvaluator::new(scenario_table());
        let answers = AnswerSet::new().with("q1", "yes").with("unrelated", 42i64);
        assert_eq!(evaluator.evaluate(&answers).classification, "alto");
    }

    #[test]
    fn test_unknown_classification_has_no_obligations() {
        let table = RuleTable::new(vec![], Outcome::new("sin_clasificar", "none"));
        let result = RiskEvaluator::new(table).evaluate(&AnswerSet::new());
        assert_eq!(result.classification, "sin_clasificar");
        assert!(result.obligations.is_empty());
    }

    #[test]
    fn test_custom_obligations() {
        let obligations = ObligationTable::empty().with_entry("minimo", ["Nothing to do."]);
        let evaluator = RiskEvaluator::with_obligations(scenario_table(), obligations);
        let result = evaluator.evaluate(&AnswerSet::new());
        assert_eq!(result.obligations, vec!["Nothing to do.".to_string()]);
    }
}
