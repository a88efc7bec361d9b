//! Load-time rule table lint
//!
//! Findings are warnings only. Runtime precedence is never changed: a rule
//! reported as shadowed still sits at its declared position.

use std::fmt;

use serde::Serialize;

use super::types::RuleTable;
use crate::obligations::ObligationTable;
use crate::observability::{log_event_with_fields, Event};

/// One lint finding. Rule indexes are zero-based declaration positions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LintWarning {
    /// Every answer set matching `later` also matches `earlier`
    ShadowedRule { earlier: usize, later: usize },
    /// A catch-all rule makes the default outcome unreachable
    UnreachableDefault { rule: usize },
    /// A reachable classification has no obligation entry
    MissingObligations { classification: String },
    /// A condition names a question no step declares
    UnknownQuestion { rule: usize, question_id: String },
}

impl LintWarning {
    /// Stable kind name used in log fields
    pub fn kind(&self) -> &'static str {
        match self {
            LintWarning::ShadowedRule { .. } => "shadowed_rule",
            LintWarning::UnreachableDefault { .. } => "unreachable_default",
            LintWarning::MissingObligations { .. } => "missing_obligations",
            LintWarning::UnknownQuestion { .. } => "unknown_question",
        }
    }
}

impl fmt::Display for LintWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LintWarning::ShadowedRule { earlier, later } => write!(
                f,
                "rule {} can never match: rule {} matches every answer set it does",
                later, earlier
            ),
            LintWarning::UnreachableDefault { rule } => {
                write!(f, "default outcome is unreachable: rule {} has no conditions", rule)
            }
            LintWarning::MissingObligations { classification } => write!(
                f,
                "classification '{}' has no obligations defined",
                classification
            ),
            LintWarning::UnknownQuestion { rule, question_id } => write!(
                f,
                "rule {} references undeclared question '{}'",
                rule, question_id
            ),
        }
    }
}

/// Runs every check against `table`
pub fn lint(table: &RuleTable, obligations: &ObligationTable) -> Vec<LintWarning> {
    let mut warnings = shadowed_rules(table);
    warnings.extend(unreachable_default(table));
    warnings.extend(missing_obligations(table, obligations));
    warnings.extend(unknown_questions(table));
    warnings
}

/// Logs each warning as a `LINT_WARNING` event
pub fn log_warnings(source: &str, warnings: &[LintWarning]) {
    for warning in warnings {
        let message = warning.to_string();
        log_event_with_fields(
            Event::LintWarning,
            &[
                ("kind", warning.kind()),
                ("message", message.as_str()),
                ("source", source),
            ],
        );
    }
}

/// Reports each later rule once, against the first earlier rule whose
/// condition set is a subset of its own.
fn shadowed_rules(table: &RuleTable) -> Vec<LintWarning> {
    let rules = table.rules();
    let mut warnings = Vec::new();

    for (later, later_rule) in rules.iter().enumerate() {
        let shadowing = rules[..later].iter().position(|earlier_rule| {
            earlier_rule
                .conditions
                .iter()
                .all(|(question_id, expected)| later_rule.conditions.get(question_id) == Some(expected))
        });
        if let Some(earlier) = shadowing {
            warnings.push(LintWarning::ShadowedRule { earlier, later });
        }
    }

    warnings
}

fn unreachable_default(table: &RuleTable) -> Option<LintWarning> {
    table
        .rules()
        .iter()
        .position(|rule| rule.is_catch_all())
        .map(|rule| LintWarning::UnreachableDefault { rule })
}

fn missing_obligations(table: &RuleTable, obligations: &ObligationTable) -> Vec<LintWarning> {
    table
        .reachable_classifications()
        .into_iter()
        .filter(|label| !obligations.has_entry(label))
        .map(|label| LintWarning::MissingObligations {
            classification: label.to_string(),
        })
        .collect()
}

/// Skipped when the document declares no questions at all.
fn unknown_questions(table: &RuleTable) -> Vec<LintWarning> {
    let declared = table.declared_questions();
    if declared.is_empty() {
        return Vec::new();
    }

    table
        .rules()
        .iter()
        .enumerate()
        .flat_map(|(rule, r)| {
            r.conditions
                .keys()
                .filter(|id| !declared.contains(id.as_str()))
                .map(move |id| LintWarning::UnknownQuestion {
                    rule,
                    question_id: id.clone(),
                })
        })
        .collect()
}
