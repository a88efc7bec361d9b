//! Rule table loader
//!
//! Reads the wizard configuration document and extracts the result step: the
//! single step that carries both a `rules` list and a `default` outcome.
//!
//! - Steps are read from `wizard.steps`, or from a top-level `steps`
//! - The first step with both keys wins; extra ones are logged
//! - Any failure is a FATAL `ConfigurationError`

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde_json::{Map, Value};
use sha2::{Digest, Sha256};

use super::errors::{ConfigurationError, RulesResult};
use super::types::{Outcome, Rule, RuleTable};
use crate::observability::{log_event_with_fields, Event};

/// Source name used for documents that did not come from a file
pub const IN_MEMORY_SOURCE: &str = "<in-memory>";

/// A rule table together with the document it came from
#[derive(Debug, Clone)]
pub struct LoadedRuleTable {
    /// Parsed rules and default outcome
    pub table: Arc<RuleTable>,
    /// The full wizard document, served back to clients unchanged
    pub document: Value,
    /// Hex SHA-256 of the source bytes
    pub fingerprint: String,
    /// File path or `<in-memory>`
    pub source: String,
}

/// Loads rule tables from wizard configuration documents
pub struct RuleTableLoader;

impl RuleTableLoader {
    /// Loads the rule table from a JSON file.
    pub fn load_from_path(path: &Path) -> RulesResult<LoadedRuleTable> {
        let source = path.display().to_string();

        let bytes = fs::read(path).map_err(|e| ConfigurationError::unreadable(&source, e))?;

        let document: Value = serde_json::from_slice(&bytes).map_err(|e| {
            ConfigurationError::malformed(&source, format!("Invalid JSON: {}", e))
        })?;

        Self::build(source, document, fingerprint(&bytes))
    }

    /// Loads the rule table from an already-parsed document.
    pub fn from_document(document: Value) -> RulesResult<LoadedRuleTable> {
        let bytes = serde_json::to_vec(&document).map_err(|e| {
            ConfigurationError::malformed(
                IN_MEMORY_SOURCE,
                format!("Unserializable document: {}", e),
            )
        })?;
        Self::build(IN_MEMORY_SOURCE.to_string(), document, fingerprint(&bytes))
    }

    fn build(source: String, document: Value, fingerprint: String) -> RulesResult<LoadedRuleTable> {
        let table = Self::parse_table(&source, &document)?;

        let rule_count = table.rules().len().to_string();
        log_event_with_fields(
            Event::RuleTableLoaded,
            &[
                ("source", source.as_str()),
                ("rules", rule_count.as_str()),
                ("default", table.default_outcome().classification.as_str()),
                ("fingerprint", fingerprint.as_str()),
            ],
        );

        Ok(LoadedRuleTable {
            table: Arc::new(table),
            document,
            fingerprint,
            source,
        })
    }

    /// Extracts the rule table from a wizard document.
    pub fn parse_table(source: &str, document: &Value) -> RulesResult<RuleTable> {
        let steps = Self::steps(document);

        let mut result_steps = steps
            .iter()
            .filter_map(Value::as_object)
            .filter(|step| step.contains_key("rules") && step.contains_key("default"));

        let step = result_steps
            .next()
            .ok_or_else(|| ConfigurationError::result_step_missing(source))?;

        let extra = result_steps.count();
        if extra > 0 {
            let ignored = extra.to_string();
            log_event_with_fields(
                Event::ResultStepDuplicate,
                &[
                    ("source", source),
                    ("ignored_steps", ignored.as_str()),
                    ("used_step", step_id(step)),
                ],
            );
        }

        let rules: Vec<Rule> = serde_json::from_value(step["rules"].clone()).map_err(|e| {
            ConfigurationError::malformed(
                source,
                format!("Invalid rules in step '{}': {}", step_id(step), e),
            )
        })?;

        let default: Outcome = serde_json::from_value(step["default"].clone()).map_err(|e| {
            ConfigurationError::malformed(
                source,
                format!("Invalid default in step '{}': {}", step_id(step), e),
            )
        })?;

        Ok(RuleTable::new(rules, default).with_declared_questions(declared_questions(steps)))
    }

    fn steps(document: &Value) -> &[Value] {
        document
            .get("wizard")
            .and_then(|wizard| wizard.get("steps"))
            .or_else(|| document.get("steps"))
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

fn step_id(step: &Map<String, Value>) -> &str {
    step.get("id").and_then(Value::as_str).unwrap_or("<unnamed>")
}

/// Collects every question id declared in any step, including conditional
/// follow-up questions.
fn declared_questions(steps: &[Value]) -> BTreeSet<String> {
    let mut ids = BTreeSet::new();
    for step in steps {
        let questions = step
            .get("questions")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[]);
        for question in questions {
            collect_question(question, &mut ids);
        }
    }
    ids
}

fn collect_question(question: &Value, ids: &mut BTreeSet<String>) {
    if let Some(id) = question.get("id").and_then(Value::as_str) {
        ids.insert(id.to_string());
    }
    if let Some(nested) = question.get("conditional").and_then(|c| c.get("question")) {
        collect_question(nested, ids);
    }
}

fn fingerprint(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hasher
        .finalize()
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect()
}
