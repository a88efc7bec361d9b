//! Rule table types
//!
//! Mirrors the result step of the wizard configuration:
//!
//! ```json
//! { "rules": [ { "if": { "q1": "not_empty" }, "classification": "alto", "justification": "..." } ],
//!   "default": { "classification": "minimo", "justification": "..." } }
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::answers::AnswerValue;

/// Sentinel string that selects the non-empty check in a condition
pub const NOT_EMPTY_SENTINEL: &str = "not_empty";

/// Classification used when a rule or default omits one
pub const FALLBACK_CLASSIFICATION: &str = "limitado";

/// Expected-value description for one question inside a rule.
#[derive(Debug, Clone, PartialEq)]
pub enum ConditionSpecifier {
    /// Answer must be present and non-empty
    NotEmpty,
    /// Answer must be one of these values, or a list sharing one of them
    AnyOf(Vec<AnswerValue>),
    /// Answer must equal this value exactly
    Exactly(AnswerValue),
}

impl ConditionSpecifier {
    /// Builds a specifier from its JSON form.
    ///
    /// Objects are rejected, also inside lists; every other shape is valid.
    pub fn from_json(value: Value) -> Result<Self, String> {
        match value {
            Value::String(s) if s == NOT_EMPTY_SENTINEL => Ok(ConditionSpecifier::NotEmpty),
            Value::Array(items) => {
                let values: Vec<AnswerValue> = items.into_iter().map(AnswerValue::from).collect();
                if values.iter().any(contains_malformed) {
                    return Err("condition specifier list must not contain objects".to_string());
                }
                Ok(ConditionSpecifier::AnyOf(values))
            }
            Value::Object(_) => Err("condition specifier must not be an object".to_string()),
            other => Ok(ConditionSpecifier::Exactly(AnswerValue::from(other))),
        }
    }
}

fn contains_malformed(value: &AnswerValue) -> bool {
    match value {
        AnswerValue::Malformed(_) => true,
        AnswerValue::List(items) => items.iter().any(contains_malformed),
        _ => false,
    }
}

impl fmt::Display for ConditionSpecifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // JSON form; serializing a specifier cannot fail
        let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        write!(f, "{}", json)
    }
}

impl Serialize for ConditionSpecifier {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ConditionSpecifier::NotEmpty => serializer.serialize_str(NOT_EMPTY_SENTINEL),
            ConditionSpecifier::AnyOf(values) => values.serialize(serializer),
            ConditionSpecifier::Exactly(value) => value.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for ConditionSpecifier {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        ConditionSpecifier::from_json(value).map_err(D::Error::custom)
    }
}

fn default_classification() -> String {
    FALLBACK_CLASSIFICATION.to_string()
}

/// Classification plus justification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    #[serde(default = "default_classification")]
    pub classification: String,
    #[serde(default)]
    pub justification: String,
}

impl Outcome {
    pub fn new(classification: impl Into<String>, justification: impl Into<String>) -> Self {
        Self {
            classification: classification.into(),
            justification: justification.into(),
        }
    }
}

/// One ordered classification rule.
///
/// All conditions must match (AND). An empty condition set matches every
/// answer set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    #[serde(rename = "if", default)]
    pub conditions: BTreeMap<String, ConditionSpecifier>,
    #[serde(flatten)]
    pub outcome: Outcome,
}

impl Rule {
    /// Creates a rule with no conditions
    pub fn new(classification: impl Into<String>, justification: impl Into<String>) -> Self {
        Self {
            conditions: BTreeMap::new(),
            outcome: Outcome::new(classification, justification),
        }
    }

    /// Adds a condition, builder style
    pub fn when(mut self, question_id: impl Into<String>, expected: ConditionSpecifier) -> Self {
        self.conditions.insert(question_id.into(), expected);
        self
    }

    /// Returns true if this rule matches every answer set
    pub fn is_catch_all(&self) -> bool {
        self.conditions.is_empty()
    }
}

/// The ordered rules and default outcome of a wizard.
///
/// Read-only after load. Rule order is the precedence order.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleTable {
    rules: Vec<Rule>,
    default: Outcome,
    /// Question ids declared by the wizard steps, empty when unknown
    declared_questions: BTreeSet<String>,
}

impl RuleTable {
    /// Creates a rule table from already-parsed rules
    pub fn new(rules: Vec<Rule>, default: Outcome) -> Self {
        Self {
            rules,
            default,
            declared_questions: BTreeSet::new(),
        }
    }

    /// Attaches the question ids declared by the wizard
    pub fn with_declared_questions(mut self, questions: BTreeSet<String>) -> Self {
        self.declared_questions = questions;
        self
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn default_outcome(&self) -> &Outcome {
        &self.default
    }

    pub fn declared_questions(&self) -> &BTreeSet<String> {
        &self.declared_questions
    }

    /// Every classification an evaluation can return, in first-seen order
    pub fn reachable_classifications(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        let outcomes = self
            .rules
            .iter()
            .map(|r| &r.outcome)
            .chain(std::iter::once(&self.default));
        for outcome in outcomes {
            let label = outcome.classification.as_str();
            if !seen.contains(&label) {
                seen.push(label);
            }
        }
        seen
    }
}
