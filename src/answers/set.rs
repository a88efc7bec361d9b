//! Answer set submitted for one evaluation

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::value::AnswerValue;

static NULL_ANSWER: AnswerValue = AnswerValue::Null;

/// All answers submitted for one evaluation, keyed by question id.
///
/// Immutable once built. Lookups of unanswered questions return `Null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerSet {
    answers: BTreeMap<String, AnswerValue>,
}

impl AnswerSet {
    /// Creates an empty answer set
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an answer set from a JSON value.
    ///
    /// Anything other than an object yields an empty set.
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Object(map) => map
                .into_iter()
                .map(|(k, v)| (k, AnswerValue::from(v)))
                .collect(),
            _ => Self::default(),
        }
    }

    /// Adds an answer, builder style
    pub fn with(mut self, question_id: impl Into<String>, value: impl Into<AnswerValue>) -> Self {
        self.answers.insert(question_id.into(), value.into());
        self
    }

    /// Returns the answer for `question_id`, or `Null` when unanswered
    pub fn get(&self, question_id: &str) -> &AnswerValue {
        self.answers.get(question_id).unwrap_or(&NULL_ANSWER)
    }

    pub fn contains(&self, question_id: &str) -> bool {
        self.answers.contains_key(question_id)
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    /// Iterates answers in question id order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AnswerValue)> {
        self.answers.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl FromIterator<(String, AnswerValue)> for AnswerSet {
    fn from_iter<I: IntoIterator<Item = (String, AnswerValue)>>(iter: I) -> Self {
        Self {
            answers: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_answer_is_null() {
        let answers = AnswerSet::new().with("q1", "yes");
        assert!(answers.get("q2").is_null());
        assert!(!answers.contains("q2"));
        assert_eq!(answers.get("q1"), &AnswerValue::from("yes"));
    }

    #[test]
    fn test_from_json_object() {
        let answers = AnswerSet::from_json(json!({"region": "EU", "uses": ["a", "b"]}));
        assert_eq!(answers.len(), 2);
        assert_eq!(answers.get("region"), &AnswerValue::from("EU"));
        assert_eq!(answers.get("uses").as_list().map(|l| l.len()), Some(2));
    }

    #[test]
    fn test_from_json_non_object_is_empty() {
        assert!(AnswerSet::from_json(json!(["q1"])).is_empty());
        assert!(AnswerSet::from_json(json!(null)).is_empty());
    }

    #[test]
    fn test_deserialize_transparent() {
        let answers: AnswerSet = serde_json::from_str(r#"{"q1": true, "q2": {"x": 1}}"#).unwrap();
        assert_eq!(answers.get("q1"), &AnswerValue::Bool(true));
        assert!(answers.get("q2").is_malformed());
        assert!(answers.contains("q2"));
    }
}
