//! Condition matching
//!
//! Evaluates one condition specifier against one submitted answer.
//! No type coercion, case-sensitive, never fails.

use crate::answers::AnswerValue;
use crate::rules::ConditionSpecifier;

/// Matches answers against condition specifiers
pub struct ConditionMatcher;

impl ConditionMatcher {
    /// Checks if `actual` satisfies `expected`
    pub fn matches(expected: &ConditionSpecifier, actual: &AnswerValue) -> bool {
        match expected {
            ConditionSpecifier::NotEmpty => Self::is_not_empty(actual),
            ConditionSpecifier::AnyOf(accepted) => Self::any_of_match(accepted, actual),
            ConditionSpecifier::Exactly(value) => actual == value,
        }
    }

    /// Present and non-empty.
    ///
    /// Empty means null, a blank string, an empty list or `false`.
    /// Numeric zero and malformed answers are present.
    pub fn is_not_empty(actual: &AnswerValue) -> bool {
        match actual {
            AnswerValue::Null => false,
            AnswerValue::Bool(b) => *b,
            AnswerValue::Number(_) => true,
            AnswerValue::String(s) => !s.trim().is_empty(),
            AnswerValue::List(items) => !items.is_empty(),
            AnswerValue::Malformed(_) => true,
        }
    }

    /// Membership for scalar answers, overlap for list answers
    fn any_of_match(accepted: &[AnswerValue], actual: &AnswerValue) -> bool {
        match actual {
            AnswerValue::List(items) => accepted.iter().any(|value| items.contains(value)),
            scalar => accepted.contains(scalar),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn answer(value: serde_json::Value) -> AnswerValue {
        AnswerValue::from(value)
    }

    fn any_of(values: serde_json::Value) -> ConditionSpecifier {
        ConditionSpecifier::from_json(values).unwrap()
    }

    #[test]
    fn test_not_empty_semantics() {
        let spec = ConditionSpecifier::NotEmpty;
        assert!(!ConditionMatcher::matches(&spec, &answer(json!(""))));
        assert!(ConditionMatcher::matches(&spec, &answer(json!("x"))));
        assert!(!ConditionMatcher::matches(&spec, &answer(json!([]))));
        assert!(ConditionMatcher::matches(&spec, &answer(json!([1]))));
        assert!(!ConditionMatcher::matches(&spec, &answer(json!(false))));
        assert!(ConditionMatcher::matches(&spec, &answer(json!(true))));
        assert!(ConditionMatcher::matches(&spec, &answer(json!(0))));
        assert!(!ConditionMatcher::matches(&spec, &AnswerValue::Null));
    }

    #[test]
    fn test_not_empty_whitespace_string() {
        let spec = ConditionSpecifier::NotEmpty;
        assert!(!ConditionMatcher::matches(&spec, &answer(json!("   \t\n"))));
        assert!(ConditionMatcher::matches(&spec, &answer(json!(" a "))));
    }

    #[test]
    fn test_list_overlap() {
        let spec = any_of(json!(["a", "b"]));
        assert!(ConditionMatcher::matches(&spec, &answer(json!(["b", "c"]))));
        assert!(!ConditionMatcher::matches(&spec, &answer(json!(["c"]))));
        assert!(!ConditionMatcher::matches(&spec, &answer(json!([]))));
    }

    #[test]
    fn test_scalar_membership() {
        let spec = any_of(json!(["a", "b"]));
        assert!(ConditionMatcher::matches(&spec, &answer(json!("a"))));
        assert!(!ConditionMatcher::matches(&spec, &answer(json!("A"))));
        assert!(!ConditionMatcher::matches(&spec, &AnswerValue::Null));
    }

    #[test]
    fn test_empty_accepted_list_never_matches() {
        let spec = any_of(json!([]));
        assert!(!ConditionMatcher::matches(&spec, &answer(json!("a"))));
        assert!(!ConditionMatcher::matches(&spec, &answer(json!(["a"]))));
    }

    #[test]
    fn test_scalar_equality() {
        let spec = ConditionSpecifier::Exactly(AnswerValue::from("high"));
        assert!(ConditionMatcher::matches(&spec, &answer(json!("high"))));
        assert!(!ConditionMatcher::matches(&spec, &answer(json!("High"))));
        assert!(!ConditionMatcher::matches(&spec, &answer(json!(["high"]))));
    }

    #[test]
    fn test_no_type_coercion() {
        let spec = ConditionSpecifier::Exactly(AnswerValue::from(json!(1)));
        assert!(!ConditionMatcher::matches(&spec, &answer(json!("1"))));
        assert!(!ConditionMatcher::matches(&spec, &answer(json!(true))));
        assert!(ConditionMatcher::matches(&spec, &answer(json!(1))));
    }

    #[test]
    fn test_bool_equality() {
        let spec = ConditionSpecifier::Exactly(AnswerValue::Bool(false));
        assert!(ConditionMatcher::matches(&spec, &answer(json!(false))));
        assert!(!ConditionMatcher::matches(&spec, &AnswerValue::Null));
    }

    #[test]
    fn test_null_specifier_matches_missing() {
        let spec = ConditionSpecifier::Exactly(AnswerValue::Null);
        assert!(ConditionMatcher::matches(&spec, &AnswerValue::Null));
        assert!(!ConditionMatcher::matches(&spec, &answer(json!(""))));
    }

    #[test]
    fn test_malformed_answer_never_matches_value() {
        let malformed = answer(json!({"given": true, "by": "user"}));

        let null_spec = ConditionSpecifier::Exactly(AnswerValue::Null);
        assert!(!ConditionMatcher::matches(&null_spec, &malformed));

        let any_of_null = any_of(json!([null, "x"]));
        assert!(!ConditionMatcher::matches(&any_of_null, &malformed));
        assert!(!ConditionMatcher::matches(&any_of_null, &answer(json!([{"x": 1}]))));

        let exact = ConditionSpecifier::Exactly(AnswerValue::from("x"));
        assert!(!ConditionMatcher::matches(&exact, &answer(json!({"x": "x"}))));
    }

    #[test]
    fn test_malformed_answer_is_present() {
        let spec = ConditionSpecifier::NotEmpty;
        assert!(ConditionMatcher::matches(&spec, &answer(json!({"a": 1}))));
        assert!(ConditionMatcher::matches(&spec, &answer(json!({}))));
    }
}
