//! Single answer value

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Number, Value};

/// A submitted answer.
///
/// Closed variant: every JSON shape a wizard question can produce maps onto
/// exactly one of these. Objects are not answer shapes and are kept as
/// `Malformed`, which is present but never equal to any expected value.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum AnswerValue {
    /// Absent or explicitly null
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    /// Multi-select answers
    List(Vec<AnswerValue>),
    /// An object submitted as an answer
    Malformed(Value),
}

impl AnswerValue {
    /// Returns true for `Null`
    pub fn is_null(&self) -> bool {
        matches!(self, AnswerValue::Null)
    }

    /// Returns true for an answer with no valid shape
    pub fn is_malformed(&self) -> bool {
        matches!(self, AnswerValue::Malformed(_))
    }

    /// Returns the list elements when this is a list answer
    pub fn as_list(&self) -> Option<&[AnswerValue]> {
        match self {
            AnswerValue::List(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the type name used in log fields and lint messages
    pub fn type_name(&self) -> &'static str {
        match self {
            AnswerValue::Null => "null",
            AnswerValue::Bool(_) => "bool",
            AnswerValue::Number(_) => "number",
            AnswerValue::String(_) => "string",
            AnswerValue::List(_) => "list",
            AnswerValue::Malformed(_) => "malformed",
        }
    }
}

/// Numbers compare by value so `1` and `1.0` are the same answer.
/// Integers are compared exactly before falling back to f64.
fn numbers_equal(a: &Number, b: &Number) -> bool {
    if let (Some(x), Some(y)) = (a.as_i64(), b.as_i64()) {
        return x == y;
    }
    if let (Some(x), Some(y)) = (a.as_u64(), b.as_u64()) {
        return x == y;
    }
    match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) => x == y,
        _ => false,
    }
}

/// Strict equality: no coercion across variants, case-sensitive strings.
/// `Malformed` equals nothing, itself included.
impl PartialEq for AnswerValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (AnswerValue::Null, AnswerValue::Null) => true,
            (AnswerValue::Bool(a), AnswerValue::Bool(b)) => a == b,
            (AnswerValue::Number(a), AnswerValue::Number(b)) => numbers_equal(a, b),
            (AnswerValue::String(a), AnswerValue::String(b)) => a == b,
            (AnswerValue::List(a), AnswerValue::List(b)) => a == b,
            _ => false,
        }
    }
}

impl From<Value> for AnswerValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => AnswerValue::Null,
            Value::Bool(b) => AnswerValue::Bool(b),
            Value::Number(n) => AnswerValue::Number(n),
            Value::String(s) => AnswerValue::String(s),
            Value::Array(items) => {
                AnswerValue::List(items.into_iter().map(AnswerValue::from).collect())
            }
            Value::Object(map) => AnswerValue::Malformed(Value::Object(map)),
        }
    }
}

impl From<&str> for AnswerValue {
    fn from(s: &str) -> Self {
        AnswerValue::String(s.to_string())
    }
}

impl From<bool> for AnswerValue {
    fn from(b: bool) -> Self {
        AnswerValue::Bool(b)
    }
}

impl From<i64> for AnswerValue {
    fn from(n: i64) -> Self {
        AnswerValue::Number(Number::from(n))
    }
}

// Goes through `Value` so that any JSON shape deserializes; the
// conversion above decides what survives.
impl<'de> Deserialize<'de> for AnswerValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer).map(AnswerValue::from)
    }
}
