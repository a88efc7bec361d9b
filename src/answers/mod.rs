//! Questionnaire answers
//!
//! Answers arrive as untyped JSON from the wizard. They are converted once,
//! at the boundary, into a closed set of variants so the condition matcher
//! can branch exhaustively.
//!
//! Malformed answers never raise. A JSON object is not a valid answer shape:
//! it is kept as `Malformed`, counts as present for the non-empty check and
//! never equals an expected value.

mod set;
mod value;

pub use set::AnswerSet;
pub use value::AnswerValue;
