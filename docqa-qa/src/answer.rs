//! Answer data type, confidence derivation, and the JSON hand-off format.

use serde::{Deserialize, Serialize};

/// The exact string an answer generator returns when the context does not
/// contain an answer.
///
/// Comparison against the sentinel is byte-for-byte: case-sensitive, with no
/// trimming beyond what the provider applies to the model output itself.
pub const NO_ANSWER_SENTINEL: &str = "Data Not Available";

/// An answered question. Produced per request, never stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Answer {
    /// The question as asked.
    pub question: String,
    /// The generated answer text.
    pub answer: String,
    /// `1.0` unless the answer is the [`NO_ANSWER_SENTINEL`], then `0.0`.
    pub confidence: f32,
}

impl Answer {
    /// Build an `Answer` from a question and generated text, deriving the
    /// confidence from the text.
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        let answer = answer.into();
        let confidence = confidence_for(&answer);
        Self {
            question: question.into(),
            answer,
            confidence,
        }
    }
}

/// Derive the confidence score for a generated answer text.
pub fn confidence_for(answer: &str) -> f32 {
    if answer == NO_ANSWER_SENTINEL { 0.0 } else { 1.0 }
}

/// Render an ordered sequence of answers as pretty-printed JSON.
///
/// This is the hand-off format to presentation layers: one
/// `{question, answer, confidence}` object per question, in question order.
pub fn answers_to_json(answers: &[Answer]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(answers)
}
