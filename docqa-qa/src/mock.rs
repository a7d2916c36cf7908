//! Mock answer generator for tests and demos.

use async_trait::async_trait;

use crate::answerer::AnswerGenerator;
use crate::error::Result;

/// An [`AnswerGenerator`] that returns a canned response.
///
/// Useful for deterministic tests and demos that run with zero API keys.
///
/// # Example
///
/// ```rust,ignore
/// use docqa_qa::MockAnswerGenerator;
///
/// let answerer = MockAnswerGenerator::new("ran");
/// assert_eq!(answerer.generate("What did the dog do?", "A dog ran.").await?, "ran");
/// ```
#[derive(Debug, Clone)]
pub struct MockAnswerGenerator {
    response: String,
}

impl MockAnswerGenerator {
    /// Create a mock that always returns `response`.
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
        }
    }
}

#[async_trait]
impl AnswerGenerator for MockAnswerGenerator {
    fn name(&self) -> &str {
        "mock"
    }

    async fn generate(&self, _question: &str, _context: &str) -> Result<String> {
        Ok(self.response.clone())
    }
}
