//! Answer generator contract.

use async_trait::async_trait;

use crate::error::Result;

/// A provider that generates a natural-language answer from a question and a
/// retrieved context string.
///
/// Implementations must follow the sentinel convention: when the context does
/// not contain an answer, return exactly
/// [`NO_ANSWER_SENTINEL`](crate::answer::NO_ANSWER_SENTINEL) so the
/// orchestrator can derive a zero confidence score.
#[async_trait]
pub trait AnswerGenerator: Send + Sync {
    /// A short name for this provider, used in logs and error messages.
    fn name(&self) -> &str;

    /// Generate an answer to `question` grounded in `context`.
    async fn generate(&self, question: &str, context: &str) -> Result<String>;
}
