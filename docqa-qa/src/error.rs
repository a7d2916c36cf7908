//! Error types for the `docqa-qa` crate.

use docqa_rag::RetrievalError;
use thiserror::Error;

/// Errors that can occur in question-answering operations.
#[derive(Debug, Error)]
pub enum QaError {
    /// An error occurred in the answer generator.
    #[error("Answer provider error ({provider}): {message}")]
    Answer {
        /// The answer provider that produced the error.
        provider: String,
        /// A description of the failure.
        message: String,
    },

    /// A configuration validation error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// An error propagated unchanged from the retrieval layer.
    ///
    /// Lets callers distinguish "no document loaded"
    /// ([`RetrievalError::EmptyIndex`]) from provider failures.
    #[error(transparent)]
    Retrieval(#[from] RetrievalError),
}

/// A convenience result type for question-answering operations.
pub type Result<T> = std::result::Result<T, QaError>;
