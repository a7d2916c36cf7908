//! Error types for the `docqa-rag` crate.

use thiserror::Error;

/// Errors that can occur in retrieval operations.
#[derive(Debug, Error)]
pub enum RetrievalError {
    /// Chunker or index parameters are inconsistent.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// An error occurred in the embedding provider.
    #[error("Embedding provider error ({provider}): {message}")]
    Embedding {
        /// The embedding provider that produced the error.
        provider: String,
        /// A description of the failure.
        message: String,
    },

    /// Retrieval was attempted before any document was ingested.
    #[error("Index is empty: ingest a document before retrieving context")]
    EmptyIndex,

    /// The input document could not produce a usable result.
    #[error("Malformed input: {0}")]
    MalformedInput(String),
}

/// A convenience result type for retrieval operations.
pub type Result<T> = std::result::Result<T, RetrievalError>;
