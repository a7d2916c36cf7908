//! Data types for stored chunks and search results.

use serde::{Deserialize, Serialize};

/// An ordered substring of a source document.
///
/// Chunks are immutable once created and are owned by the [`VectorIndex`]
/// that stored them. `position` is the chunk's index in ingestion order and
/// pairs it with its embedding.
///
/// [`VectorIndex`]: crate::index::VectorIndex
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Chunk {
    /// The chunk's index in ingestion order.
    pub position: usize,
    /// The text content of the chunk.
    pub text: String,
}

/// A retrieved [`Chunk`] paired with its similarity score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredChunk {
    /// The retrieved chunk.
    pub chunk: Chunk,
    /// Cosine similarity against the query embedding (higher is more relevant).
    pub score: f32,
}
