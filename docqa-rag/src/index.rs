//! In-memory vector index with cosine-similarity retrieval.
//!
//! [`VectorIndex`] owns the `(chunk, embedding)` pairs for one document
//! session, held in insertion order behind a `tokio::sync::RwLock`. Reads run
//! concurrently; `add` and `clear` take the write lock.

use std::cmp::Ordering;
use std::sync::Arc;

use futures::future;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::document::{Chunk, ScoredChunk};
use crate::embedding::EmbeddingProvider;
use crate::error::{Result, RetrievalError};

/// Default number of chunks selected per query.
pub const DEFAULT_TOP_K: usize = 6;

/// Default number of texts per embedding provider call.
pub const DEFAULT_EMBED_BATCH_SIZE: usize = 5;

/// The stored chunk and embedding collections.
///
/// Invariant: `chunks.len() == embeddings.len()`, and `chunks[i].position == i`.
/// Both collections are only ever extended together under the write lock.
#[derive(Debug, Default)]
struct IndexState {
    chunks: Vec<Chunk>,
    embeddings: Vec<Vec<f32>>,
}

/// An append-only in-memory store of chunks and their embeddings.
///
/// The index embeds chunk texts through its [`EmbeddingProvider`] on
/// [`add`](VectorIndex::add) and answers "most similar chunks" queries via
/// [`search`](VectorIndex::search) and
/// [`retrieve_context`](VectorIndex::retrieve_context). One index holds one
/// similarity space; callers that want one document at a time call
/// [`clear`](VectorIndex::clear) before re-ingesting.
///
/// # Example
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use docqa_rag::VectorIndex;
///
/// let index = VectorIndex::new(Arc::new(my_embedder));
/// index.add(chunk_texts).await?;
/// let context = index.retrieve_context("what changed in v2?", 6).await?;
/// ```
pub struct VectorIndex {
    embedder: Arc<dyn EmbeddingProvider>,
    embed_batch_size: usize,
    state: RwLock<IndexState>,
}

impl VectorIndex {
    /// Create a new empty index backed by the given embedding provider.
    pub fn new(embedder: Arc<dyn EmbeddingProvider>) -> Self {
        Self {
            embedder,
            embed_batch_size: DEFAULT_EMBED_BATCH_SIZE,
            state: RwLock::new(IndexState::default()),
        }
    }

    /// Set the number of texts sent to the provider per batch call.
    ///
    /// Values of zero are clamped to one.
    pub fn with_embed_batch_size(mut self, batch_size: usize) -> Self {
        self.embed_batch_size = batch_size.max(1);
        self
    }

    /// Number of chunks currently stored.
    pub async fn len(&self) -> usize {
        self.state.read().await.chunks.len()
    }

    /// Whether the index holds no chunks.
    pub async fn is_empty(&self) -> bool {
        self.state.read().await.chunks.is_empty()
    }

    /// Remove all stored chunks and embeddings.
    pub async fn clear(&self) {
        let mut state = self.state.write().await;
        state.chunks.clear();
        state.embeddings.clear();
    }

    /// Embed the given chunk texts and append them to the index.
    ///
    /// Texts are embedded in batches of the configured batch size; batches
    /// are dispatched concurrently but reassembled in order, so embedding `i`
    /// always pairs with chunk `i`. The append is atomic: nothing is stored
    /// until every batch has succeeded, so a provider failure leaves the
    /// index exactly as it was before the call.
    ///
    /// # Errors
    ///
    /// Returns [`RetrievalError::Embedding`] if any provider call fails or if
    /// the provider returns a vector count or dimensionality that does not
    /// match its contract.
    pub async fn add(&self, texts: Vec<String>) -> Result<()> {
        if texts.is_empty() {
            return Ok(());
        }

        debug!(
            provider = self.embedder.name(),
            chunk_count = texts.len(),
            batch_size = self.embed_batch_size,
            "embedding chunks"
        );

        let batch_results = {
            let refs: Vec<&str> = texts.iter().map(String::as_str).collect();
            let batches = refs
                .chunks(self.embed_batch_size)
                .map(|batch| self.embedder.embed_batch(batch));
            future::try_join_all(batches).await?
        };

        let mut embeddings = Vec::with_capacity(texts.len());
        for batch in batch_results {
            embeddings.extend(batch);
        }
        if embeddings.len() != texts.len() {
            return Err(self.contract_error(format!(
                "returned {} embeddings for {} inputs",
                embeddings.len(),
                texts.len()
            )));
        }
        for embedding in &embeddings {
            self.check_dimensions(embedding)?;
        }

        let mut state = self.state.write().await;
        let base = state.chunks.len();
        state
            .chunks
            .extend(texts.into_iter().enumerate().map(|(i, text)| Chunk {
                position: base + i,
                text,
            }));
        state.embeddings.extend(embeddings);

        info!(chunk_count = state.chunks.len() - base, total = state.chunks.len(), "indexed chunks");
        Ok(())
    }

    /// Return the `k` chunks most similar to `query`, highest score first.
    ///
    /// Ties are broken toward the earlier insertion position, so repeated
    /// calls with the same index and query return the same results. With
    /// `k >= len()` every stored chunk is returned.
    ///
    /// # Errors
    ///
    /// Returns [`RetrievalError::EmptyIndex`] if nothing has been ingested,
    /// or [`RetrievalError::Embedding`] if embedding the query fails.
    pub async fn search(&self, query: &str, k: usize) -> Result<Vec<ScoredChunk>> {
        if self.is_empty().await {
            return Err(RetrievalError::EmptyIndex);
        }

        let query_embedding = self.embedder.embed(query).await?;
        self.check_dimensions(&query_embedding)?;

        let state = self.state.read().await;
        let mut scored: Vec<ScoredChunk> = state
            .chunks
            .iter()
            .zip(&state.embeddings)
            .map(|(chunk, embedding)| ScoredChunk {
                chunk: chunk.clone(),
                score: cosine_similarity(&query_embedding, embedding),
            })
            .collect();

        scored.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(Ordering::Equal)
                .then(a.chunk.position.cmp(&b.chunk.position))
        });
        scored.truncate(k);
        Ok(scored)
    }

    /// Build a context string from the `k` chunks most similar to `query`.
    ///
    /// The selected chunks are joined with single spaces in insertion order
    /// (document order), not similarity order, so the context reads the way
    /// the source document does.
    ///
    /// # Errors
    ///
    /// Same as [`search`](VectorIndex::search).
    pub async fn retrieve_context(&self, query: &str, k: usize) -> Result<String> {
        let mut selected = self.search(query, k).await?;
        selected.sort_by_key(|s| s.chunk.position);

        let texts: Vec<&str> = selected.iter().map(|s| s.chunk.text.as_str()).collect();
        Ok(texts.join(" "))
    }

    fn check_dimensions(&self, embedding: &[f32]) -> Result<()> {
        let expected = self.embedder.dimensions();
        if embedding.len() != expected {
            return Err(self.contract_error(format!(
                "returned a {}-dimensional vector, expected {expected}",
                embedding.len()
            )));
        }
        Ok(())
    }

    fn contract_error(&self, message: String) -> RetrievalError {
        RetrievalError::Embedding {
            provider: self.embedder.name().to_string(),
            message,
        }
    }
}

impl std::fmt::Debug for VectorIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VectorIndex")
            .field("provider", &self.embedder.name())
            .field("embed_batch_size", &self.embed_batch_size)
            .finish_non_exhaustive()
    }
}

/// Compute cosine similarity between two vectors.
///
/// Defined as 0.0 when either vector has zero magnitude, so degenerate
/// embeddings score lowest instead of raising a division error.
fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}
