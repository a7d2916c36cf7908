//! # docqa-rag
//!
//! Retrieval core for the docqa document question-answering pipeline:
//! word-boundary chunking, a pluggable embedding provider contract, and an
//! in-memory vector index with cosine-similarity context selection.
//!
//! ## Overview
//!
//! A document is split into overlapping chunks, each chunk is embedded via an
//! [`EmbeddingProvider`], and the `(chunk, embedding)` pairs are held in a
//! [`VectorIndex`] in insertion order. At query time the index embeds the
//! question, scores every stored chunk by cosine similarity, and returns the
//! top-scoring chunks joined back together in document order as a context
//! string for a downstream language model.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use docqa_rag::{Chunker, VectorIndex, WordBoundaryChunker};
//!
//! let chunker = WordBoundaryChunker::new(1000, 200)?;
//! let index = VectorIndex::new(Arc::new(my_embedder));
//!
//! index.add(chunker.split(&document_text)).await?;
//! let context = index.retrieve_context("What is the refund policy?", 6).await?;
//! ```
//!
//! The `openai` feature adds [`openai::OpenAIEmbeddingProvider`], backed by
//! the OpenAI embeddings API.

pub mod chunking;
pub mod document;
pub mod embedding;
pub mod error;
pub mod index;

#[cfg(feature = "openai")]
pub mod openai;

pub use chunking::{Chunker, WordBoundaryChunker};
pub use document::{Chunk, ScoredChunk};
pub use embedding::EmbeddingProvider;
pub use error::{Result, RetrievalError};
pub use index::{DEFAULT_EMBED_BATCH_SIZE, DEFAULT_TOP_K, VectorIndex};
