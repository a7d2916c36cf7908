//! QA session orchestration.
//!
//! [`QaSession`] composes the chunker, vector index, and answer generator
//! into the two user-facing operations: ingest a document and answer
//! questions about it. A session is an explicit value with caller-owned
//! lifecycle; concurrent independent sessions are just independent values,
//! each with its own index.

use std::sync::Arc;

use docqa_rag::{Chunker, EmbeddingProvider, RetrievalError, VectorIndex, WordBoundaryChunker};
use tracing::{error, info};

use crate::answer::Answer;
use crate::answerer::AnswerGenerator;
use crate::error::{QaError, Result};

/// What [`QaSession::ingest`] does with chunks from a previous document.
///
/// One index holds one similarity space, so appending a second document mixes
/// both documents into every retrieval. The policy makes that choice explicit
/// instead of silently accumulating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IngestPolicy {
    /// Discard previously ingested chunks before indexing the new document
    /// (one document per session).
    #[default]
    Replace,
    /// Keep previously ingested chunks and append the new document's chunks
    /// (a deliberate multi-document corpus).
    Append,
}

/// Configuration parameters for a [`QaSession`].
#[derive(Debug, Clone, PartialEq)]
pub struct QaConfig {
    /// Maximum chunk size in characters.
    pub chunk_size: usize,
    /// Number of overlapping characters between consecutive chunks.
    pub chunk_overlap: usize,
    /// Number of chunks retrieved as context per question.
    pub top_k: usize,
    /// Number of chunk texts per embedding provider call.
    pub embed_batch_size: usize,
    /// How re-ingestion treats previously ingested chunks.
    pub ingest_policy: IngestPolicy,
}

impl Default for QaConfig {
    fn default() -> Self {
        Self {
            chunk_size: WordBoundaryChunker::DEFAULT_CHUNK_SIZE,
            chunk_overlap: WordBoundaryChunker::DEFAULT_OVERLAP,
            top_k: docqa_rag::DEFAULT_TOP_K,
            embed_batch_size: docqa_rag::DEFAULT_EMBED_BATCH_SIZE,
            ingest_policy: IngestPolicy::Replace,
        }
    }
}

impl QaConfig {
    /// Create a new builder for constructing a [`QaConfig`].
    pub fn builder() -> QaConfigBuilder {
        QaConfigBuilder::default()
    }
}

/// Builder for constructing a validated [`QaConfig`].
#[derive(Debug, Clone, Default)]
pub struct QaConfigBuilder {
    config: QaConfig,
}

impl QaConfigBuilder {
    /// Set the maximum chunk size in characters.
    pub fn chunk_size(mut self, size: usize) -> Self {
        self.config.chunk_size = size;
        self
    }

    /// Set the overlap between consecutive chunks in characters.
    pub fn chunk_overlap(mut self, overlap: usize) -> Self {
        self.config.chunk_overlap = overlap;
        self
    }

    /// Set the number of chunks retrieved as context per question.
    pub fn top_k(mut self, k: usize) -> Self {
        self.config.top_k = k;
        self
    }

    /// Set the number of chunk texts per embedding provider call.
    pub fn embed_batch_size(mut self, batch_size: usize) -> Self {
        self.config.embed_batch_size = batch_size;
        self
    }

    /// Set the re-ingestion policy.
    pub fn ingest_policy(mut self, policy: IngestPolicy) -> Self {
        self.config.ingest_policy = policy;
        self
    }

    /// Build the [`QaConfig`], validating that parameters are consistent.
    ///
    /// # Errors
    ///
    /// Returns [`QaError::Config`] if:
    /// - `chunk_overlap >= chunk_size`
    /// - `top_k == 0`
    /// - `embed_batch_size == 0`
    pub fn build(self) -> Result<QaConfig> {
        if self.config.chunk_overlap >= self.config.chunk_size {
            return Err(QaError::Config(format!(
                "chunk_overlap ({}) must be less than chunk_size ({})",
                self.config.chunk_overlap, self.config.chunk_size
            )));
        }
        if self.config.top_k == 0 {
            return Err(QaError::Config("top_k must be greater than zero".into()));
        }
        if self.config.embed_batch_size == 0 {
            return Err(QaError::Config(
                "embed_batch_size must be greater than zero".into(),
            ));
        }
        Ok(self.config)
    }
}

/// A document question-answering session.
///
/// Owns one [`VectorIndex`] plus the chunker and answer generator used with
/// it. Construct one via [`QaSession::builder()`].
///
/// # Example
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use docqa_qa::{QaConfig, QaSession};
///
/// let session = QaSession::builder()
///     .config(QaConfig::default())
///     .embedding_provider(Arc::new(embedder))
///     .answer_generator(Arc::new(answerer))
///     .build()?;
///
/// session.ingest(&text).await?;
/// let answer = session.answer("Who signed the contract?").await?;
/// ```
pub struct QaSession {
    config: QaConfig,
    chunker: Arc<dyn Chunker>,
    index: VectorIndex,
    answerer: Arc<dyn AnswerGenerator>,
}

impl QaSession {
    /// Create a new [`QaSessionBuilder`].
    pub fn builder() -> QaSessionBuilder {
        QaSessionBuilder::default()
    }

    /// Return a reference to the session configuration.
    pub fn config(&self) -> &QaConfig {
        &self.config
    }

    /// Return a reference to the session's vector index.
    pub fn index(&self) -> &VectorIndex {
        &self.index
    }

    /// Chunk a document's text and index it for retrieval.
    ///
    /// With [`IngestPolicy::Replace`] (the default) the index is cleared
    /// first, so the session holds exactly one document; with
    /// [`IngestPolicy::Append`] the new chunks are added to the existing
    /// corpus. Returns the number of chunks indexed.
    ///
    /// # Errors
    ///
    /// Returns [`RetrievalError::MalformedInput`] (wrapped in
    /// [`QaError::Retrieval`]) if the text produces no chunks, or the
    /// chunker/index error unchanged.
    pub async fn ingest(&self, text: &str) -> Result<usize> {
        let chunks = self.chunker.split(text);
        if chunks.is_empty() {
            return Err(QaError::Retrieval(RetrievalError::MalformedInput(
                "document text produced no chunks".into(),
            )));
        }

        if self.config.ingest_policy == IngestPolicy::Replace {
            self.index.clear().await;
        }

        let chunk_count = chunks.len();
        self.index.add(chunks).await?;

        info!(chunk_count, policy = ?self.config.ingest_policy, "ingested document");
        Ok(chunk_count)
    }

    /// Answer a single question against the ingested document.
    ///
    /// Retrieves the `top_k` most relevant chunks as context, asks the answer
    /// generator, and derives the confidence from the answer text.
    ///
    /// # Errors
    ///
    /// Returns [`RetrievalError::EmptyIndex`] (wrapped) if no document has
    /// been ingested, or the embedding/answer provider error unchanged.
    pub async fn answer(&self, question: &str) -> Result<Answer> {
        let context = self
            .index
            .retrieve_context(question, self.config.top_k)
            .await?;

        let text = self.answerer.generate(question, &context).await.map_err(|e| {
            error!(provider = self.answerer.name(), error = %e, "answer generation failed");
            e
        })?;

        Ok(Answer::new(question, text))
    }

    /// Answer a batch of questions, one [`Answer`] per question, in input
    /// order.
    ///
    /// Questions are processed sequentially and independently; the first
    /// failure aborts the batch and is returned unchanged, with no partial
    /// result set.
    pub async fn answer_all(&self, questions: &[String]) -> Result<Vec<Answer>> {
        let mut answers = Vec::with_capacity(questions.len());
        for question in questions {
            answers.push(self.answer(question).await?);
        }

        info!(question_count = answers.len(), "answered question batch");
        Ok(answers)
    }
}

/// Builder for constructing a [`QaSession`].
///
/// `embedding_provider` and `answer_generator` are required; `config`
/// defaults to [`QaConfig::default()`] and the chunker is derived from the
/// config unless one is supplied explicitly.
#[derive(Default)]
pub struct QaSessionBuilder {
    config: Option<QaConfig>,
    chunker: Option<Arc<dyn Chunker>>,
    embedding_provider: Option<Arc<dyn EmbeddingProvider>>,
    answer_generator: Option<Arc<dyn AnswerGenerator>>,
}

impl QaSessionBuilder {
    /// Set the session configuration.
    pub fn config(mut self, config: QaConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set a custom chunker, overriding the config-derived
    /// [`WordBoundaryChunker`].
    pub fn chunker(mut self, chunker: Arc<dyn Chunker>) -> Self {
        self.chunker = Some(chunker);
        self
    }

    /// Set the embedding provider.
    pub fn embedding_provider(mut self, provider: Arc<dyn EmbeddingProvider>) -> Self {
        self.embedding_provider = Some(provider);
        self
    }

    /// Set the answer generator.
    pub fn answer_generator(mut self, answerer: Arc<dyn AnswerGenerator>) -> Self {
        self.answer_generator = Some(answerer);
        self
    }

    /// Build the [`QaSession`], validating that all required parts are set.
    ///
    /// # Errors
    ///
    /// Returns [`QaError::Config`] if a required field is missing, or the
    /// chunker's [`RetrievalError::InvalidConfig`] unchanged if the
    /// configured chunk sizes are inconsistent.
    pub fn build(self) -> Result<QaSession> {
        let config = self.config.unwrap_or_default();
        let embedding_provider = self
            .embedding_provider
            .ok_or_else(|| QaError::Config("embedding_provider is required".into()))?;
        let answer_generator = self
            .answer_generator
            .ok_or_else(|| QaError::Config("answer_generator is required".into()))?;

        let chunker = match self.chunker {
            Some(chunker) => chunker,
            None => Arc::new(WordBoundaryChunker::new(
                config.chunk_size,
                config.chunk_overlap,
            )?),
        };

        let index =
            VectorIndex::new(embedding_provider).with_embed_batch_size(config.embed_batch_size);

        Ok(QaSession {
            config,
            chunker,
            index,
            answerer: answer_generator,
        })
    }
}
