//! # docqa-qa
//!
//! Question-answering orchestration on top of [`docqa-rag`](docqa_rag):
//! the [`AnswerGenerator`] contract, the sentinel-based confidence
//! derivation, and the [`QaSession`] pipeline that composes chunking,
//! indexing, retrieval, and answer generation into two operations —
//! ingest a document, answer questions about it.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use docqa_qa::{QaConfig, QaSession};
//!
//! let session = QaSession::builder()
//!     .config(QaConfig::default())
//!     .embedding_provider(Arc::new(my_embedder))
//!     .answer_generator(Arc::new(my_answerer))
//!     .build()?;
//!
//! session.ingest(&document_text).await?;
//! let answers = session.answer_all(&["What is the warranty period?".into()]).await?;
//! println!("{}", docqa_qa::answers_to_json(&answers)?);
//! ```
//!
//! Sessions are plain values with caller-owned lifecycle: independent
//! concurrent sessions are just independent `QaSession` instances, each with
//! its own index. The `openai` feature adds
//! [`openai::OpenAIAnswerGenerator`] backed by the chat completions API.

pub mod answer;
pub mod answerer;
pub mod error;
pub mod mock;
pub mod session;

#[cfg(feature = "openai")]
pub mod openai;

pub use answer::{Answer, NO_ANSWER_SENTINEL, answers_to_json, confidence_for};
pub use answerer::AnswerGenerator;
pub use error::{QaError, Result};
pub use mock::MockAnswerGenerator;
pub use session::{IngestPolicy, QaConfig, QaConfigBuilder, QaSession, QaSessionBuilder};
