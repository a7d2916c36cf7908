//! # QA OpenAI Demo
//!
//! The same ingest-then-ask flow as `qa_basic`, but against the real OpenAI
//! embeddings and chat completions APIs.
//!
//! Requires `OPENAI_API_KEY` in the environment.
//!
//! Run: `cargo run --example qa_openai --features openai`

use std::sync::Arc;

use docqa_qa::openai::OpenAIAnswerGenerator;
use docqa_qa::{QaSession, answers_to_json};
use docqa_rag::openai::OpenAIEmbeddingProvider;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let document = std::fs::read_to_string(
        std::env::args()
            .nth(1)
            .ok_or_else(|| anyhow::anyhow!("usage: qa_openai <text-file> [question...]"))?,
    )?;
    let questions: Vec<String> = std::env::args().skip(2).collect();
    if questions.is_empty() {
        anyhow::bail!("usage: qa_openai <text-file> [question...]");
    }

    let session = QaSession::builder()
        .embedding_provider(Arc::new(OpenAIEmbeddingProvider::from_env()?))
        .answer_generator(Arc::new(OpenAIAnswerGenerator::from_env()?))
        .build()?;

    let chunk_count = session.ingest(&document).await?;
    eprintln!("Ingested document into {chunk_count} chunks.");

    let answers = session.answer_all(&questions).await?;
    println!("{}", answers_to_json(&answers)?);

    Ok(())
}
