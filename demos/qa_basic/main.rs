//! # QA Basic Demo
//!
//! Ingests a document and answers questions about it end to end, using a
//! deterministic hash-based embedding provider and a keyword-matching answer
//! generator so it runs with **zero API keys**.
//!
//! Run: `cargo run --example qa_basic`

use std::sync::Arc;

use docqa_qa::{AnswerGenerator, NO_ANSWER_SENTINEL, QaConfig, QaSession, answers_to_json};
use docqa_rag::EmbeddingProvider;

// ---------------------------------------------------------------------------
// HashEmbedder — deterministic hash-based embeddings for demos/tests
// ---------------------------------------------------------------------------

struct HashEmbedder {
    dimensions: usize,
}

#[async_trait::async_trait]
impl EmbeddingProvider for HashEmbedder {
    fn name(&self) -> &str {
        "hash"
    }

    async fn embed(&self, text: &str) -> docqa_rag::Result<Vec<f32>> {
        // Deterministic embedding: hash the text bytes, then generate a
        // normalised vector whose direction depends on the content.
        let hash = text
            .bytes()
            .fold(0u64, |acc, b| acc.wrapping_mul(31).wrapping_add(b as u64));
        let mut emb = vec![0.0f32; self.dimensions];
        for (i, v) in emb.iter_mut().enumerate() {
            *v = ((hash.wrapping_add(i as u64)) as f32).sin();
        }
        let norm: f32 = emb.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            emb.iter_mut().for_each(|x| *x /= norm);
        }
        Ok(emb)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}

// ---------------------------------------------------------------------------
// KeywordAnswerer — answers by echoing the sentence that shares the most
// words with the question, or the no-answer sentinel when nothing overlaps
// ---------------------------------------------------------------------------

struct KeywordAnswerer;

#[async_trait::async_trait]
impl AnswerGenerator for KeywordAnswerer {
    fn name(&self) -> &str {
        "keyword"
    }

    async fn generate(&self, question: &str, context: &str) -> docqa_qa::Result<String> {
        let question_words: Vec<String> = question
            .split_whitespace()
            .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()).to_lowercase())
            .filter(|w| w.len() > 3)
            .collect();

        let best = context
            .split('.')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .max_by_key(|sentence| {
                let lower = sentence.to_lowercase();
                question_words.iter().filter(|w| lower.contains(w.as_str())).count()
            });

        match best {
            Some(sentence) => Ok(format!("{sentence}.")),
            None => Ok(NO_ANSWER_SENTINEL.to_string()),
        }
    }
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let document = "The Aurora project started in March 2019 as a research effort \
        into low-power sensor networks. Its first prototype shipped in late 2020. \
        The team grew from four engineers to twenty-three by the end of 2021. \
        Funding was provided by the national science agency under grant A-1234. \
        The project was renamed to Borealis in 2022 after a trademark dispute.";

    let session = QaSession::builder()
        .config(
            QaConfig::builder()
                .chunk_size(120)
                .chunk_overlap(24)
                .top_k(3)
                .build()?,
        )
        .embedding_provider(Arc::new(HashEmbedder { dimensions: 64 }))
        .answer_generator(Arc::new(KeywordAnswerer))
        .build()?;

    let chunk_count = session.ingest(document).await?;
    println!("Ingested document into {chunk_count} chunks.\n");

    let questions = vec![
        "When did the Aurora project start?".to_string(),
        "Who provided the funding?".to_string(),
        "Why was the project renamed?".to_string(),
    ];

    let answers = session.answer_all(&questions).await?;
    println!("{}", answers_to_json(&answers)?);

    Ok(())
}
