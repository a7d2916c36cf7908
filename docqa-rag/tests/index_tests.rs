//! Tests for vector index ingestion atomicity and retrieval ordering.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use docqa_rag::{EmbeddingProvider, RetrievalError, VectorIndex};

const DIM: usize = 4;

/// Embeds each text onto a fixed axis: texts containing a keyword get a
/// distinct direction, so similarity to a keyword query is fully controlled.
struct KeywordEmbedder;

#[async_trait]
impl EmbeddingProvider for KeywordEmbedder {
    fn name(&self) -> &str {
        "keyword-stub"
    }

    async fn embed(&self, text: &str) -> docqa_rag::Result<Vec<f32>> {
        let mut v = vec![0.0; DIM];
        if text.contains("dog") {
            v[0] = 1.0;
        } else if text.contains("cat") {
            v[1] = 1.0;
        } else {
            v[2] = 1.0;
        }
        Ok(v)
    }

    fn dimensions(&self) -> usize {
        DIM
    }
}

/// Returns the same vector for every input, so all similarities tie.
struct ConstantEmbedder;

#[async_trait]
impl EmbeddingProvider for ConstantEmbedder {
    fn name(&self) -> &str {
        "constant-stub"
    }

    async fn embed(&self, _text: &str) -> docqa_rag::Result<Vec<f32>> {
        Ok(vec![1.0, 0.0, 0.0, 0.0])
    }

    fn dimensions(&self) -> usize {
        DIM
    }
}

/// Fails the whole batch when any text contains the failure marker; counts
/// batch calls so tests can assert batching behavior.
struct FailingEmbedder {
    calls: AtomicUsize,
}

impl FailingEmbedder {
    fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl EmbeddingProvider for FailingEmbedder {
    fn name(&self) -> &str {
        "failing-stub"
    }

    async fn embed(&self, text: &str) -> docqa_rag::Result<Vec<f32>> {
        if text.contains("poison") {
            return Err(RetrievalError::Embedding {
                provider: self.name().to_string(),
                message: "simulated provider outage".to_string(),
            });
        }
        Ok(vec![1.0, 0.0, 0.0, 0.0])
    }

    async fn embed_batch(&self, texts: &[&str]) -> docqa_rag::Result<Vec<Vec<f32>>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut results = Vec::with_capacity(texts.len());
        for text in texts {
            results.push(self.embed(text).await?);
        }
        Ok(results)
    }

    fn dimensions(&self) -> usize {
        DIM
    }
}

/// Returns a zero vector for one marked text.
struct ZeroNormEmbedder;

#[async_trait]
impl EmbeddingProvider for ZeroNormEmbedder {
    fn name(&self) -> &str {
        "zero-norm-stub"
    }

    async fn embed(&self, text: &str) -> docqa_rag::Result<Vec<f32>> {
        if text.contains("void") {
            Ok(vec![0.0; DIM])
        } else {
            Ok(vec![0.5, 0.5, 0.0, 0.0])
        }
    }

    fn dimensions(&self) -> usize {
        DIM
    }
}

/// Returns vectors of the wrong length.
struct WrongDimsEmbedder;

#[async_trait]
impl EmbeddingProvider for WrongDimsEmbedder {
    fn name(&self) -> &str {
        "wrong-dims-stub"
    }

    async fn embed(&self, _text: &str) -> docqa_rag::Result<Vec<f32>> {
        Ok(vec![1.0; DIM + 1])
    }

    fn dimensions(&self) -> usize {
        DIM
    }
}

fn texts(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[tokio::test]
async fn empty_index_rejects_retrieval() {
    let index = VectorIndex::new(Arc::new(KeywordEmbedder));
    let err = index.retrieve_context("anything", 6).await.unwrap_err();
    assert!(matches!(err, RetrievalError::EmptyIndex));
}

#[tokio::test]
async fn add_preserves_insertion_order_and_sync() {
    let index = VectorIndex::new(Arc::new(ConstantEmbedder)).with_embed_batch_size(2);
    index.add(texts(&["one", "two", "three", "four", "five"])).await.unwrap();
    assert_eq!(index.len().await, 5);

    // All similarities tie, so positions decide: search returns earliest first.
    let results = index.search("query", 5).await.unwrap();
    let positions: Vec<usize> = results.iter().map(|r| r.chunk.position).collect();
    assert_eq!(positions, vec![0, 1, 2, 3, 4]);
    assert_eq!(results[0].chunk.text, "one");
}

#[tokio::test]
async fn retrieval_prefers_most_similar_chunk() {
    let index = VectorIndex::new(Arc::new(KeywordEmbedder));
    index
        .add(texts(&["a cat sat", "a dog ran", "a bird flew"]))
        .await
        .unwrap();

    let context = index.retrieve_context("what did the dog do", 1).await.unwrap();
    assert_eq!(context, "a dog ran");
}

#[tokio::test]
async fn context_joins_selected_chunks_in_insertion_order() {
    let index = VectorIndex::new(Arc::new(KeywordEmbedder));
    // Two dog chunks, most similar, but stored around an unrelated one.
    index
        .add(texts(&["dog breakfast", "weather report", "dog dinner"]))
        .await
        .unwrap();

    // k=2 selects both dog chunks; the context reads in document order.
    let context = index.retrieve_context("dog", 2).await.unwrap();
    assert_eq!(context, "dog breakfast dog dinner");
}

#[tokio::test]
async fn saturating_k_returns_all_chunks_in_insertion_order() {
    let index = VectorIndex::new(Arc::new(KeywordEmbedder));
    index
        .add(texts(&["a cat sat", "a dog ran", "a bird flew"]))
        .await
        .unwrap();

    let context = index.retrieve_context("dog", 50).await.unwrap();
    assert_eq!(context, "a cat sat a dog ran a bird flew");
}

#[tokio::test]
async fn retrieval_is_deterministic_across_calls() {
    let index = VectorIndex::new(Arc::new(ConstantEmbedder));
    index.add(texts(&["alpha", "beta", "gamma", "delta"])).await.unwrap();

    let first = index.retrieve_context("tied query", 2).await.unwrap();
    for _ in 0..5 {
        assert_eq!(index.retrieve_context("tied query", 2).await.unwrap(), first);
    }
    // Ties resolve toward earlier insertion positions.
    assert_eq!(first, "alpha beta");
}

#[tokio::test]
async fn failed_add_leaves_index_unchanged() {
    let embedder = Arc::new(FailingEmbedder::new());
    let index = VectorIndex::new(embedder.clone()).with_embed_batch_size(2);

    index.add(texts(&["good one", "good two"])).await.unwrap();
    assert_eq!(index.len().await, 2);

    // Failure lands in the second batch of this call; nothing from the call
    // may be stored, including the successful first batch.
    let err = index
        .add(texts(&["fine", "fine too", "poison pill", "never stored"]))
        .await
        .unwrap_err();
    assert!(matches!(err, RetrievalError::Embedding { .. }));
    assert_eq!(index.len().await, 2);

    // The surviving chunks are still retrievable.
    let context = index.retrieve_context("query", 10).await.unwrap();
    assert_eq!(context, "good one good two");
}

#[tokio::test]
async fn add_batches_by_configured_size() {
    let embedder = Arc::new(FailingEmbedder::new());
    let index = VectorIndex::new(embedder.clone()).with_embed_batch_size(2);

    index
        .add(texts(&["a", "b", "c", "d", "e"]))
        .await
        .unwrap();
    assert_eq!(embedder.calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn zero_norm_embedding_scores_zero_instead_of_crashing() {
    let index = VectorIndex::new(Arc::new(ZeroNormEmbedder));
    index.add(texts(&["void chunk", "normal chunk"])).await.unwrap();

    let results = index.search("normal query", 2).await.unwrap();
    assert_eq!(results[0].chunk.text, "normal chunk");
    assert_eq!(results[1].chunk.text, "void chunk");
    assert_eq!(results[1].score, 0.0);
}

#[tokio::test]
async fn wrong_dimensionality_is_rejected() {
    let index = VectorIndex::new(Arc::new(WrongDimsEmbedder));
    let err = index.add(texts(&["chunk"])).await.unwrap_err();
    assert!(matches!(err, RetrievalError::Embedding { .. }));
    assert!(index.is_empty().await);
}

#[tokio::test]
async fn adding_no_chunks_is_a_no_op() {
    let index = VectorIndex::new(Arc::new(KeywordEmbedder));
    index.add(Vec::new()).await.unwrap();
    assert!(index.is_empty().await);
}

#[tokio::test]
async fn clear_empties_the_index() {
    let index = VectorIndex::new(Arc::new(KeywordEmbedder));
    index.add(texts(&["a dog ran"])).await.unwrap();
    index.clear().await;
    assert!(index.is_empty().await);
    assert!(matches!(
        index.retrieve_context("dog", 1).await,
        Err(RetrievalError::EmptyIndex)
    ));
}

// ---------------------------------------------------------------------------
// Property tests for search ordering
// ---------------------------------------------------------------------------

mod prop_search_ordering {
    use super::*;
    use proptest::prelude::*;

    /// Deterministic content-hash embeddings, normalized.
    struct HashEmbedder;

    #[async_trait]
    impl EmbeddingProvider for HashEmbedder {
        fn name(&self) -> &str {
            "hash-stub"
        }

        async fn embed(&self, text: &str) -> docqa_rag::Result<Vec<f32>> {
            let hash = text
                .bytes()
                .fold(0u64, |acc, b| acc.wrapping_mul(31).wrapping_add(b as u64));
            let mut v: Vec<f32> = (0..DIM)
                .map(|i| ((hash.wrapping_add(i as u64)) as f32).sin())
                .collect();
            let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
            if norm > 0.0 {
                v.iter_mut().for_each(|x| *x /= norm);
            }
            Ok(v)
        }

        fn dimensions(&self) -> usize {
            DIM
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        /// Search returns at most `k` results, ordered by descending score
        /// with ties resolved toward earlier insertion positions.
        #[test]
        fn results_ordered_descending_and_bounded_by_k(
            chunks in proptest::collection::vec("[a-z ]{1,20}", 1..16),
            query in "[a-z ]{1,20}",
            k in 1usize..20,
        ) {
            let rt = tokio::runtime::Runtime::new().unwrap();
            let stored = chunks.len();
            let results = rt.block_on(async {
                let index = VectorIndex::new(Arc::new(HashEmbedder));
                index.add(chunks).await.unwrap();
                index.search(&query, k).await.unwrap()
            });

            prop_assert!(results.len() <= k);
            prop_assert!(results.len() <= stored);

            for window in results.windows(2) {
                prop_assert!(
                    window[0].score > window[1].score
                        || (window[0].score == window[1].score
                            && window[0].chunk.position < window[1].chunk.position),
                    "results out of order: ({}, {}) before ({}, {})",
                    window[0].score,
                    window[0].chunk.position,
                    window[1].score,
                    window[1].chunk.position,
                );
            }
        }
    }
}
