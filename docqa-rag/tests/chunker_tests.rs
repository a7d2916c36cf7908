//! Unit and property tests for word-boundary chunking.

use docqa_rag::{Chunker, RetrievalError, WordBoundaryChunker};
use proptest::prelude::*;

#[test]
fn rejects_overlap_not_smaller_than_chunk_size() {
    assert!(matches!(
        WordBoundaryChunker::new(10, 10),
        Err(RetrievalError::InvalidConfig(_))
    ));
    assert!(matches!(
        WordBoundaryChunker::new(10, 11),
        Err(RetrievalError::InvalidConfig(_))
    ));
    assert!(WordBoundaryChunker::new(10, 9).is_ok());
    assert!(WordBoundaryChunker::new(1, 0).is_ok());
}

#[test]
fn empty_text_yields_no_chunks() {
    let chunker = WordBoundaryChunker::new(10, 2).unwrap();
    assert!(chunker.split("").is_empty());
}

#[test]
fn short_text_yields_single_whole_chunk() {
    let chunker = WordBoundaryChunker::new(100, 20).unwrap();
    let text = "a short sentence";
    assert_eq!(chunker.split(text), vec![text.to_string()]);
}

#[test]
fn text_exactly_chunk_size_yields_single_chunk() {
    let chunker = WordBoundaryChunker::new(9, 2).unwrap();
    assert_eq!(chunker.split("word word"), vec!["word word".to_string()]);
}

#[test]
fn breaks_on_word_boundaries() {
    let chunker = WordBoundaryChunker::new(10, 2).unwrap();
    let chunks = chunker.split("A cat sat. A dog ran. A bird flew.");

    // Every chunk except the last ends just after whitespace — never mid-word.
    for chunk in &chunks[..chunks.len() - 1] {
        assert!(
            chunk.ends_with(char::is_whitespace),
            "chunk {chunk:?} does not end on a word boundary"
        );
    }
    assert_eq!(chunks.last().unwrap(), "d flew.");
}

#[test]
fn no_whitespace_falls_back_to_hard_cut() {
    let chunker = WordBoundaryChunker::new(4, 1).unwrap();
    let chunks = chunker.split("abcdefghij");
    assert_eq!(chunks[0], "abcd");
    // Next window starts at 4 - 1 = 3.
    assert_eq!(chunks[1], "defg");
    for chunk in &chunks {
        assert!(chunk.chars().count() <= 4);
    }
}

#[test]
fn multibyte_text_does_not_panic_and_respects_char_counts() {
    let chunker = WordBoundaryChunker::new(6, 2).unwrap();
    let chunks = chunker.split("héllo wörld çafé naïve");
    assert!(!chunks.is_empty());
    for chunk in &chunks {
        assert!(chunk.chars().count() <= 6);
    }
    // Reconstruction still holds for multi-byte input.
    assert_eq!(reconstruct(&chunks, 2), "héllo wörld çafé naïve");
}

#[test]
fn consecutive_chunks_share_exactly_overlap_chars() {
    let chunker = WordBoundaryChunker::new(10, 3).unwrap();
    let chunks = chunker.split("the quick brown fox jumps over the lazy dog");

    for pair in chunks.windows(2) {
        let prev: Vec<char> = pair[0].chars().collect();
        let tail: String = prev[prev.len() - 3..].iter().collect();
        let head: String = pair[1].chars().take(3).collect();
        assert_eq!(tail, head, "overlap mismatch between {:?} and {:?}", pair[0], pair[1]);
    }
}

/// Rebuild the original text from chunks by dropping each subsequent chunk's
/// leading `overlap` characters.
fn reconstruct(chunks: &[String], overlap: usize) -> String {
    let mut out = String::new();
    for (i, chunk) in chunks.iter().enumerate() {
        if i == 0 {
            out.push_str(chunk);
        } else {
            out.extend(chunk.chars().skip(overlap));
        }
    }
    out
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Concatenating the chunks' non-overlapping portions reconstructs the
    /// original text exactly: nothing dropped, nothing duplicated.
    #[test]
    fn chunks_cover_the_whole_text(
        text in "[a-z ]{0,300}",
        (chunk_size, overlap) in (2usize..60).prop_flat_map(|cs| (Just(cs), 0..cs)),
    ) {
        let chunker = WordBoundaryChunker::new(chunk_size, overlap).unwrap();
        let chunks = chunker.split(&text);

        if text.is_empty() {
            prop_assert!(chunks.is_empty());
        } else {
            prop_assert_eq!(reconstruct(&chunks, overlap), text);
        }
    }

    /// No chunk exceeds `chunk_size` characters, and every chunk is non-empty.
    #[test]
    fn chunks_respect_the_size_bound(
        text in "[a-z ]{1,300}",
        (chunk_size, overlap) in (2usize..60).prop_flat_map(|cs| (Just(cs), 0..cs)),
    ) {
        let chunker = WordBoundaryChunker::new(chunk_size, overlap).unwrap();
        for chunk in chunker.split(&text) {
            let len = chunk.chars().count();
            prop_assert!(len > 0);
            prop_assert!(len <= chunk_size, "chunk of {len} chars exceeds {chunk_size}");
        }
    }

    /// Splitting is a pure function: identical input gives identical output.
    #[test]
    fn splitting_is_deterministic(text in "[a-z ]{0,200}") {
        let chunker = WordBoundaryChunker::new(20, 5).unwrap();
        prop_assert_eq!(chunker.split(&text), chunker.split(&text));
    }
}
