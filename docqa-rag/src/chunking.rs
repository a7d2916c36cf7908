//! Document chunking.
//!
//! [`WordBoundaryChunker`] splits raw text into overlapping chunks that break
//! on whitespace rather than mid-word, so each chunk stays independently
//! readable for embedding.

use crate::error::{Result, RetrievalError};

/// A strategy for splitting raw document text into chunk texts.
///
/// Splitting is a pure function of the input: no side effects, no state.
/// An empty input yields an empty `Vec`, not an error.
pub trait Chunker: Send + Sync {
    /// Split text into an ordered sequence of chunk texts.
    fn split(&self, text: &str) -> Vec<String>;
}

/// Splits text into fixed-size windows that end on word boundaries.
///
/// The chunker walks the text left to right in windows of `chunk_size`
/// characters. A window that does not reach the end of the text is shrunk
/// backward so it ends just after the nearest preceding whitespace character;
/// the final chunk runs to end-of-text regardless. Each subsequent window
/// starts `overlap` characters before the previous chunk's end, so adjacent
/// chunks share `overlap` characters of context.
///
/// All sizes are in characters, not bytes, so multi-byte UTF-8 input is safe.
///
/// # Example
///
/// ```rust,ignore
/// use docqa_rag::{Chunker, WordBoundaryChunker};
///
/// let chunker = WordBoundaryChunker::new(1000, 200)?;
/// let chunks = chunker.split(&document_text);
/// ```
#[derive(Debug, Clone)]
pub struct WordBoundaryChunker {
    chunk_size: usize,
    overlap: usize,
}

impl WordBoundaryChunker {
    /// Default chunk size in characters.
    pub const DEFAULT_CHUNK_SIZE: usize = 1000;
    /// Default overlap between consecutive chunks in characters.
    pub const DEFAULT_OVERLAP: usize = 200;

    /// Create a new `WordBoundaryChunker`.
    ///
    /// # Errors
    ///
    /// Returns [`RetrievalError::InvalidConfig`] unless `chunk_size > overlap`.
    pub fn new(chunk_size: usize, overlap: usize) -> Result<Self> {
        if chunk_size <= overlap {
            return Err(RetrievalError::InvalidConfig(format!(
                "chunk_size ({chunk_size}) must be greater than overlap ({overlap})"
            )));
        }
        Ok(Self { chunk_size, overlap })
    }

    /// Maximum number of characters per chunk.
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Number of characters shared between consecutive chunks.
    pub fn overlap(&self) -> usize {
        self.overlap
    }
}

impl Default for WordBoundaryChunker {
    fn default() -> Self {
        Self {
            chunk_size: Self::DEFAULT_CHUNK_SIZE,
            overlap: Self::DEFAULT_OVERLAP,
        }
    }
}

impl Chunker for WordBoundaryChunker {
    fn split(&self, text: &str) -> Vec<String> {
        if text.is_empty() {
            return Vec::new();
        }

        let chars: Vec<char> = text.chars().collect();
        let len = chars.len();
        let mut chunks = Vec::new();
        let mut start = 0;

        while start < len {
            let hard_end = (start + self.chunk_size).min(len);
            let mut end = hard_end;

            if hard_end < len {
                // Shrink the window so it ends just after the nearest
                // preceding whitespace. A window with no whitespace, or one
                // where the shrink would stall the scan, keeps the hard cut.
                if let Some(pos) = chars[start..hard_end].iter().rposition(|c| c.is_whitespace()) {
                    let candidate = start + pos + 1;
                    if candidate > start + self.overlap {
                        end = candidate;
                    }
                }
            }

            chunks.push(chars[start..end].iter().collect());

            if end == len {
                break;
            }
            start = end - self.overlap;
        }

        chunks
    }
}
