use serde::{Deserialize, Serialize};

use crate::document::Chunk;

/// Tokens must be strictly longer than this (in chars) to count as keywords.
pub const KEYWORD_MIN_EXCLUSIVE_LEN: usize = 3;

/// A user query and the keywords derived from it.
/// Normalization rules:
/// - Lowercase
/// - Split on single spaces (punctuation stays attached to its token)
/// - Keep tokens longer than `KEYWORD_MIN_EXCLUSIVE_LEN` chars
/// - Duplicates are kept, in split order
#[derive(Debug, Clone)]
pub struct Query {
    pub raw: String,
    pub keywords: Vec<String>,
}

impl Query {
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let keywords = raw
            .to_lowercase()
            .split(' ')
            .filter(|token| token.chars().count() > KEYWORD_MIN_EXCLUSIVE_LEN)
            .map(|token| token.to_string())
            .collect();

        Self { raw, keywords }
    }
}

/// A chunk that made it into the context string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedChunk {
    /// Position in segmentation order.
    pub index: usize,
    pub char_offset: usize,
    pub char_len: usize,
    pub score: usize,
}

/// Metadata describing the outcome of the selection process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionMetadata {
    pub query: String,
    pub document_version: String,
    pub keywords: Vec<String>,

    pub chunks_considered: usize,
    pub chunks_selected: usize,

    /// True when no chunk qualified and the raw prefix was returned instead.
    pub fallback: bool,
}

/// The final result of a context resolution operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextResult {
    pub context: String,
    pub chunks: Vec<SelectedChunk>,
    pub selection: SelectionMetadata,
}

/// Internal: a chunk that has been scored but not yet selected.
/// Borrows the chunk text from the source document.
#[derive(Debug, Clone)]
pub struct ScoredChunk<'a> {
    pub chunk: Chunk<'a>,

    pub score: usize,
    pub score_details: ScoreDetails,
}

/// Internal: scoring components before they are folded into a score.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreDetails {
    /// One entry per keyword check, in keyword order.
    pub matched: Vec<bool>,
}

impl ScoreDetails {
    pub fn keyword_matches(&self) -> usize {
        self.matched.iter().filter(|hit| **hit).count()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SelectionError {
    #[error("Invalid chunk size: {0}")]
    InvalidChunkSize(usize),

    #[error("Invalid chunk limit: {0}")]
    InvalidChunkLimit(usize),
}
