pub mod budgeting;
pub mod ranking;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::document::{RawDocument, Segmenter, DEFAULT_CHUNK_SIZE};
use crate::types::context_bundle::{
	ContextResult, Query, ScoredChunk, SelectedChunk, SelectionError, SelectionMetadata,
};
pub use budgeting::{apply_limit, LimitResult};
pub use ranking::{KeywordContainmentScorer, Scorer};

pub const SEGMENT_SEPARATOR: &str = "\n\n[SEGMENT]\n";

// Serializable, comparable, explicit defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionPolicy {
	pub chunk_size: usize,
	pub max_chunks: usize,
	/// Documents with fewer chunks than this keep every chunk.
	pub small_document_threshold: usize,
	pub fallback_chars: usize,
	pub separator: String,
}

impl SelectionPolicy {
	pub fn v0() -> Self {
		Self {
			chunk_size: DEFAULT_CHUNK_SIZE,
			max_chunks: 4,
			small_document_threshold: 3,
			fallback_chars: 3000,
			separator: SEGMENT_SEPARATOR.into(),
		}
	}
}

impl Default for SelectionPolicy {
	fn default() -> Self {
		Self::v0()
	}
}

pub struct ContextSelector<S> {
	policy: SelectionPolicy,
	segmenter: Segmenter,
	scorer: S,
}

impl Default for ContextSelector<KeywordContainmentScorer> {
	fn default() -> Self {
		Self {
			policy: SelectionPolicy::v0(),
			segmenter: Segmenter::default(),
			scorer: KeywordContainmentScorer,
		}
	}
}

impl<S> ContextSelector<S>
where
	S: Scorer,
{
	pub fn new(policy: SelectionPolicy, scorer: S) -> Result<Self, SelectionError> {
		let segmenter = Segmenter::new(policy.chunk_size)
			.map_err(|_| SelectionError::InvalidChunkSize(policy.chunk_size))?;
		if policy.max_chunks == 0 {
			return Err(SelectionError::InvalidChunkLimit(policy.max_chunks));
		}

		Ok(Self {
			policy,
			segmenter,
			scorer,
		})
	}

	pub fn policy(&self) -> &SelectionPolicy {
		&self.policy
	}

	pub fn select(&self, document: &RawDocument, query: &Query) -> ContextResult {
		// 1. Segmentation Phase
		let chunks = self.segmenter.segment(document.content());

		// 2. Scoring Phase
		let mut scored: Vec<ScoredChunk<'_>> = chunks
			.into_iter()
			.map(|chunk| {
				let details = self.scorer.score(&chunk, query);
				let score = self.scorer.score_value(&details);
				ScoredChunk {
					chunk,
					score,
					score_details: details,
				}
			})
			.collect();

		// 3. Ordering Phase
		// Score desc; `sort_by` is stable so ties keep segmentation order.
		scored.sort_by(|a, b| b.score.cmp(&a.score));

		debug_assert!(scored.windows(2).all(|w| {
			let a = &w[0];
			let b = &w[1];
			a.score > b.score || (a.score == b.score && a.chunk.index < b.chunk.index)
		}));

		// 4. Limiting Phase
		let LimitResult {
			selected,
			chunks_considered,
		} = apply_limit(
			scored,
			self.policy.max_chunks,
			self.policy.small_document_threshold,
		);

		// 5. Assembly Phase
		let fallback = selected.is_empty();
		let context = if fallback {
			document.prefix(self.policy.fallback_chars).to_string()
		} else {
			selected
				.iter()
				.map(|s| s.chunk.text)
				.collect::<Vec<_>>()
				.join(self.policy.separator.as_str())
		};

		debug!(
			document_version = document.version().as_str(),
			keywords = query.keywords.len(),
			chunks_considered,
			chunks_selected = selected.len(),
			fallback,
			"resolved context"
		);

		let chunks: Vec<SelectedChunk> = selected
			.iter()
			.map(|s| SelectedChunk {
				index: s.chunk.index,
				char_offset: s.chunk.char_offset,
				char_len: s.chunk.char_len,
				score: s.score,
			})
			.collect();

		let metadata = SelectionMetadata {
			query: query.raw.clone(),
			document_version: document.version().as_str().to_string(),
			keywords: query.keywords.clone(),
			chunks_considered,
			chunks_selected: chunks.len(),
			fallback,
		};

		ContextResult {
			context,
			chunks,
			selection: metadata,
		}
	}
}

/// Resolve the context string for `query` out of `text` with the v0 policy.
pub fn select_context(query: &str, text: &str) -> String {
	ContextSelector::default()
		.select(&RawDocument::new(text), &Query::new(query))
		.context
}
