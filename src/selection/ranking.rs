use crate::document::Chunk;
use crate::types::context_bundle::{Query, ScoreDetails};

pub trait Scorer {
    fn score(&self, chunk: &Chunk<'_>, query: &Query) -> ScoreDetails;

    fn score_value(&self, details: &ScoreDetails) -> usize {
        details.keyword_matches()
    }
}

/// v0: keyword containment.
///
/// Each keyword adds 1 if it occurs anywhere in the lowercased chunk.
/// Matching is plain substring containment, not word-boundary matching, and
/// a keyword repeated in the query is checked (and counted) once per repeat.
#[derive(Debug, Default, Clone, Copy)]
pub struct KeywordContainmentScorer;

impl Scorer for KeywordContainmentScorer {
    fn score(&self, chunk: &Chunk<'_>, query: &Query) -> ScoreDetails {
        if query.keywords.is_empty() {
            return ScoreDetails { matched: Vec::new() };
        }

        let text_lower = chunk.text.to_lowercase();
        let matched = query
            .keywords
            .iter()
            .map(|keyword| text_lower.contains(keyword.as_str()))
            .collect();

        ScoreDetails { matched }
    }
}
