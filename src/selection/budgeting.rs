use crate::types::context_bundle::ScoredChunk;

pub struct LimitResult<'a> {
    pub selected: Vec<ScoredChunk<'a>>,
    pub chunks_considered: usize,
}

/// Filter ranked chunks and keep at most `max_chunks` of them.
///
/// A chunk qualifies when it scored above zero, or when the document produced
/// fewer than `small_document_threshold` chunks, in which case every chunk
/// qualifies regardless of score.
pub fn apply_limit(
    ranked: Vec<ScoredChunk<'_>>,
    max_chunks: usize,
    small_document_threshold: usize,
) -> LimitResult<'_> {
    let chunks_considered = ranked.len();
    let small_document = chunks_considered < small_document_threshold;

    let selected = ranked
        .into_iter()
        .filter(|scored| scored.score > 0 || small_document)
        .take(max_chunks)
        .collect();

    LimitResult {
        selected,
        chunks_considered,
    }
}
