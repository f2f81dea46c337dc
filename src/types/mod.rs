pub mod context_bundle;
pub mod identifiers;

pub use context_bundle::{
    ContextResult, Query, ScoreDetails, ScoredChunk, SelectedChunk, SelectionError,
    SelectionMetadata, KEYWORD_MIN_EXCLUSIVE_LEN,
};
pub use identifiers::DocumentVersion;
