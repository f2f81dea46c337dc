pub mod document;
pub mod segment;

pub use crate::types::identifiers::DocumentVersion;
pub use document::{DocumentError, RawDocument};
pub use segment::{segment, Chunk, SegmentError, Segmenter, DEFAULT_CHUNK_SIZE};
