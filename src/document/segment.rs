use std::num::NonZeroUsize;

use thiserror::Error;

/// Chunk size used for deep-analysis context resolution.
pub const DEFAULT_CHUNK_SIZE: usize = 800;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SegmentError {
    #[error("Chunk size must be a positive integer, got {0}")]
    InvalidChunkSize(usize),
}

/// A contiguous window of the source text.
///
/// Chunks borrow from the document they were cut from; concatenating every
/// chunk of a segmentation in order yields the original text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunk<'a> {
    pub index: usize,
    /// Offset in chars from the start of the document.
    pub char_offset: usize,
    pub char_len: usize,
    pub text: &'a str,
}

/// Fixed-size, non-overlapping character segmentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segmenter {
    chunk_size: NonZeroUsize,
}

impl Default for Segmenter {
    fn default() -> Self {
        Self {
            chunk_size: NonZeroUsize::new(DEFAULT_CHUNK_SIZE).unwrap_or(NonZeroUsize::MIN),
        }
    }
}

impl Segmenter {
    pub fn new(chunk_size: usize) -> Result<Self, SegmentError> {
        let chunk_size =
            NonZeroUsize::new(chunk_size).ok_or(SegmentError::InvalidChunkSize(chunk_size))?;
        Ok(Self { chunk_size })
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size.get()
    }

    /// Split `text` into windows of exactly `chunk_size` chars; the last one
    /// holds the remainder. Empty text yields no chunks.
    pub fn segment<'a>(&self, text: &'a str) -> Vec<Chunk<'a>> {
        let size = self.chunk_size.get();
        let mut chunks = Vec::new();

        let mut start_byte = 0;
        let mut char_offset = 0;
        let mut char_len = 0;

        for (byte_idx, _) in text.char_indices() {
            if char_len == size {
                chunks.push(Chunk {
                    index: chunks.len(),
                    char_offset,
                    char_len,
                    text: &text[start_byte..byte_idx],
                });
                start_byte = byte_idx;
                char_offset += char_len;
                char_len = 0;
            }
            char_len += 1;
        }

        if char_len > 0 {
            chunks.push(Chunk {
                index: chunks.len(),
                char_offset,
                char_len,
                text: &text[start_byte..],
            });
        }

        debug_assert!(chunks.iter().all(|c| c.char_len <= size));

        chunks
    }
}

/// Segment `text` into `chunk_size`-char chunks.
pub fn segment(text: &str, chunk_size: usize) -> Result<Vec<Chunk<'_>>, SegmentError> {
    Ok(Segmenter::new(chunk_size)?.segment(text))
}
