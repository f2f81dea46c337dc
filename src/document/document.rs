use thiserror::Error;

use crate::types::identifiers::DocumentVersion;

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Content must be valid UTF-8")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),
}

/// Pasted free-text records supplied with a single request.
///
/// Immutable once constructed; nothing about it outlives the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDocument {
    version: DocumentVersion,
    content: String,
}

impl RawDocument {
    pub fn new(content: impl Into<String>) -> Self {
        let content = content.into();
        let version = DocumentVersion::from_content(content.as_bytes());

        RawDocument { version, content }
    }

    /// Ingest raw bytes, rejecting anything that is not UTF-8.
    pub fn ingest(raw_content: Vec<u8>) -> Result<Self, DocumentError> {
        let content = String::from_utf8(raw_content)?;
        Ok(Self::new(content))
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn version(&self) -> &DocumentVersion {
        &self.version
    }

    pub fn char_len(&self) -> usize {
        self.content.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// The first `max_chars` characters, or the whole content if shorter.
    pub fn prefix(&self, max_chars: usize) -> &str {
        match self.content.char_indices().nth(max_chars) {
            Some((end, _)) => &self.content[..end],
            None => &self.content,
        }
    }
}
