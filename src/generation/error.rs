use std::time::Duration;

use thiserror::Error;

/// How long callers should back off after the remote service reports
/// exhausted capacity.
pub const CAPACITY_COOLDOWN: Duration = Duration::from_secs(20);

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GenerationError {
    #[error("Prompt is empty")]
    EmptyPrompt,

    #[error("Enterprise server capacity reached. System cooldown in progress.")]
    CapacityExhausted,

    #[error("Platform Error: {0}")]
    Platform(String),
}

impl GenerationError {
    /// Classify a failure message reported by the remote service.
    pub fn from_remote_message(message: impl Into<String>) -> Self {
        let message = message.into();
        if message.contains("429") || message.contains("RESOURCE_EXHAUSTED") {
            GenerationError::CapacityExhausted
        } else {
            GenerationError::Platform(message)
        }
    }

    pub fn cooldown(&self) -> Option<Duration> {
        match self {
            GenerationError::CapacityExhausted => Some(CAPACITY_COOLDOWN),
            _ => None,
        }
    }
}
