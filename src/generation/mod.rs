//! Boundary with the remote generation service.
//!
//! The wire format of the remote API is not modelled here: a [`Generator`]
//! takes a fully built request and returns text plus any grounding sources.

pub mod error;
pub mod prompt;
pub mod report;

use serde::{Deserialize, Serialize};

pub use error::{GenerationError, CAPACITY_COOLDOWN};
pub use prompt::{final_prompt, system_instruction, DEFAULT_STRATEGY};
pub use report::{
    AnalysisMode, AnalysisRequest, GroundingSource, InsightReport, ReportService, Telemetry,
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationOptions {
    pub temperature: f32,
    pub enable_web_search: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub model: String,
    pub prompt: String,
    pub system_instruction: String,
    pub options: GenerationOptions,
}

/// A citation as reported by the remote service, before normalization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceCandidate {
    pub title: Option<String>,
    pub uri: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedContent {
    pub text: Option<String>,
    pub sources: Vec<SourceCandidate>,
}

/// Text-in, text-out remote model.
///
/// Implementations own their credentials (see [`crate::config::AnalystConfig`])
/// and classify remote failures with [`GenerationError::from_remote_message`].
pub trait Generator {
    fn generate(&self, request: &GenerationRequest) -> Result<GeneratedContent, GenerationError>;
}

impl<G: Generator + ?Sized> Generator for &G {
    fn generate(&self, request: &GenerationRequest) -> Result<GeneratedContent, GenerationError> {
        (**self).generate(request)
    }
}
