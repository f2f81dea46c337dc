use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::AnalystConfig;
use crate::document::RawDocument;
use crate::generation::error::GenerationError;
use crate::generation::prompt::{final_prompt, system_instruction};
use crate::generation::{
    GenerationOptions, GenerationRequest, Generator, SourceCandidate,
};
use crate::selection::{ContextSelector, KeywordContainmentScorer, Scorer};
use crate::types::context_bundle::{ContextResult, Query};

pub const UNAVAILABLE_REPORT: &str = "System report unavailable.";
pub const UNTITLED_SOURCE: &str = "External Market Data";
pub const PRECISION_LEVEL: &str = "High Fidelity";
pub const RELEVANCE_SCORE: f32 = 98.4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AnalysisMode {
    /// Prompt only, no pasted records.
    QuickConsult,
    /// Prompt plus keyword-selected excerpts of the pasted records.
    DeepAnalysis,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub prompt: String,
    pub mode: AnalysisMode,
    pub strategy: String,
    /// Pasted free-text records; only read in deep-analysis mode.
    pub records: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroundingSource {
    pub title: String,
    pub uri: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Telemetry {
    pub precision_level: String,
    pub relevance_score: f32,
    /// Seconds between request start and response.
    pub processing_time: f64,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl Telemetry {
    fn measure(started_at: DateTime<Utc>, finished_at: DateTime<Utc>) -> Self {
        let elapsed_ms = (finished_at - started_at).num_milliseconds().max(0);
        Self {
            precision_level: PRECISION_LEVEL.to_string(),
            relevance_score: RELEVANCE_SCORE,
            processing_time: elapsed_ms as f64 / 1000.0,
            started_at,
            finished_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightReport {
    pub content: String,
    pub strategy_reference: String,
    pub telemetry: Telemetry,
    pub sources: Vec<GroundingSource>,
    /// Present for deep-analysis requests only.
    pub context: Option<ContextResult>,
}

/// Turns analysis requests into remote generation calls.
pub struct ReportService<G, S = KeywordContainmentScorer> {
    config: AnalystConfig,
    selector: ContextSelector<S>,
    generator: G,
}

impl<G: Generator> ReportService<G> {
    pub fn new(config: AnalystConfig, generator: G) -> Self {
        Self {
            config,
            selector: ContextSelector::default(),
            generator,
        }
    }
}

impl<G, S> ReportService<G, S>
where
    G: Generator,
    S: Scorer,
{
    pub fn with_selector(config: AnalystConfig, selector: ContextSelector<S>, generator: G) -> Self {
        Self {
            config,
            selector,
            generator,
        }
    }

    pub fn config(&self) -> &AnalystConfig {
        &self.config
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    /// Resolve the context (deep-analysis only), call the generator and
    /// normalize what comes back.
    pub fn process(&self, request: &AnalysisRequest) -> Result<InsightReport, GenerationError> {
        if request.prompt.trim().is_empty() {
            return Err(GenerationError::EmptyPrompt);
        }

        let started_at = Utc::now();

        let context = match request.mode {
            AnalysisMode::DeepAnalysis => {
                let records = RawDocument::new(request.records.clone().unwrap_or_default());
                Some(self.selector.select(&records, &Query::new(request.prompt.as_str())))
            }
            AnalysisMode::QuickConsult => None,
        };

        let generation = GenerationRequest {
            model: self.config.model.clone(),
            prompt: final_prompt(
                &request.prompt,
                context.as_ref().map(|c| c.context.as_str()),
            ),
            system_instruction: system_instruction(&request.strategy),
            options: GenerationOptions {
                temperature: self.config.temperature,
                enable_web_search: self.config.enable_web_search,
            },
        };

        info!(
            model = %generation.model,
            mode = ?request.mode,
            prompt_chars = generation.prompt.chars().count(),
            "requesting report"
        );

        let generated = self.generator.generate(&generation).map_err(|e| {
            warn!(error = %e, "report generation failed");
            e
        })?;

        let content = generated
            .text
            .filter(|text| !text.is_empty())
            .unwrap_or_else(|| UNAVAILABLE_REPORT.to_string());
        let sources = normalize_sources(generated.sources);
        let telemetry = Telemetry::measure(started_at, Utc::now());

        info!(
            sources = sources.len(),
            processing_time = telemetry.processing_time,
            "report ready"
        );

        Ok(InsightReport {
            content,
            strategy_reference: request.strategy.clone(),
            telemetry,
            sources,
            context,
        })
    }
}

/// Drop sources without a uri, title the rest, and dedupe by uri.
///
/// A repeated uri keeps the position of its first occurrence and the title of
/// its last.
pub fn normalize_sources(candidates: Vec<SourceCandidate>) -> Vec<GroundingSource> {
    let mut sources: Vec<GroundingSource> = Vec::with_capacity(candidates.len());

    for candidate in candidates {
        let uri = match candidate.uri.filter(|uri| !uri.is_empty()) {
            Some(uri) => uri,
            None => continue,
        };
        let title = candidate
            .title
            .filter(|title| !title.is_empty())
            .unwrap_or_else(|| UNTITLED_SOURCE.to_string());

        match sources.iter_mut().find(|existing| existing.uri == uri) {
            Some(existing) => existing.title = title,
            None => sources.push(GroundingSource { title, uri }),
        }
    }

    sources
}
