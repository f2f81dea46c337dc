use std::cell::RefCell;

use audit_context::config::AnalystConfig;
use audit_context::generation::{
    AnalysisMode, AnalysisRequest, GeneratedContent, GenerationError, GenerationRequest,
    Generator, ReportService, SourceCandidate,
};
use audit_context::selection::SEGMENT_SEPARATOR;

struct FakeGenerator {
    response: Result<GeneratedContent, GenerationError>,
    calls: RefCell<Vec<GenerationRequest>>,
}

impl FakeGenerator {
    fn replying(text: &str) -> Self {
        Self::with(Ok(GeneratedContent {
            text: Some(text.to_string()),
            sources: Vec::new(),
        }))
    }

    fn with(response: Result<GeneratedContent, GenerationError>) -> Self {
        Self {
            response,
            calls: RefCell::new(Vec::new()),
        }
    }

    fn last_request(&self) -> GenerationRequest {
        self.calls.borrow().last().cloned().expect("generator was not called")
    }
}

impl Generator for FakeGenerator {
    fn generate(&self, request: &GenerationRequest) -> Result<GeneratedContent, GenerationError> {
        self.calls.borrow_mut().push(request.clone());
        self.response.clone()
    }
}

fn make_config() -> AnalystConfig {
    AnalystConfig::new("test-key")
}

fn make_request(prompt: &str, mode: AnalysisMode, records: Option<&str>) -> AnalysisRequest {
    AnalysisRequest {
        prompt: prompt.to_string(),
        mode,
        strategy: "Cost containment".to_string(),
        records: records.map(str::to_string),
    }
}

/// An 800-char chunk starting with `words`, padded with dots.
fn block(words: &str) -> String {
    let mut s = words.to_string();
    s.extend(std::iter::repeat('.').take(800 - words.len()));
    s
}

#[test]
fn quick_consult_sends_prompt_unchanged() {
    let service = ReportService::new(make_config(), FakeGenerator::replying("MARKET OUTLOOK"));

    let report = service
        .process(&make_request("Outlook for EU logistics", AnalysisMode::QuickConsult, Some("ignored")))
        .unwrap();

    let sent = service.generator().last_request();
    assert_eq!(sent.prompt, "Outlook for EU logistics");
    assert_eq!(sent.model, "gemini-3-pro-preview");
    assert!((sent.options.temperature - 0.1).abs() < f32::EPSILON);
    assert!(sent.options.enable_web_search);
    assert!(sent.system_instruction.contains("Strategy Focus: Cost containment."));

    assert_eq!(report.content, "MARKET OUTLOOK");
    assert_eq!(report.strategy_reference, "Cost containment");
    assert!(report.context.is_none());
}

#[test]
fn deep_analysis_prefixes_selected_context() {
    let records = [block("intro"), block("vendor kickback ledger"), block("closing")].concat();
    let service = ReportService::new(make_config(), FakeGenerator::replying("FINDINGS"));

    let report = service
        .process(&make_request("Trace the kickback", AnalysisMode::DeepAnalysis, Some(records.as_str())))
        .unwrap();

    let sent = service.generator().last_request();
    assert_eq!(
        sent.prompt,
        format!(
            "[INTERNAL DATASET AUDIT]\nSOURCE MATERIAL:\n{}\n\nDIRECTIVE: Trace the kickback",
            block("vendor kickback ledger")
        )
    );

    let context = report.context.expect("deep analysis carries context metadata");
    assert_eq!(context.selection.chunks_considered, 3);
    assert_eq!(context.chunks.len(), 1);
    assert_eq!(context.chunks[0].index, 1);
    assert!(!context.selection.fallback);
}

#[test]
fn deep_analysis_small_records_keep_every_chunk() {
    let records = [block("alpha"), block("beta")].concat();
    let service = ReportService::new(make_config(), FakeGenerator::replying("OK"));

    service
        .process(&make_request("zzz", AnalysisMode::DeepAnalysis, Some(records.as_str())))
        .unwrap();

    let sent = service.generator().last_request();
    assert!(sent
        .prompt
        .contains(&format!("{}{SEGMENT_SEPARATOR}{}", block("alpha"), block("beta"))));
}

#[test]
fn deep_analysis_without_records_sends_plain_prompt() {
    let service = ReportService::new(make_config(), FakeGenerator::replying("OK"));

    let report = service
        .process(&make_request("Assess exposure", AnalysisMode::DeepAnalysis, None))
        .unwrap();

    assert_eq!(service.generator().last_request().prompt, "Assess exposure");
    let context = report.context.unwrap();
    assert_eq!(context.context, "");
    assert!(context.selection.fallback);
}

#[test]
fn blank_prompt_is_rejected_before_calling_generator() {
    let service = ReportService::new(make_config(), FakeGenerator::replying("unused"));

    let err = service
        .process(&make_request("   \n", AnalysisMode::QuickConsult, None))
        .unwrap_err();

    assert_eq!(err, GenerationError::EmptyPrompt);
    assert!(service.generator().calls.borrow().is_empty());
}

#[test]
fn generator_errors_propagate() {
    let generator = FakeGenerator::with(Err(GenerationError::from_remote_message(
        "429 RESOURCE_EXHAUSTED",
    )));
    let service = ReportService::new(make_config(), generator);

    let err = service
        .process(&make_request("Outlook", AnalysisMode::QuickConsult, None))
        .unwrap_err();

    assert_eq!(err, GenerationError::CapacityExhausted);
    assert!(err.cooldown().is_some());
}

#[test]
fn empty_text_is_replaced_with_placeholder() {
    let generator = FakeGenerator::with(Ok(GeneratedContent {
        text: Some(String::new()),
        sources: Vec::new(),
    }));
    let service = ReportService::new(make_config(), generator);

    let report = service
        .process(&make_request("Outlook", AnalysisMode::QuickConsult, None))
        .unwrap();

    assert_eq!(report.content, "System report unavailable.");
}

#[test]
fn sources_are_normalized() {
    let generator = FakeGenerator::with(Ok(GeneratedContent {
        text: Some("REPORT".to_string()),
        sources: vec![
            SourceCandidate {
                title: None,
                uri: Some("https://stats.example/q3".to_string()),
            },
            SourceCandidate {
                title: Some("Dropped".to_string()),
                uri: None,
            },
            SourceCandidate {
                title: Some("Q3 statistics".to_string()),
                uri: Some("https://stats.example/q3".to_string()),
            },
        ],
    }));
    let service = ReportService::new(make_config(), generator);

    let report = service
        .process(&make_request("Outlook", AnalysisMode::QuickConsult, None))
        .unwrap();

    assert_eq!(report.sources.len(), 1);
    assert_eq!(report.sources[0].title, "Q3 statistics");
    assert_eq!(report.sources[0].uri, "https://stats.example/q3");
}

#[test]
fn telemetry_is_recorded() {
    let service = ReportService::new(make_config(), FakeGenerator::replying("OK"));

    let report = service
        .process(&make_request("Outlook", AnalysisMode::QuickConsult, None))
        .unwrap();

    let telemetry = report.telemetry;
    assert_eq!(telemetry.precision_level, "High Fidelity");
    assert!(telemetry.finished_at >= telemetry.started_at);
    assert!(telemetry.processing_time >= 0.0);
}

#[test]
fn config_overrides_flow_into_request() {
    let mut config = make_config();
    config.model = "analyst-large".to_string();
    config.temperature = 0.7;
    config.enable_web_search = false;

    let generator = FakeGenerator::replying("OK");
    let service = ReportService::new(config, &generator);
    service
        .process(&make_request("Outlook", AnalysisMode::QuickConsult, None))
        .unwrap();

    let sent = generator.last_request();
    assert_eq!(sent.model, "analyst-large");
    assert!((sent.options.temperature - 0.7).abs() < f32::EPSILON);
    assert!(!sent.options.enable_web_search);
}
