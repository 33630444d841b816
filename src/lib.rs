//! Umbrella crate for RiskScan message & URL risk analysis.
//!
//! This crate stitches together URL extraction, the two classifier
//! boundaries, verdict aggregation, and session history so callers can run a
//! whole analysis through a single entry point: build an [`Analyzer`] once
//! with shared classifier handles, then call [`Analyzer::analyze`] (or
//! [`Analyzer::analyze_and_record`]) per request.
//!
//! ## Request flow
//!
//! raw text → trim + silent truncation → route:
//!
//! - **Single-URL path** ([`is_single_url`]): the punctuation-stripped input
//!   is classified once by the URL checker; the overall verdict mirrors it.
//! - **Mixed-text path**: the text classifier evaluates the full (truncated)
//!   input, every extracted candidate is classified independently in
//!   candidate order, and the signals are merged by the deterministic
//!   aggregation rules in the `verdict` crate.
//!
//! The core is stateless across requests. The only caller-owned mutable
//! state is the per-session [`SessionHistory`], which must not be shared
//! across concurrent sessions.
//!
//! ## Failure semantics
//!
//! A classifier boundary failure is fatal for that single request: the error
//! surfaces as [`AnalyzeError::Classifier`] and nothing is written to
//! history. The core never guesses a safety class.

pub mod config;

pub use classify::{
    ClassifierError, ReasonCode, TextClassifier, TextVerdict, UrlCheck, UrlClassifier,
};
pub use extract::{ExtractConfig, ExtractError, extract, is_single_url, strip_url_punctuation};
pub use history::{
    DisplayEntry, HistoryConfig, HistoryEntry, HistoryError, Language, SessionHistory, class_icon,
    class_label, ml_message, reason_message, render_message, summary_message,
};
pub use verdict::{
    InputKind, MessageDescriptor, OverallVerdict, ResultClass, UrlVerdict, VerdictConfig,
    VerdictError, aggregate_mixed, aggregate_single, classify_input_kind, round2,
};

use std::sync::{Arc, OnceLock, RwLock};
use std::time::{Duration, Instant};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{Level, info, warn};

/// Errors surfaced by the analysis pipeline.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AnalyzeError {
    #[error("invalid analyze configuration: {0}")]
    InvalidConfig(String),
    /// A classifier boundary failed; the request has no verdict.
    #[error("classifier boundary failed: {0}")]
    Classifier(#[from] ClassifierError),
}

/// Runtime configuration for the analysis pipeline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalyzeConfig {
    /// Semantic version of the pipeline configuration.
    pub version: u32,
    /// Maximum number of characters analyzed per request. Longer input is
    /// silently truncated before any extraction or classification.
    #[serde(default = "AnalyzeConfig::default_max_analysis_chars")]
    pub max_analysis_chars: usize,
    /// Maximum number of characters of input stored in a history entry.
    #[serde(default = "AnalyzeConfig::default_max_history_snippet_chars")]
    pub max_history_snippet_chars: usize,
    /// Extraction stage configuration.
    #[serde(default)]
    pub extract: ExtractConfig,
    /// Aggregation stage configuration.
    #[serde(default)]
    pub verdict: VerdictConfig,
}

impl AnalyzeConfig {
    pub(crate) fn default_max_analysis_chars() -> usize {
        8000
    }

    pub(crate) fn default_max_history_snippet_chars() -> usize {
        180
    }

    /// Validate this configuration and every embedded stage configuration.
    pub fn validate(&self) -> Result<(), AnalyzeError> {
        if self.version == 0 {
            return Err(AnalyzeError::InvalidConfig("version must be >= 1".into()));
        }
        if self.max_analysis_chars == 0 {
            return Err(AnalyzeError::InvalidConfig(
                "max_analysis_chars must be >= 1".into(),
            ));
        }
        if self.max_history_snippet_chars == 0 {
            return Err(AnalyzeError::InvalidConfig(
                "max_history_snippet_chars must be >= 1".into(),
            ));
        }
        self.extract
            .validate()
            .map_err(|err| AnalyzeError::InvalidConfig(err.to_string()))?;
        self.verdict
            .validate()
            .map_err(|err| AnalyzeError::InvalidConfig(err.to_string()))?;
        Ok(())
    }
}

impl Default for AnalyzeConfig {
    fn default() -> Self {
        Self {
            version: 1,
            max_analysis_chars: Self::default_max_analysis_chars(),
            max_history_snippet_chars: Self::default_max_history_snippet_chars(),
            extract: ExtractConfig::default(),
            verdict: VerdictConfig::default(),
        }
    }
}

/// Metrics observer for analysis stages.
pub trait AnalysisMetrics: Send + Sync {
    fn record_extract(&self, latency: Duration, candidates: usize);
    fn record_text_classification(&self, latency: Duration, result: Result<(), ClassifierError>);
    fn record_url_classification(&self, latency: Duration, result: Result<(), ClassifierError>);
}

/// Install or clear the global analysis metrics recorder.
///
/// Typically called once during service startup so every [`Analyzer`] shares
/// the same metrics backend.
pub fn set_analysis_metrics(recorder: Option<Arc<dyn AnalysisMetrics>>) {
    let lock = metrics_lock();
    let mut guard = lock.write().expect("analysis metrics lock poisoned");
    *guard = recorder;
}

fn metrics_lock() -> &'static RwLock<Option<Arc<dyn AnalysisMetrics>>> {
    static METRICS: OnceLock<RwLock<Option<Arc<dyn AnalysisMetrics>>>> = OnceLock::new();
    METRICS.get_or_init(|| RwLock::new(None))
}

fn metrics_recorder() -> Option<Arc<dyn AnalysisMetrics>> {
    let guard = metrics_lock()
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    guard.clone()
}

struct MetricsSpan {
    recorder: Arc<dyn AnalysisMetrics>,
    start: Instant,
}

impl MetricsSpan {
    fn start() -> Option<Self> {
        metrics_recorder().map(|recorder| Self {
            recorder,
            start: Instant::now(),
        })
    }

    fn record_extract(self, candidates: usize) {
        self.recorder
            .record_extract(self.start.elapsed(), candidates);
    }

    fn record_text(self, result: Result<(), ClassifierError>) {
        self.recorder
            .record_text_classification(self.start.elapsed(), result);
    }

    fn record_url(self, result: Result<(), ClassifierError>) {
        self.recorder
            .record_url_classification(self.start.elapsed(), result);
    }
}

/// The outcome of one analysis request.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Analysis {
    /// History tag for this input shape (`Url`, `Text`, or `Email`).
    pub kind: InputKind,
    pub verdict: OverallVerdict,
    /// The text that was actually analyzed: trimmed and truncated input.
    pub analyzed_text: String,
    /// Bounded snippet of the analyzed text, ready for a history entry.
    pub snippet: String,
}

impl Analysis {
    /// Renders the overall result message for display.
    pub fn message(&self, lang: Language) -> String {
        render_message(&self.verdict.message, lang)
    }
}

/// The analysis pipeline: shared classifier handles plus configuration.
///
/// Classifier instances are constructed once (model load happens there) and
/// shared by reference for the process lifetime; no mid-process reload. The
/// analyzer itself holds no per-request state and can serve requests from
/// multiple threads.
pub struct Analyzer {
    url_classifier: Arc<dyn UrlClassifier>,
    text_classifier: Arc<dyn TextClassifier>,
    cfg: AnalyzeConfig,
}

impl Analyzer {
    /// Construct an analyzer from shared classifier handles and explicit
    /// configuration. The configuration is validated up front.
    pub fn new(
        url_classifier: Arc<dyn UrlClassifier>,
        text_classifier: Arc<dyn TextClassifier>,
        cfg: AnalyzeConfig,
    ) -> Result<Self, AnalyzeError> {
        cfg.validate()?;
        Ok(Self {
            url_classifier,
            text_classifier,
            cfg,
        })
    }

    /// The active pipeline configuration.
    pub fn config(&self) -> &AnalyzeConfig {
        &self.cfg
    }

    /// Runs one analysis request end-to-end.
    ///
    /// Input is trimmed, then silently truncated to
    /// [`AnalyzeConfig::max_analysis_chars`] characters before anything else
    /// happens. Malformed or pathological input never errors; only a
    /// classifier boundary failure does.
    pub fn analyze(&self, input: &str) -> Result<Analysis, AnalyzeError> {
        let start = Instant::now();
        let analyzed = truncate_chars(input.trim(), self.cfg.max_analysis_chars);

        let span = tracing::span!(Level::INFO, "riskscan.analyze", input_len = analyzed.len());
        let _guard = span.enter();

        let result = self.analyze_inner(analyzed);
        match &result {
            Ok(analysis) => info!(
                kind = analysis.kind.as_str(),
                class = analysis.verdict.class.as_str(),
                confidence = ?analysis.verdict.confidence,
                urls = analysis.verdict.url_verdicts.len(),
                elapsed_micros = start.elapsed().as_micros(),
                "analysis_success"
            ),
            Err(err) => warn!(error = %err, "analysis_failure"),
        }
        result
    }

    /// Runs [`Analyzer::analyze`], then appends one bounded entry to the
    /// caller's session history.
    ///
    /// Nothing is recorded for an empty input or a failed request — a failed
    /// request performs no partial write.
    pub fn analyze_and_record(
        &self,
        input: &str,
        session_history: &mut SessionHistory,
    ) -> Result<Analysis, AnalyzeError> {
        let analysis = self.analyze(input)?;
        if !analysis.snippet.is_empty() {
            session_history.record(HistoryEntry {
                at: Utc::now(),
                kind: analysis.kind,
                input: analysis.snippet.clone(),
                result_class: analysis.verdict.class,
                confidence: analysis.verdict.confidence,
                message: analysis.verdict.message.clone(),
            });
        }
        Ok(analysis)
    }

    fn analyze_inner(&self, analyzed: String) -> Result<Analysis, AnalyzeError> {
        let snippet = truncate_chars(&analyzed, self.cfg.max_history_snippet_chars);

        if is_single_url(&analyzed) {
            let candidate = strip_url_punctuation(&analyzed);
            let check = self.check_url(candidate)?;
            let url_verdict = UrlVerdict::from_check(candidate, check, &self.cfg.verdict);
            return Ok(Analysis {
                kind: InputKind::Url,
                verdict: aggregate_single(url_verdict),
                analyzed_text: analyzed,
                snippet,
            });
        }

        // The text classifier sees the whole input even when it also
        // contains URLs; every candidate is then scored independently and
        // merged in candidate order.
        let text_verdict = self.check_text(&analyzed)?;
        let candidates = self.extract_candidates(&analyzed);
        let mut url_verdicts = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            let check = self.check_url(&candidate)?;
            url_verdicts.push(UrlVerdict::from_check(candidate, check, &self.cfg.verdict));
        }

        let kind = classify_input_kind(&analyzed, url_verdicts.len());
        Ok(Analysis {
            kind,
            verdict: aggregate_mixed(&text_verdict, url_verdicts),
            analyzed_text: analyzed,
            snippet,
        })
    }

    fn extract_candidates(&self, text: &str) -> Vec<String> {
        let metrics = MetricsSpan::start();
        let candidates = extract(text, &self.cfg.extract);
        if let Some(span) = metrics {
            span.record_extract(candidates.len());
        }
        candidates
    }

    fn check_url(&self, url: &str) -> Result<UrlCheck, AnalyzeError> {
        let metrics = MetricsSpan::start();
        match self.url_classifier.classify_url(url) {
            Ok(check) => {
                if let Some(span) = metrics {
                    span.record_url(Ok(()));
                }
                Ok(check)
            }
            Err(err) => {
                if let Some(span) = metrics {
                    span.record_url(Err(err.clone()));
                }
                warn!(error = %err, "url_classification_failure");
                Err(err.into())
            }
        }
    }

    fn check_text(&self, text: &str) -> Result<TextVerdict, AnalyzeError> {
        let metrics = MetricsSpan::start();
        let outcome = self
            .text_classifier
            .classify_text(text)
            .and_then(validate_text_verdict);
        match outcome {
            Ok(text_verdict) => {
                if let Some(span) = metrics {
                    span.record_text(Ok(()));
                }
                Ok(text_verdict)
            }
            Err(err) => {
                if let Some(span) = metrics {
                    span.record_text(Err(err.clone()));
                }
                warn!(error = %err, "text_classification_failure");
                Err(err.into())
            }
        }
    }
}

/// Enforces the text-classifier contract at the boundary: a confidence
/// outside [0, 100] (or non-finite) is malformed output, and valid output is
/// rounded to two decimal places.
fn validate_text_verdict(raw: TextVerdict) -> Result<TextVerdict, ClassifierError> {
    if !raw.confidence.is_finite() || !(0.0..=100.0).contains(&raw.confidence) {
        return Err(ClassifierError::MalformedOutput(format!(
            "text confidence {} outside [0, 100]",
            raw.confidence
        )));
    }
    Ok(TextVerdict {
        confidence: round2(raw.confidence),
        ..raw
    })
}

/// Truncates to at most `max_chars` characters, respecting UTF-8 boundaries.
fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}
