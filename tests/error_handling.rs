use std::sync::Arc;

use riskscan::{
    AnalyzeConfig, AnalyzeError, Analyzer, ClassifierError, HistoryConfig, ReasonCode,
    SessionHistory, TextClassifier, TextVerdict, UrlCheck, UrlClassifier,
};

struct HealthyUrlClassifier;

impl UrlClassifier for HealthyUrlClassifier {
    fn classify_url(&self, _url: &str) -> Result<UrlCheck, ClassifierError> {
        Ok(UrlCheck {
            is_safe: true,
            reason: ReasonCode::LooksSafe,
        })
    }
}

struct BrokenUrlClassifier;

impl UrlClassifier for BrokenUrlClassifier {
    fn classify_url(&self, _url: &str) -> Result<UrlCheck, ClassifierError> {
        Err(ClassifierError::Unavailable("heuristic table missing".into()))
    }
}

struct HealthyTextClassifier;

impl TextClassifier for HealthyTextClassifier {
    fn classify_text(&self, _text: &str) -> Result<TextVerdict, ClassifierError> {
        Ok(TextVerdict {
            is_unsafe: false,
            confidence: 60.0,
        })
    }
}

struct BrokenTextClassifier;

impl TextClassifier for BrokenTextClassifier {
    fn classify_text(&self, _text: &str) -> Result<TextVerdict, ClassifierError> {
        Err(ClassifierError::Unavailable("model not loaded".into()))
    }
}

struct NanTextClassifier;

impl TextClassifier for NanTextClassifier {
    fn classify_text(&self, _text: &str) -> Result<TextVerdict, ClassifierError> {
        Ok(TextVerdict {
            is_unsafe: true,
            confidence: f64::NAN,
        })
    }
}

#[test]
fn url_classifier_failure_aborts_the_request() {
    let analyzer = Analyzer::new(
        Arc::new(BrokenUrlClassifier),
        Arc::new(HealthyTextClassifier),
        AnalyzeConfig::default(),
    )
    .expect("valid config");

    let err = analyzer
        .analyze("https://example.com")
        .expect_err("must fail");
    assert!(matches!(
        err,
        AnalyzeError::Classifier(ClassifierError::Unavailable(_))
    ));
}

#[test]
fn text_classifier_failure_aborts_the_request() {
    let analyzer = Analyzer::new(
        Arc::new(HealthyUrlClassifier),
        Arc::new(BrokenTextClassifier),
        AnalyzeConfig::default(),
    )
    .expect("valid config");

    let err = analyzer.analyze("any message").expect_err("must fail");
    assert!(matches!(
        err,
        AnalyzeError::Classifier(ClassifierError::Unavailable(_))
    ));
}

#[test]
fn failed_request_writes_nothing_to_history() {
    let analyzer = Analyzer::new(
        Arc::new(HealthyUrlClassifier),
        Arc::new(BrokenTextClassifier),
        AnalyzeConfig::default(),
    )
    .expect("valid config");
    let mut history = SessionHistory::new(&HistoryConfig::default());

    let result = analyzer.analyze_and_record("a message", &mut history);
    assert!(result.is_err());
    assert!(history.is_empty());
}

#[test]
fn non_finite_confidence_is_malformed_output() {
    let analyzer = Analyzer::new(
        Arc::new(HealthyUrlClassifier),
        Arc::new(NanTextClassifier),
        AnalyzeConfig::default(),
    )
    .expect("valid config");

    let err = analyzer.analyze("a message").expect_err("must fail");
    assert!(matches!(
        err,
        AnalyzeError::Classifier(ClassifierError::MalformedOutput(_))
    ));
}

#[test]
fn pathological_inputs_never_error() {
    let analyzer = Analyzer::new(
        Arc::new(HealthyUrlClassifier),
        Arc::new(HealthyTextClassifier),
        AnalyzeConfig::default(),
    )
    .expect("valid config");

    for input in ["", "   ", "!?!?!?....", &"x".repeat(20_000)] {
        let analysis = analyzer.analyze(input).expect("analysis succeeds");
        assert!(analysis.verdict.url_verdicts.is_empty());
        assert!(analysis.analyzed_text.chars().count() <= 8000);
    }
}

#[test]
fn invalid_configs_are_rejected_up_front() {
    let cases = [
        AnalyzeConfig {
            version: 0,
            ..Default::default()
        },
        AnalyzeConfig {
            max_analysis_chars: 0,
            ..Default::default()
        },
        AnalyzeConfig {
            extract: riskscan::ExtractConfig {
                max_urls: 0,
                ..Default::default()
            },
            ..Default::default()
        },
        AnalyzeConfig {
            verdict: riskscan::VerdictConfig {
                unsafe_url_confidence: -5.0,
                ..Default::default()
            },
            ..Default::default()
        },
    ];

    for cfg in cases {
        let result = Analyzer::new(
            Arc::new(HealthyUrlClassifier),
            Arc::new(HealthyTextClassifier),
            cfg,
        );
        assert!(matches!(result, Err(AnalyzeError::InvalidConfig(_))));
    }
}
