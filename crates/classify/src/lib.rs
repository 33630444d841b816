//! Classifier boundary contracts for RiskScan.
//!
//! The two classifiers the pipeline consumes — a heuristic single-URL checker
//! and a whole-text classifier — are black boxes behind capability traits.
//! Any implementation (rule engine, trained model, remote service) can be
//! substituted without touching the extractor or the aggregator, as long as
//! it honors the contract:
//!
//! - **Deterministic**: same input, same output, always.
//! - **Total**: defined over any input in the documented domain (any
//!   non-empty string for URLs, any string up to the configured length for
//!   text).
//! - **Pure**: no observable side effects; the core never retries, caches,
//!   or batches a call.
//!
//! A boundary failure is fatal for the single request it served. The core has
//! no fallback verdict — guessing a safety class would be a security defect —
//! so failures surface to the caller as [`ClassifierError`] and nothing is
//! written to history.

mod reason;

pub use crate::reason::ReasonCode;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Outcome of the heuristic single-URL check.
///
/// The checker returns no numeric confidence, only a categorical reason; the
/// aggregator assigns a fixed display confidence per outcome.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UrlCheck {
    pub is_safe: bool,
    pub reason: ReasonCode,
}

/// Outcome of the whole-text classification.
///
/// `confidence` is a percentage in [0, 100]; the pipeline validates the range
/// and rounds to two decimal places at the boundary.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct TextVerdict {
    pub is_unsafe: bool,
    pub confidence: f64,
}

/// Errors surfaced by a classifier boundary.
///
/// Either variant aborts the request that triggered the call; the caller
/// decides presentation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClassifierError {
    /// The classifier could not be reached or did not answer in time.
    #[error("classifier unavailable: {0}")]
    Unavailable(String),
    /// The classifier answered with data outside its contract.
    #[error("classifier returned malformed output: {0}")]
    MalformedOutput(String),
}

/// Capability interface for the heuristic single-URL checker.
///
/// Instances are constructed once per process and shared by reference; the
/// pipeline holds an `Arc<dyn UrlClassifier>` for its whole lifetime.
pub trait UrlClassifier: Send + Sync {
    fn classify_url(&self, url: &str) -> Result<UrlCheck, ClassifierError>;
}

/// Capability interface for the whole-text classifier.
pub trait TextClassifier: Send + Sync {
    fn classify_text(&self, text: &str) -> Result<TextVerdict, ClassifierError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct AlwaysSafe;

    impl UrlClassifier for AlwaysSafe {
        fn classify_url(&self, _url: &str) -> Result<UrlCheck, ClassifierError> {
            Ok(UrlCheck {
                is_safe: true,
                reason: ReasonCode::LooksSafe,
            })
        }
    }

    #[test]
    fn trait_objects_are_shareable() {
        let checker: std::sync::Arc<dyn UrlClassifier> = std::sync::Arc::new(AlwaysSafe);
        let check = checker.classify_url("example.com").expect("check succeeds");
        assert!(check.is_safe);
        assert_eq!(check.reason, ReasonCode::LooksSafe);
    }

    #[test]
    fn errors_are_comparable_for_tests() {
        let a = ClassifierError::Unavailable("model missing".into());
        let b = ClassifierError::Unavailable("model missing".into());
        assert_eq!(a, b);
        assert!(a.to_string().contains("model missing"));
    }

    #[test]
    fn url_check_round_trips_through_serde() {
        let check = UrlCheck {
            is_safe: false,
            reason: ReasonCode::SuspiciousKeyword,
        };
        let json = serde_json::to_string(&check).expect("serialize");
        let back: UrlCheck = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(check, back);
    }
}
