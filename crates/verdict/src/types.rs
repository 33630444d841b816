use classify::{ReasonCode, UrlCheck};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Overall safety classification of an analysis.
///
/// The aggregator only ever produces `Safe` or `Unsafe`. `Unknown` exists for
/// the storage boundary: foreign or corrupt session data deserializes to it
/// and is skipped at render time instead of failing the whole history.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(from = "String", into = "String")]
pub enum ResultClass {
    Safe,
    Unsafe,
    Unknown,
}

impl ResultClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResultClass::Safe => "safe",
            ResultClass::Unsafe => "unsafe",
            ResultClass::Unknown => "unknown",
        }
    }
}

impl From<String> for ResultClass {
    fn from(value: String) -> Self {
        match value.as_str() {
            "safe" => ResultClass::Safe,
            "unsafe" => ResultClass::Unsafe,
            _ => ResultClass::Unknown,
        }
    }
}

impl From<ResultClass> for String {
    fn from(class: ResultClass) -> Self {
        class.as_str().to_string()
    }
}

/// Shape of the analyzed input, recorded alongside each history entry.
///
/// `Unknown` is the storage-boundary escape hatch; it renders as `Text`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(from = "String", into = "String")]
pub enum InputKind {
    Url,
    Text,
    Email,
    Unknown,
}

impl InputKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            InputKind::Url => "url",
            InputKind::Text => "text",
            InputKind::Email => "email",
            InputKind::Unknown => "unknown",
        }
    }
}

impl From<String> for InputKind {
    fn from(value: String) -> Self {
        match value.as_str() {
            "url" => InputKind::Url,
            "text" => InputKind::Text,
            "email" => InputKind::Email,
            _ => InputKind::Unknown,
        }
    }
}

impl From<InputKind> for String {
    fn from(kind: InputKind) -> Self {
        kind.as_str().to_string()
    }
}

/// Configuration for verdict aggregation.
///
/// The two URL confidence constants are display placeholders, not calibrated
/// probabilities. They are deliberately configurable rather than derived;
/// changing the scale is a product decision.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VerdictConfig {
    /// Semantic version of the aggregation configuration.
    pub version: u32,
    /// Display confidence assigned to a URL the heuristic checker accepts.
    #[serde(default = "VerdictConfig::default_safe_url_confidence")]
    pub safe_url_confidence: f64,
    /// Display confidence assigned to a URL the heuristic checker flags.
    #[serde(default = "VerdictConfig::default_unsafe_url_confidence")]
    pub unsafe_url_confidence: f64,
}

impl VerdictConfig {
    pub(crate) fn default_safe_url_confidence() -> f64 {
        90.0
    }

    pub(crate) fn default_unsafe_url_confidence() -> f64 {
        85.0
    }

    /// Validate the configuration for use by the aggregator.
    pub fn validate(&self) -> Result<(), VerdictError> {
        if self.version == 0 {
            return Err(VerdictError::InvalidConfig(
                "version must be >= 1".into(),
            ));
        }
        for (field, value) in [
            ("safe_url_confidence", self.safe_url_confidence),
            ("unsafe_url_confidence", self.unsafe_url_confidence),
        ] {
            if !value.is_finite() || !(0.0..=100.0).contains(&value) {
                return Err(VerdictError::InvalidConfig(format!(
                    "{field} must be within [0, 100]"
                )));
            }
        }
        Ok(())
    }
}

impl Default for VerdictConfig {
    fn default() -> Self {
        Self {
            version: 1,
            safe_url_confidence: Self::default_safe_url_confidence(),
            unsafe_url_confidence: Self::default_unsafe_url_confidence(),
        }
    }
}

/// Errors produced by the verdict layer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VerdictError {
    #[error("invalid verdict configuration: {0}")]
    InvalidConfig(String),
}

/// Safety verdict for one extracted URL candidate. Immutable once produced.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UrlVerdict {
    /// The candidate in its original casing.
    pub url: String,
    pub is_safe: bool,
    pub reason: ReasonCode,
    /// Fixed display confidence for this outcome (see [`VerdictConfig`]).
    pub confidence: f64,
}

impl UrlVerdict {
    /// Build the verdict for one candidate from the checker's output,
    /// assigning the configured per-outcome confidence constant.
    pub fn from_check(url: impl Into<String>, check: UrlCheck, cfg: &VerdictConfig) -> Self {
        let confidence = if check.is_safe {
            cfg.safe_url_confidence
        } else {
            cfg.unsafe_url_confidence
        };
        Self {
            url: url.into(),
            is_safe: check.is_safe,
            reason: check.reason,
            confidence,
        }
    }
}

/// Language-independent description of the result message.
///
/// History stores this descriptor rather than a rendered string, so past
/// analyses re-render in any supported display language without being
/// re-classified.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MessageDescriptor {
    /// Single-URL mode: the checker's categorical reason.
    UrlReason { reason: ReasonCode },
    /// Mixed mode without URL candidates: the text classifier's own message.
    MlVerdict { is_unsafe: bool },
    /// Mixed mode with URL candidates: text verdict label plus URL tally.
    Summary {
        text_class: ResultClass,
        urls_total: usize,
        urls_unsafe: usize,
    },
}

/// The combined outcome of one analysis. Never mutated after construction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OverallVerdict {
    pub class: ResultClass,
    /// Percentage in [0, 100], rounded to two decimals. `None` only in the
    /// defensive no-contributor case, which the aggregation rules make
    /// unreachable in practice.
    pub confidence: Option<f64>,
    pub message: MessageDescriptor,
    /// Per-URL detail, in candidate discovery order.
    pub url_verdicts: Vec<UrlVerdict>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let cfg = VerdictConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.safe_url_confidence, 90.0);
        assert_eq!(cfg.unsafe_url_confidence, 85.0);
    }

    #[test]
    fn out_of_range_confidence_rejected() {
        let cfg = VerdictConfig {
            safe_url_confidence: 120.0,
            ..Default::default()
        };
        let err = cfg.validate().expect_err("config should be invalid");
        match err {
            VerdictError::InvalidConfig(msg) => assert!(msg.contains("safe_url_confidence")),
        }

        let cfg = VerdictConfig {
            unsafe_url_confidence: f64::NAN,
            ..Default::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn result_class_tolerates_foreign_values() {
        let class: ResultClass = serde_json::from_str("\"suspicious\"").expect("deserialize");
        assert_eq!(class, ResultClass::Unknown);
        let class: ResultClass = serde_json::from_str("\"unsafe\"").expect("deserialize");
        assert_eq!(class, ResultClass::Unsafe);
    }

    #[test]
    fn input_kind_tolerates_foreign_values() {
        let kind: InputKind = serde_json::from_str("\"attachment\"").expect("deserialize");
        assert_eq!(kind, InputKind::Unknown);
        let kind: InputKind = serde_json::from_str("\"email\"").expect("deserialize");
        assert_eq!(kind, InputKind::Email);
    }

    #[test]
    fn url_verdict_takes_configured_constants() {
        let cfg = VerdictConfig::default();
        let safe = UrlVerdict::from_check(
            "example.com",
            UrlCheck {
                is_safe: true,
                reason: ReasonCode::LooksSafe,
            },
            &cfg,
        );
        assert_eq!(safe.confidence, 90.0);

        let unsafe_verdict = UrlVerdict::from_check(
            "secure-login-paypal.com",
            UrlCheck {
                is_safe: false,
                reason: ReasonCode::SuspiciousKeyword,
            },
            &cfg,
        );
        assert_eq!(unsafe_verdict.confidence, 85.0);
    }

    #[test]
    fn message_descriptor_serializes_tagged() {
        let desc = MessageDescriptor::Summary {
            text_class: ResultClass::Safe,
            urls_total: 2,
            urls_unsafe: 1,
        };
        let json = serde_json::to_value(&desc).expect("serialize");
        assert_eq!(json["type"], "summary");
        assert_eq!(json["text_class"], "safe");
        assert_eq!(json["urls_unsafe"], 1);
    }
}
