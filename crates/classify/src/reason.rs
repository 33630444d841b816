//! Categorical reason codes emitted by the single-URL checker.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Why a URL was judged safe or unsafe.
///
/// Serialized as the canonical English message string so stored history
/// survives enum evolution: a code this build does not know comes back as
/// [`ReasonCode::Other`] and is displayed raw instead of erroring.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(from = "String", into = "String")]
pub enum ReasonCode {
    /// The value does not parse as a URL at all.
    InvalidFormat,
    /// The domain contains a keyword common in phishing lures.
    SuspiciousKeyword,
    /// The hostname nests more subdomains than legitimate sites use.
    TooManySubdomains,
    /// None of the heuristics fired.
    LooksSafe,
    /// A code introduced after this build; kept verbatim for display.
    Other(String),
}

impl ReasonCode {
    /// Canonical English message for this code.
    pub fn as_str(&self) -> &str {
        match self {
            ReasonCode::InvalidFormat => "Invalid URL format",
            ReasonCode::SuspiciousKeyword => "Suspicious keyword found in domain",
            ReasonCode::TooManySubdomains => "Too many subdomains",
            ReasonCode::LooksSafe => "URL looks safe",
            ReasonCode::Other(raw) => raw.as_str(),
        }
    }
}

impl fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for ReasonCode {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Invalid URL format" => ReasonCode::InvalidFormat,
            "Suspicious keyword found in domain" => ReasonCode::SuspiciousKeyword,
            "Too many subdomains" => ReasonCode::TooManySubdomains,
            "URL looks safe" => ReasonCode::LooksSafe,
            _ => ReasonCode::Other(value),
        }
    }
}

impl From<ReasonCode> for String {
    fn from(code: ReasonCode) -> Self {
        match code {
            ReasonCode::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_round_trip() {
        for code in [
            ReasonCode::InvalidFormat,
            ReasonCode::SuspiciousKeyword,
            ReasonCode::TooManySubdomains,
            ReasonCode::LooksSafe,
        ] {
            let back = ReasonCode::from(String::from(code.clone()));
            assert_eq!(back, code);
        }
    }

    #[test]
    fn unknown_code_degrades_to_raw_display() {
        let code = ReasonCode::from("Certificate pinning mismatch".to_string());
        assert_eq!(
            code,
            ReasonCode::Other("Certificate pinning mismatch".into())
        );
        assert_eq!(code.as_str(), "Certificate pinning mismatch");
    }

    #[test]
    fn serde_uses_message_strings() {
        let json = serde_json::to_string(&ReasonCode::LooksSafe).expect("serialize");
        assert_eq!(json, "\"URL looks safe\"");
        let back: ReasonCode = serde_json::from_str("\"Brand impersonation\"").expect("deserialize");
        assert_eq!(back, ReasonCode::Other("Brand impersonation".into()));
    }
}
