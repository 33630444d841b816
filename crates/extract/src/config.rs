//! Configuration for the extraction stage.

use serde::{Deserialize, Serialize};

use crate::error::ExtractError;

/// Runtime configuration for URL extraction.
///
/// Cheap to clone and serde-friendly so it can be embedded in higher-level
/// configuration files.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExtractConfig {
    /// Semantic version of the extraction configuration.
    ///
    /// Any behavior change to the scan (pattern families, stripping policy,
    /// dedup rules) must be accompanied by a version bump so stored results
    /// can be attributed to the scan that produced them.
    pub version: u32,
    /// Maximum number of candidates returned per analysis. Later candidates
    /// are silently dropped, not an error.
    #[serde(default = "ExtractConfig::default_max_urls")]
    pub max_urls: usize,
}

impl ExtractConfig {
    pub(crate) fn default_max_urls() -> usize {
        10
    }

    /// Validate the configuration before use.
    pub fn validate(&self) -> Result<(), ExtractError> {
        if self.version == 0 {
            return Err(ExtractError::InvalidConfig(
                "version must be >= 1".into(),
            ));
        }
        if self.max_urls == 0 {
            return Err(ExtractError::InvalidConfig(
                "max_urls must be >= 1".into(),
            ));
        }
        Ok(())
    }
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            version: 1,
            max_urls: Self::default_max_urls(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let cfg = ExtractConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.max_urls, 10);
    }

    #[test]
    fn zero_max_urls_rejected() {
        let cfg = ExtractConfig {
            max_urls: 0,
            ..Default::default()
        };
        let err = cfg.validate().expect_err("config should be invalid");
        assert!(err.to_string().contains("max_urls"));
    }

    #[test]
    fn zero_version_rejected() {
        let cfg = ExtractConfig {
            version: 0,
            ..Default::default()
        };
        assert!(cfg.validate().is_err());
    }
}
