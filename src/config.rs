//! YAML configuration file support for RiskScan.
//!
//! This module lets deployments define every stage configuration (analysis
//! limits, extraction, verdict constants, history bounds) in a single YAML
//! file and load it at runtime.
//!
//! ## Example YAML configuration
//!
//! ```yaml
//! # RiskScan pipeline configuration
//! version: "1.0"
//!
//! limits:
//!   max_analysis_chars: 8000
//!   max_history_snippet_chars: 180
//!
//! extract:
//!   version: 1
//!   max_urls: 10
//!
//! verdict:
//!   version: 1
//!   safe_url_confidence: 90.0
//!   unsafe_url_confidence: 85.0
//!
//! history:
//!   version: 1
//!   max_entries: 12
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{AnalyzeConfig, ExtractConfig, HistoryConfig, VerdictConfig};

/// Errors that can occur when loading YAML configuration files.
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("unsupported config version: {0}")]
    UnsupportedVersion(String),
}

/// Top-level YAML configuration for the whole RiskScan pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskscanConfig {
    /// Configuration format version.
    pub version: String,

    /// Optional configuration name/description.
    #[serde(default)]
    pub name: Option<String>,

    /// Analysis input limits.
    #[serde(default)]
    pub limits: LimitsYamlConfig,

    /// Extraction stage configuration.
    #[serde(default)]
    pub extract: ExtractYamlConfig,

    /// Verdict aggregation configuration.
    #[serde(default)]
    pub verdict: VerdictYamlConfig,

    /// Session history configuration.
    #[serde(default)]
    pub history: HistoryYamlConfig,
}

impl RiskscanConfig {
    /// Load a YAML configuration file from the given path.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigLoadError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse YAML configuration from a string.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        let config: RiskscanConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<(), ConfigLoadError> {
        match self.version.as_str() {
            "1.0" | "1" => Ok(()),
            v => Err(ConfigLoadError::UnsupportedVersion(v.to_string())),
        }?;

        self.limits.validate()?;
        self.extract.validate()?;
        self.verdict.validate()?;
        self.history.validate()?;

        Ok(())
    }

    /// Materialize the pipeline configuration for [`crate::Analyzer::new`].
    pub fn analyze_config(&self) -> AnalyzeConfig {
        AnalyzeConfig {
            version: 1,
            max_analysis_chars: self.limits.max_analysis_chars,
            max_history_snippet_chars: self.limits.max_history_snippet_chars,
            extract: ExtractConfig {
                version: self.extract.version,
                max_urls: self.extract.max_urls,
            },
            verdict: VerdictConfig {
                version: self.verdict.version,
                safe_url_confidence: self.verdict.safe_url_confidence,
                unsafe_url_confidence: self.verdict.unsafe_url_confidence,
            },
        }
    }

    /// Materialize the session history configuration.
    pub fn history_config(&self) -> HistoryConfig {
        HistoryConfig {
            version: self.history.version,
            max_entries: self.history.max_entries,
        }
    }
}

impl Default for RiskscanConfig {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            name: None,
            limits: LimitsYamlConfig::default(),
            extract: ExtractYamlConfig::default(),
            verdict: VerdictYamlConfig::default(),
            history: HistoryYamlConfig::default(),
        }
    }
}

/// Analysis limits section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitsYamlConfig {
    #[serde(default = "default_max_analysis_chars")]
    pub max_analysis_chars: usize,

    #[serde(default = "default_max_history_snippet_chars")]
    pub max_history_snippet_chars: usize,
}

impl LimitsYamlConfig {
    fn validate(&self) -> Result<(), ConfigLoadError> {
        if self.max_analysis_chars == 0 {
            return Err(ConfigLoadError::Validation(
                "limits.max_analysis_chars must be >= 1".to_string(),
            ));
        }
        if self.max_history_snippet_chars == 0 {
            return Err(ConfigLoadError::Validation(
                "limits.max_history_snippet_chars must be >= 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for LimitsYamlConfig {
    fn default() -> Self {
        Self {
            max_analysis_chars: default_max_analysis_chars(),
            max_history_snippet_chars: default_max_history_snippet_chars(),
        }
    }
}

/// Extraction stage section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractYamlConfig {
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default = "default_max_urls")]
    pub max_urls: usize,
}

impl ExtractYamlConfig {
    fn validate(&self) -> Result<(), ConfigLoadError> {
        if self.version == 0 {
            return Err(ConfigLoadError::Validation(
                "extract.version must be >= 1".to_string(),
            ));
        }
        if self.max_urls == 0 {
            return Err(ConfigLoadError::Validation(
                "extract.max_urls must be >= 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for ExtractYamlConfig {
    fn default() -> Self {
        Self {
            version: 1,
            max_urls: default_max_urls(),
        }
    }
}

/// Verdict aggregation section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerdictYamlConfig {
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default = "default_safe_url_confidence")]
    pub safe_url_confidence: f64,

    #[serde(default = "default_unsafe_url_confidence")]
    pub unsafe_url_confidence: f64,
}

impl VerdictYamlConfig {
    fn validate(&self) -> Result<(), ConfigLoadError> {
        if self.version == 0 {
            return Err(ConfigLoadError::Validation(
                "verdict.version must be >= 1".to_string(),
            ));
        }
        for (field, value) in [
            ("verdict.safe_url_confidence", self.safe_url_confidence),
            ("verdict.unsafe_url_confidence", self.unsafe_url_confidence),
        ] {
            if !value.is_finite() || !(0.0..=100.0).contains(&value) {
                return Err(ConfigLoadError::Validation(format!(
                    "{field} must be within [0, 100]"
                )));
            }
        }
        Ok(())
    }
}

impl Default for VerdictYamlConfig {
    fn default() -> Self {
        Self {
            version: 1,
            safe_url_confidence: default_safe_url_confidence(),
            unsafe_url_confidence: default_unsafe_url_confidence(),
        }
    }
}

/// Session history section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryYamlConfig {
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default = "default_max_entries")]
    pub max_entries: usize,
}

impl HistoryYamlConfig {
    fn validate(&self) -> Result<(), ConfigLoadError> {
        if self.version == 0 {
            return Err(ConfigLoadError::Validation(
                "history.version must be >= 1".to_string(),
            ));
        }
        if self.max_entries == 0 {
            return Err(ConfigLoadError::Validation(
                "history.max_entries must be >= 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for HistoryYamlConfig {
    fn default() -> Self {
        Self {
            version: 1,
            max_entries: default_max_entries(),
        }
    }
}

// Helper functions for serde defaults
fn default_version() -> u32 {
    1
}
fn default_max_analysis_chars() -> usize {
    8000
}
fn default_max_history_snippet_chars() -> usize {
    180
}
fn default_max_urls() -> usize {
    10
}
fn default_safe_url_confidence() -> f64 {
    90.0
}
fn default_unsafe_url_confidence() -> f64 {
    85.0
}
fn default_max_entries() -> usize {
    12
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_valid_yaml() {
        let yaml = r#"
version: "1.0"
name: "test config"
limits:
  max_analysis_chars: 4000
extract:
  version: 1
  max_urls: 5
"#;

        let config = RiskscanConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.version, "1.0");
        assert_eq!(config.name, Some("test config".to_string()));
        assert_eq!(config.limits.max_analysis_chars, 4000);
        assert_eq!(config.limits.max_history_snippet_chars, 180);
        assert_eq!(config.extract.max_urls, 5);
    }

    #[test]
    fn test_load_from_file() {
        let yaml = r#"
version: "1.0"
verdict:
  version: 1
  unsafe_url_confidence: 80.0
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(yaml.as_bytes()).unwrap();

        let config = RiskscanConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.verdict.unsafe_url_confidence, 80.0);
    }

    #[test]
    fn test_default_config() {
        let config = RiskscanConfig::default();
        assert_eq!(config.version, "1.0");
        assert!(config.name.is_none());
        assert_eq!(config.history.max_entries, 12);
    }

    #[test]
    fn test_unsupported_version_rejected() {
        let result = RiskscanConfig::from_yaml("version: \"2.0\"\n");
        assert!(matches!(
            result,
            Err(ConfigLoadError::UnsupportedVersion(_))
        ));
    }

    #[test]
    fn test_limits_validation() {
        let yaml = r#"
version: "1.0"
limits:
  max_analysis_chars: 0
"#;

        let result = RiskscanConfig::from_yaml(yaml);
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("max_analysis_chars")
        );
    }

    #[test]
    fn test_verdict_validation() {
        let yaml = r#"
version: "1.0"
verdict:
  version: 1
  safe_url_confidence: 150.0
"#;

        let result = RiskscanConfig::from_yaml(yaml);
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("safe_url_confidence")
        );
    }

    #[test]
    fn test_materialized_configs_validate() {
        let yaml = r#"
version: "1.0"
name: "production"
limits:
  max_analysis_chars: 8000
  max_history_snippet_chars: 180
extract:
  version: 1
  max_urls: 10
verdict:
  version: 1
  safe_url_confidence: 90.0
  unsafe_url_confidence: 85.0
history:
  version: 1
  max_entries: 12
"#;

        let config = RiskscanConfig::from_yaml(yaml).unwrap();

        let analyze = config.analyze_config();
        assert!(analyze.validate().is_ok());
        assert_eq!(analyze.max_analysis_chars, 8000);
        assert_eq!(analyze.extract.max_urls, 10);
        assert_eq!(analyze.verdict.safe_url_confidence, 90.0);

        let history = config.history_config();
        assert!(history.validate().is_ok());
        assert_eq!(history.max_entries, 12);
    }
}
