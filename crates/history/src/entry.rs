//! Stored history records and the session-scoped ring buffer.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use verdict::{InputKind, MessageDescriptor, ResultClass};

/// Configuration for the session history buffer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HistoryConfig {
    /// Semantic version of the history configuration.
    pub version: u32,
    /// Maximum number of entries retained per session; the oldest entry is
    /// dropped first on overflow.
    #[serde(default = "HistoryConfig::default_max_entries")]
    pub max_entries: usize,
}

impl HistoryConfig {
    pub(crate) fn default_max_entries() -> usize {
        12
    }

    /// Validate the configuration before use.
    pub fn validate(&self) -> Result<(), HistoryError> {
        if self.version == 0 {
            return Err(HistoryError::InvalidConfig("version must be >= 1".into()));
        }
        if self.max_entries == 0 {
            return Err(HistoryError::InvalidConfig(
                "max_entries must be >= 1".into(),
            ));
        }
        Ok(())
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            version: 1,
            max_entries: Self::default_max_entries(),
        }
    }
}

/// Errors produced by the history layer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HistoryError {
    #[error("invalid history configuration: {0}")]
    InvalidConfig(String),
}

/// One stored analysis record.
///
/// `input` is a bounded snippet of the analyzed text, truncated by the
/// pipeline before the entry is built. `message` is the language-independent
/// descriptor; nothing here depends on a display language.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistoryEntry {
    pub at: DateTime<Utc>,
    pub kind: InputKind,
    pub input: String,
    pub result_class: ResultClass,
    pub confidence: Option<f64>,
    pub message: MessageDescriptor,
}

/// Fixed-capacity, session-scoped sequence of [`HistoryEntry`] values.
///
/// Eviction is count-based, not time-based: appending past the cap drops the
/// oldest entry. The buffer is owned by exactly one session; callers persist
/// it across requests through their own storage boundary (it serde
/// round-trips as a whole).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionHistory {
    entries: VecDeque<HistoryEntry>,
    max_entries: usize,
}

impl SessionHistory {
    /// Creates an empty history bounded by `cfg.max_entries`.
    pub fn new(cfg: &HistoryConfig) -> Self {
        Self {
            entries: VecDeque::with_capacity(cfg.max_entries),
            max_entries: cfg.max_entries,
        }
    }

    /// Rebuilds a history from externally stored entries, re-applying the
    /// cap: only the most recent `cfg.max_entries` survive.
    pub fn from_entries(entries: Vec<HistoryEntry>, cfg: &HistoryConfig) -> Self {
        let skip = entries.len().saturating_sub(cfg.max_entries);
        Self {
            entries: entries.into_iter().skip(skip).collect(),
            max_entries: cfg.max_entries,
        }
    }

    /// Appends one entry, evicting the oldest past the cap.
    pub fn record(&mut self, entry: HistoryEntry) {
        self.entries.push_back(entry);
        while self.entries.len() > self.max_entries {
            self.entries.pop_front();
        }
    }

    /// Stored entries, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    /// Drops every stored entry; the cap is unchanged.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn entry(n: usize) -> HistoryEntry {
        HistoryEntry {
            at: Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap(),
            kind: InputKind::Text,
            input: format!("message {n}"),
            result_class: ResultClass::Safe,
            confidence: Some(75.0),
            message: MessageDescriptor::MlVerdict { is_unsafe: false },
        }
    }

    #[test]
    fn overflow_evicts_oldest_preserving_order() {
        let cfg = HistoryConfig::default();
        let mut history = SessionHistory::new(&cfg);
        for n in 1..=13 {
            history.record(entry(n));
        }

        assert_eq!(history.len(), 12);
        let inputs: Vec<&str> = history.iter().map(|e| e.input.as_str()).collect();
        assert_eq!(inputs.first(), Some(&"message 2"));
        assert_eq!(inputs.last(), Some(&"message 13"));
    }

    #[test]
    fn from_entries_reapplies_the_cap() {
        let cfg = HistoryConfig {
            max_entries: 3,
            ..Default::default()
        };
        let history = SessionHistory::from_entries((1..=5).map(entry).collect(), &cfg);
        let inputs: Vec<&str> = history.iter().map(|e| e.input.as_str()).collect();
        assert_eq!(inputs, vec!["message 3", "message 4", "message 5"]);
    }

    #[test]
    fn history_round_trips_through_serde() {
        let cfg = HistoryConfig::default();
        let mut history = SessionHistory::new(&cfg);
        history.record(entry(1));
        history.record(entry(2));

        let json = serde_json::to_string(&history).expect("serialize");
        let back: SessionHistory = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(history, back);
    }

    #[test]
    fn clear_empties_without_changing_cap() {
        let cfg = HistoryConfig::default();
        let mut history = SessionHistory::new(&cfg);
        history.record(entry(1));
        history.clear();
        assert!(history.is_empty());
        assert_eq!(history.max_entries(), 12);
    }

    #[test]
    fn zero_cap_config_rejected() {
        let cfg = HistoryConfig {
            max_entries: 0,
            ..Default::default()
        };
        assert!(cfg.validate().is_err());
    }
}
