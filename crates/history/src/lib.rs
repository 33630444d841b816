//! Bounded per-session analysis history for RiskScan.
//!
//! Each analysis may append one compact record to a session-scoped ring
//! buffer. The record stores a *descriptor* of the result message (see
//! [`verdict::MessageDescriptor`]), not a rendered string, which is the key
//! invariant of this layer: **classification happens once; rendering is pure,
//! idempotent, and repeatable** in either supported display language.
//!
//! The buffer holds at most [`HistoryConfig::max_entries`] entries; the
//! oldest entry is evicted on overflow. Entries live only as long as the
//! owning session and are mutated by a single owner at a time.
//!
//! Stored data crosses an external session-storage boundary, so rendering is
//! defensive: an entry whose stored kind is unrecognized renders as plain
//! text, and an entry whose stored result class is unrecognized is skipped —
//! there is no safe default label for it.

mod entry;
mod render;

pub use crate::entry::{HistoryConfig, HistoryEntry, HistoryError, SessionHistory};
pub use crate::render::{
    class_icon, class_label, ml_message, reason_message, render_message, summary_message,
    DisplayEntry, Language,
};
