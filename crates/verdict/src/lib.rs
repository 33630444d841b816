//! # RiskScan verdict layer (`verdict`)
//!
//! ## Purpose
//!
//! `verdict` sits on top of the extraction layer (`extract`) and the
//! classifier contracts (`classify`). It combines one whole-text verdict and
//! zero or more per-URL verdicts into a single overall verdict with a
//! confidence number and a language-independent message descriptor.
//!
//! ## Aggregation rules
//!
//! - Overall class is **Unsafe if either the text is flagged unsafe or any
//!   URL is flagged unsafe**; Safe only when the text and every URL are safe.
//!   Risk is combined by logical OR, never averaged — a single unsafe signal
//!   dominates.
//! - When Unsafe, confidence is the **maximum** over the unsafe contributors:
//!   report the strongest evidence of danger.
//! - When Safe, confidence is the **minimum** over the safe contributors:
//!   report the weakest supporting evidence.
//! - The heuristic URL checker returns no numeric confidence, so each URL
//!   verdict carries a fixed display constant per outcome
//!   ([`VerdictConfig::safe_url_confidence`] /
//!   [`VerdictConfig::unsafe_url_confidence`]).
//!
//! All operations are pure and deterministic: same verdicts in, same overall
//! verdict out, regardless of how the classifier calls were scheduled.

pub mod aggregate;
pub mod types;

pub use crate::aggregate::{aggregate_mixed, aggregate_single, classify_input_kind, round2};
pub use crate::types::{
    InputKind, MessageDescriptor, OverallVerdict, ResultClass, UrlVerdict, VerdictConfig,
    VerdictError,
};
