//! RiskScan URL extraction layer.
//!
//! This crate scans raw text for URL-like substrings and produces an ordered,
//! deduplicated candidate list for downstream classification. It also decides
//! whether an input is a single bare URL, which routes the request down the
//! single-URL analysis path instead of the mixed-text path.
//!
//! ## What we do
//!
//! - Scan for three pattern families in priority order: scheme-prefixed URLs,
//!   `www.`-prefixed hosts, and bare domain-like tokens
//! - Strip surrounding brackets, quotes, and trailing punctuation from matches
//! - Reject email-domain fragments (`@` immediately before a bare domain) and
//!   `mailto:` links
//! - Deduplicate case-insensitively while preserving first-seen casing and
//!   discovery order
//! - Cap the result at a configurable candidate limit
//!
//! ## Pure function guarantee
//!
//! No I/O, no clock calls, no locale dependence. Same text and config, same
//! candidate list on any machine. Malformed or pathological input never
//! errors; it degrades to an empty candidate list.

mod config;
mod error;
mod scan;
mod strip;

pub use crate::config::ExtractConfig;
pub use crate::error::ExtractError;
pub use crate::scan::{extract, is_single_url};
pub use crate::strip::strip_url_punctuation;
