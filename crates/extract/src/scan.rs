//! The candidate scan: three pattern families, overlap rules, dedup, cap.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::ExtractConfig;
use crate::strip::strip_url_punctuation;

static HTTP_URL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)https?://[^\s<>"]+"#).expect("http url pattern"));

static WWW_URL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)\bwww\.[^\s<>"]+"#).expect("www url pattern"));

static BARE_DOMAIN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)\b(?:[a-z0-9-]+\.)+[a-z]{2,}(?::\d{2,5})?(?:/[^\s<>"]*)?\b"#)
        .expect("bare domain pattern")
});

static SINGLE_URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?:https?://|www\.)?(?:[a-z0-9-]+\.)+[a-z]{2,}(?::\d{2,5})?(?:/\S*)?$")
        .expect("single url pattern")
});

fn is_mailto(candidate: &str) -> bool {
    candidate
        .get(..7)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("mailto:"))
}

/// Scans `text` for URL-like candidates.
///
/// Candidates are discovered by three pattern families in priority order:
/// scheme-prefixed URLs, `www.`-prefixed hosts, and bare domain-like tokens
/// that do not start inside a span already claimed by the first two families.
/// Surviving matches are stably ordered by start offset, deduplicated
/// case-insensitively (first-seen casing wins), and capped at
/// `cfg.max_urls`.
///
/// Total over any input; empty or link-free text yields an empty vector.
pub fn extract(text: &str, cfg: &ExtractConfig) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }

    let mut matches: Vec<(usize, String)> = Vec::new();
    let mut claimed: Vec<(usize, usize)> = Vec::new();

    for regex in [&*HTTP_URL_RE, &*WWW_URL_RE] {
        for m in regex.find_iter(text) {
            let candidate = strip_url_punctuation(m.as_str());
            if candidate.is_empty() || is_mailto(candidate) {
                continue;
            }
            matches.push((m.start(), candidate.to_string()));
            claimed.push((m.start(), m.end()));
        }
    }

    for m in BARE_DOMAIN_RE.find_iter(text) {
        // The domain part of an email address is not a standalone URL.
        if text[..m.start()].ends_with('@') {
            continue;
        }
        if claimed
            .iter()
            .any(|&(start, end)| start <= m.start() && m.start() < end)
        {
            continue;
        }
        let candidate = strip_url_punctuation(m.as_str());
        if candidate.is_empty() || is_mailto(candidate) {
            continue;
        }
        matches.push((m.start(), candidate.to_string()));
    }

    // Stable: a scheme match and a bare match at the same offset keep
    // discovery order.
    matches.sort_by_key(|&(start, _)| start);

    let mut urls: Vec<String> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();
    for (_, candidate) in matches {
        if !seen.insert(candidate.to_lowercase()) {
            continue;
        }
        urls.push(candidate);
        if urls.len() >= cfg.max_urls {
            break;
        }
    }

    urls
}

/// Returns true iff the entire input is one URL-shaped token.
///
/// The input is whitespace-trimmed, then rejected if any internal whitespace
/// remains; the punctuation-stripped remainder must contain no `@` and match
/// the anchored domain/URL shape end to end. This is a full-string check,
/// distinct from the partial-match scan in [`extract`], and routes a request
/// down the single-URL analysis path.
pub fn is_single_url(text: &str) -> bool {
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed.chars().any(char::is_whitespace) {
        return false;
    }
    let value = strip_url_punctuation(trimmed);
    if value.is_empty() || value.contains('@') {
        return false;
    }
    SINGLE_URL_RE.is_match(value)
}
