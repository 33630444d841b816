//! The deterministic aggregation rules.

use classify::TextVerdict;

use crate::types::{InputKind, MessageDescriptor, OverallVerdict, ResultClass, UrlVerdict};


/// Rounds a percentage to two decimal places, matching the precision the
/// text classifier boundary reports.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Aggregation for the single-URL path.
///
/// The overall class mirrors the one URL verdict; the confidence is the fixed
/// per-outcome constant it already carries; the message is the checker's
/// categorical reason.
pub fn aggregate_single(url_verdict: UrlVerdict) -> OverallVerdict {
    let class = if url_verdict.is_safe {
        ResultClass::Safe
    } else {
        ResultClass::Unsafe
    };
    OverallVerdict {
        class,
        confidence: Some(round2(url_verdict.confidence)),
        message: MessageDescriptor::UrlReason {
            reason: url_verdict.reason.clone(),
        },
        url_verdicts: vec![url_verdict],
    }
}

/// Aggregation for the mixed-text path.
///
/// The class is Unsafe iff the text is flagged unsafe or any URL is flagged
/// unsafe. When Unsafe, the confidence is the maximum over the unsafe
/// contributors; when Safe, the minimum over the safe contributors. With no
/// contributor for the winning class the confidence is `None` — unreachable
/// under the OR/AND rule, handled anyway.
pub fn aggregate_mixed(text: &TextVerdict, url_verdicts: Vec<UrlVerdict>) -> OverallVerdict {
    let urls_total = url_verdicts.len();
    let urls_unsafe = url_verdicts.iter().filter(|v| !v.is_safe).count();
    let overall_unsafe = text.is_unsafe || urls_unsafe > 0;

    let mut contributors: Vec<f64> = Vec::with_capacity(urls_total + 1);
    if text.is_unsafe == overall_unsafe {
        contributors.push(text.confidence);
    }
    contributors.extend(
        url_verdicts
            .iter()
            .filter(|v| v.is_safe != overall_unsafe)
            .map(|v| v.confidence),
    );
    let confidence = if overall_unsafe {
        contributors.into_iter().reduce(f64::max)
    } else {
        contributors.into_iter().reduce(f64::min)
    };

    let text_class = if text.is_unsafe {
        ResultClass::Unsafe
    } else {
        ResultClass::Safe
    };
    let message = if urls_total > 0 {
        MessageDescriptor::Summary {
            text_class,
            urls_total,
            urls_unsafe,
        }
    } else {
        MessageDescriptor::MlVerdict {
            is_unsafe: text.is_unsafe,
        }
    };

    OverallVerdict {
        class: if overall_unsafe {
            ResultClass::Unsafe
        } else {
            ResultClass::Safe
        },
        confidence: confidence.map(round2),
        message,
        url_verdicts,
    }
}

/// History tag for a mixed-path analysis: `Email` when the input contains a
/// line break or at least one URL candidate was found, otherwise `Text`.
/// (The single-URL path tags its entries `Url` directly.)
pub fn classify_input_kind(text: &str, urls_total: usize) -> InputKind {
    if text.contains('\n') || urls_total > 0 {
        InputKind::Email
    } else {
        InputKind::Text
    }
}
