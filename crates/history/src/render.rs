//! Pure rendering of stored history into display-ready entries.
//!
//! Rendering never mutates stored entries and may be called any number of
//! times with different display languages against the same history.

use chrono::{DateTime, Utc};
use classify::ReasonCode;
use serde::{Deserialize, Serialize};
use verdict::{InputKind, MessageDescriptor, ResultClass};

use crate::entry::SessionHistory;

/// Display language selector. Affects presentation only, never
/// classification.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Ar,
}

struct Labels {
    safe: &'static str,
    unsafe_label: &'static str,
    text: &'static str,
    urls: &'static str,
    urls_none: &'static str,
    ml_safe: &'static str,
    ml_unsafe: &'static str,
}

const EN: Labels = Labels {
    safe: "Safe",
    unsafe_label: "Unsafe",
    text: "Text",
    urls: "URLs",
    urls_none: "No URLs detected in this input.",
    ml_safe: "No obvious red flags were detected in the text.",
    ml_unsafe: "This text looks suspicious and may be phishing or a scam.",
};

const AR: Labels = Labels {
    safe: "آمن",
    unsafe_label: "غير آمن",
    text: "نص",
    urls: "الروابط",
    urls_none: "لم يتم العثور على روابط في هذا النص.",
    ml_safe: "لم يتم رصد مؤشرات واضحة على الخطر في النص.",
    ml_unsafe: "يبدو هذا النص مشبوهًا وقد يكون تصيّدًا أو احتيالًا.",
};

fn labels(lang: Language) -> &'static Labels {
    match lang {
        Language::En => &EN,
        Language::Ar => &AR,
    }
}

/// Localized label for a result class; `None` for the unknown class, which
/// has no safe default label.
pub fn class_label(lang: Language, class: ResultClass) -> Option<&'static str> {
    match class {
        ResultClass::Safe => Some(labels(lang).safe),
        ResultClass::Unsafe => Some(labels(lang).unsafe_label),
        ResultClass::Unknown => None,
    }
}

/// Display icon for a result class.
pub fn class_icon(class: ResultClass) -> &'static str {
    match class {
        ResultClass::Safe => "✅",
        ResultClass::Unsafe => "⚠️",
        ResultClass::Unknown => "",
    }
}

/// Localized message for a URL reason code. Codes without a translation are
/// shown raw rather than erroring, so newer checker builds stay renderable.
pub fn reason_message(reason: &ReasonCode, lang: Language) -> String {
    match lang {
        Language::En => reason.as_str().to_string(),
        Language::Ar => match reason {
            ReasonCode::InvalidFormat => "صيغة الرابط غير صحيحة".to_string(),
            ReasonCode::SuspiciousKeyword => "تم العثور على كلمة مشبوهة في النطاق".to_string(),
            ReasonCode::TooManySubdomains => "يوجد عدد كبير من النطاقات الفرعية".to_string(),
            ReasonCode::LooksSafe => "يبدو الرابط آمنًا".to_string(),
            ReasonCode::Other(raw) => raw.clone(),
        },
    }
}

/// Localized message for a text-classifier verdict.
pub fn ml_message(lang: Language, is_unsafe: bool) -> &'static str {
    let labels = labels(lang);
    if is_unsafe {
        labels.ml_unsafe
    } else {
        labels.ml_safe
    }
}

/// Localized composite summary: text verdict label plus URL tally.
///
/// The text part is omitted when the stored text class is unrecognized; the
/// URL part degrades to a "no URLs" notice when the tally is empty.
pub fn summary_message(
    lang: Language,
    text_class: ResultClass,
    urls_total: usize,
    urls_unsafe: usize,
) -> String {
    let labels = labels(lang);

    let text_part = class_label(lang, text_class)
        .map(|class_label| format!("{}: {}", labels.text, class_label));

    let urls_part = if urls_total > 0 {
        match lang {
            Language::En => format!(
                "{}: {} checked ({} unsafe)",
                labels.urls, urls_total, urls_unsafe
            ),
            Language::Ar => format!(
                "{}: {} ({}: {})",
                labels.urls, urls_total, labels.unsafe_label, urls_unsafe
            ),
        }
    } else {
        labels.urls_none.to_string()
    };

    match text_part {
        Some(text_part) => format!("{text_part} • {urls_part}"),
        None => urls_part,
    }
}

/// Renders one stored message descriptor into localized display text.
pub fn render_message(message: &MessageDescriptor, lang: Language) -> String {
    match message {
        MessageDescriptor::UrlReason { reason } => reason_message(reason, lang),
        MessageDescriptor::MlVerdict { is_unsafe } => ml_message(lang, *is_unsafe).to_string(),
        MessageDescriptor::Summary {
            text_class,
            urls_total,
            urls_unsafe,
        } => summary_message(lang, *text_class, *urls_total, *urls_unsafe),
    }
}

/// One display-ready history row.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DisplayEntry {
    pub at: DateTime<Utc>,
    pub kind: InputKind,
    pub input: String,
    pub result_class: ResultClass,
    pub label: &'static str,
    pub icon: &'static str,
    pub confidence: Option<f64>,
    pub message: String,
}

impl SessionHistory {
    /// Renders the stored history for display, oldest first.
    ///
    /// Entries whose stored result class is unrecognized are skipped; an
    /// unrecognized stored kind renders as plain text.
    pub fn render(&self, lang: Language) -> Vec<DisplayEntry> {
        self.iter()
            .filter_map(|entry| {
                let label = class_label(lang, entry.result_class)?;
                let kind = match entry.kind {
                    InputKind::Unknown => InputKind::Text,
                    kind => kind,
                };
                Some(DisplayEntry {
                    at: entry.at,
                    kind,
                    input: entry.input.clone(),
                    result_class: entry.result_class,
                    label,
                    icon: class_icon(entry.result_class),
                    confidence: entry.confidence,
                    message: render_message(&entry.message, lang),
                })
            })
            .collect()
    }
}
