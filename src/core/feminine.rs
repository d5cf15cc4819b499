// File: src/core/feminine.rs
//! Feminine agreement forms (`ar_f` / `chat_f`) for adjectives.

use crate::core::types::{VocabularyRecord, FEMININE_MARKER};
use log::{info, warn};

/// Colour adjectives follow the af'al -> fa'la pattern and are listed literally.
/// (masculine Arabic, feminine Arabic, feminine Arabizi)
const COLOUR_FORMS: &[(&str, &str, &str)] = &[
    ("أحمر", "حمرا", "7amra"),
    ("أخضر", "خضرا", "5adhra"),
    ("أزرق", "زرقا", "zarga"),
    ("أصفر", "صفرا", "9afra"),
    ("أبيض", "بيضا", "baidha"),
    ("أسود", "سودا", "sooda"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeminineOutcome {
    Set { ar: String, chat: String },
    AlreadyFeminine,
    UnknownColour,
    MissingFields,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeminineReport {
    pub set: usize,
    pub skipped: Vec<String>,
}

pub fn is_colour(record: &VocabularyRecord) -> bool {
    record.is_kind("colors") || record.is_kind("colours") || looks_like_afal(&record.ar)
}

/// أفعل: four letters starting with hamza-alif.
fn looks_like_afal(ar: &str) -> bool {
    let chars: Vec<char> = ar.trim().chars().collect();
    chars.len() == 4 && chars[0] == 'أ'
}

pub fn feminine_form(record: &VocabularyRecord) -> FeminineOutcome {
    let ar = record.ar.trim();
    let chat = record.chat.trim();
    if ar.is_empty() || chat.is_empty() {
        return FeminineOutcome::MissingFields;
    }

    if is_colour(record) {
        return match COLOUR_FORMS.iter().find(|(m, _, _)| *m == ar) {
            Some((_, f_ar, f_chat)) => FeminineOutcome::Set {
                ar: f_ar.to_string(),
                chat: f_chat.to_string(),
            },
            None => FeminineOutcome::UnknownColour,
        };
    }

    if ar.ends_with(FEMININE_MARKER) {
        return FeminineOutcome::AlreadyFeminine;
    }
    FeminineOutcome::Set {
        ar: format!("{}{}", ar, FEMININE_MARKER),
        chat: format!("{}a", chat),
    }
}

/// Sets `ar_f`/`chat_f` on every adjective that has a derivable feminine form.
pub fn add_feminine_forms(items: &mut [VocabularyRecord]) -> FeminineReport {
    let mut report = FeminineReport::default();
    for record in items.iter_mut().filter(|r| r.is_pos("adjective")) {
        match feminine_form(record) {
            FeminineOutcome::Set { ar, chat } => {
                record.ar_f = Some(ar);
                record.chat_f = Some(chat);
                report.set += 1;
            }
            other => {
                warn!("No feminine form for {} ('{}'): {:?}", record.id, record.eng, other);
                report.skipped.push(record.chat.clone());
            }
        }
    }
    info!("Feminine forms: {} set, {} skipped", report.set, report.skipped.len());
    report
}
