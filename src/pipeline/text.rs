// File: src/pipeline/text.rs
//! Arabizi -> Arabic transliteration and Arabic -> English glosses.

use crate::core::types::VocabularyRecord;
use crate::pipeline::{BatchReport, Throttle};
use crate::services::{complete_or_original, TextModel};
use log::{info, warn};

pub const TRANSLITERATE_SYSTEM: &str = "You convert Emirati Arabic written in Arabizi (Latin letters \
and digits such as 3, 7, 5, 9) into Arabic script as an Emirati would spell it. Reply with the \
Arabic word or phrase only, no explanation.";

pub const TRANSLATE_SYSTEM: &str = "You translate Emirati Arabic words into English. Reply with a \
short lowercase English gloss only, no punctuation or explanation.";

fn has_arabic(text: &str) -> bool {
    text.chars().any(|c| ('\u{0600}'..='\u{06FF}').contains(&c))
}

/// Fills `ar` for records that only have `chat`.
pub fn transliterate_missing(
    items: &mut [VocabularyRecord],
    model: &dyn TextModel,
    throttle: Throttle,
    limit: Option<usize>,
) -> BatchReport {
    let mut report = BatchReport::default();
    let todo = items
        .iter_mut()
        .filter(|r| r.ar.trim().is_empty() && !r.chat.trim().is_empty())
        .take(limit.unwrap_or(usize::MAX));

    for record in todo {
        let chat = record.chat.trim().to_string();
        let arabic = complete_or_original(model, TRANSLITERATE_SYSTEM, &chat);
        throttle.pause();

        if arabic == chat {
            report.skip();
        } else if !has_arabic(&arabic) {
            warn!("Transliteration of '{}' was not Arabic: '{}'", chat, arabic);
            report.failure();
        } else {
            info!("{} -> {}", chat, arabic);
            record.ar = arabic;
            report.success();
        }
    }
    report.log_summary("transliterate");
    report
}

/// Fills `eng` for records that have Arabic but no gloss.
pub fn translate_missing(
    items: &mut [VocabularyRecord],
    model: &dyn TextModel,
    throttle: Throttle,
    limit: Option<usize>,
) -> BatchReport {
    let mut report = BatchReport::default();
    let todo = items
        .iter_mut()
        .filter(|r| r.eng.trim().is_empty() && !r.ar.trim().is_empty())
        .take(limit.unwrap_or(usize::MAX));

    for record in todo {
        let ar = record.ar.trim().to_string();
        let english = complete_or_original(model, TRANSLATE_SYSTEM, &ar);
        throttle.pause();

        if english == ar || has_arabic(&english) {
            report.skip();
        } else {
            record.eng = english.to_lowercase();
            report.success();
        }
    }
    report.log_summary("translate");
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, Result};

    struct Dictionary;
    impl TextModel for Dictionary {
        fn complete(&self, system: &str, input: &str) -> Result<String> {
            match (system == TRANSLITERATE_SYSTEM, input) {
                (true, "bait") => Ok("بيت".into()),
                (true, "baab") => Ok("door".into()),
                (false, "بيت") => Ok("House".into()),
                _ => Err(Error::Api { status: 503, body: "down".into() }),
            }
        }
    }

    #[test]
    fn transliteration_fills_only_what_it_can() {
        let mut items = vec![
            VocabularyRecord::new(1, "", "bait", "house", "noun"),
            VocabularyRecord::new(2, "", "baab", "door", "noun"),
            VocabularyRecord::new(3, "", "shay", "tea", "noun"),
            VocabularyRecord::new(4, "شاي", "chai", "tea", "noun"),
        ];
        let report = transliterate_missing(&mut items, &Dictionary, Throttle::none(), None);
        assert_eq!(report.processed, 3);
        assert_eq!(report.succeeded, 1);
        assert_eq!(report.failed, 1);
        assert_eq!(report.skipped, 1);
        assert_eq!(items[0].ar, "بيت");
        assert_eq!(items[1].ar, "");
        assert_eq!(items[2].ar, "");
    }

    #[test]
    fn translation_is_lowercased_and_limited() {
        let mut items = vec![
            VocabularyRecord::new(1, "بيت", "bait", "", "noun"),
            VocabularyRecord::new(2, "باب", "baab", "", "noun"),
        ];
        let report = translate_missing(&mut items, &Dictionary, Throttle::none(), Some(1));
        assert_eq!(report.processed, 1);
        assert_eq!(items[0].eng, "house");
        assert_eq!(items[1].eng, "");
    }
}
