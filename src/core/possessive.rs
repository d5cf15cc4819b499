// File: src/core/possessive.rs
//! Possessed noun forms ("my bag", "your bag", ...) in Arabic script and Arabizi.

use crate::core::gender::{infer_gender, GenderRule};
use crate::core::types::{Gender, PossessiveCategory, VocabularyRecord, FEMININE_MARKER};
use log::{debug, info, warn};
use std::collections::HashMap;

const TA_MARBUTA_JOINED: char = 'ت';

/// Replaces the derived root of one noun before suffixing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RootOverride {
    pub ar: Option<String>,
    pub chat: Option<String>,
}

/// Why a record produced no possessive fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    MissingArabic,
    MissingChat,
}

/// The sixteen derived fields of one noun, before they are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Derivation {
    pub gender: Gender,
    pub rule: GenderRule,
    pub root_ar: String,
    pub root_chat: String,
    pub forms: Vec<(PossessiveCategory, String, String)>,
    /// True when a form contains a doubled letter the surface form does not have.
    pub flagged: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PossessiveReport {
    pub enriched: usize,
    pub skipped: Vec<String>,
    pub flagged: Vec<String>,
}

pub struct PossessiveDeriver {
    overrides: HashMap<String, RootOverride>,
}

impl Default for PossessiveDeriver {
    fn default() -> Self {
        Self::new()
    }
}

impl PossessiveDeriver {
    /// A deriver carrying the built-in overrides for nouns the elision rule gets wrong.
    pub fn new() -> Self {
        let mut deriver = Self::without_overrides();
        deriver.add_override(
            "shantah",
            RootOverride { ar: None, chat: Some("shant".to_string()) },
        );
        deriver
    }

    pub fn without_overrides() -> Self {
        Self { overrides: HashMap::new() }
    }

    pub fn add_override(&mut self, chat: &str, root: RootOverride) {
        self.overrides.insert(chat.trim().to_lowercase(), root);
    }

    pub fn derive(&self, record: &VocabularyRecord) -> Result<Derivation, SkipReason> {
        let ar = record.ar.trim();
        let chat = record.chat.trim();
        if ar.is_empty() {
            return Err(SkipReason::MissingArabic);
        }
        if chat.is_empty() {
            return Err(SkipReason::MissingChat);
        }

        let inference = infer_gender(&record.eng, ar, record.gender);
        let (mut root_ar, mut root_chat) = possession_root(ar, chat, inference.gender);

        if let Some(over) = self.overrides.get(&chat.to_lowercase()) {
            debug!("root override applied to '{}'", chat);
            if let Some(o) = &over.ar {
                root_ar = o.clone();
            }
            if let Some(o) = &over.chat {
                root_chat = o.clone();
            }
        }

        let mut flagged = false;
        let forms = PossessiveCategory::ALL
            .iter()
            .map(|&category| {
                let (suffix_ar, suffix_chat) = suffix(inference.gender, category);
                let form_ar = format!("{}{}", root_ar, suffix_ar);
                let form_chat = format!("{}{}", root_chat, suffix_chat);
                if introduces_double(ar, &root_ar, suffix_ar)
                    || introduces_double(&chat.to_lowercase(), &root_chat.to_lowercase(), suffix_chat)
                {
                    flagged = true;
                }
                (category, form_ar, form_chat)
            })
            .collect();

        Ok(Derivation {
            gender: inference.gender,
            rule: inference.rule,
            root_ar,
            root_chat,
            forms,
            flagged,
        })
    }

    /// Derives and writes all sixteen fields, or none when the record is skipped.
    pub fn apply(&self, record: &mut VocabularyRecord) -> Result<Derivation, SkipReason> {
        let derivation = self.derive(record)?;
        for (category, form_ar, form_chat) in &derivation.forms {
            record.set_possessive(*category, form_ar.clone(), form_chat.clone());
        }
        Ok(derivation)
    }

    /// Enriches every noun in `items`, optionally only those of one `type`.
    pub fn derive_all(&self, items: &mut [VocabularyRecord], kind: Option<&str>) -> PossessiveReport {
        let mut report = PossessiveReport::default();
        for record in items.iter_mut().filter(|r| r.is_pos("noun")) {
            if let Some(k) = kind {
                if !record.is_kind(k) {
                    continue;
                }
            }
            match self.apply(record) {
                Ok(derivation) => {
                    report.enriched += 1;
                    if derivation.flagged {
                        warn!(
                            "'{}' ({}) produced a doubled letter; add a root override if wrong",
                            record.chat, record.id
                        );
                        report.flagged.push(record.chat.clone());
                    }
                }
                Err(reason) => {
                    warn!("Skipping noun {} ('{}'): {:?}", record.id, record.eng, reason);
                    report.skipped.push(format!("{}:{}", record.id, record.eng));
                }
            }
        }
        info!(
            "Possessives: {} enriched, {} skipped, {} flagged",
            report.enriched,
            report.skipped.len(),
            report.flagged.len()
        );
        report
    }
}

/// The stem that possessive suffixes attach to.
///
/// Feminine nouns ending in ta marbuta join it as ت; the transliteration
/// trades a trailing "ah"/"a" for "t".
pub fn possession_root(ar: &str, chat: &str, gender: Gender) -> (String, String) {
    if gender == Gender::Feminine && ar.ends_with(FEMININE_MARKER) {
        let mut root_ar = ar.to_string();
        root_ar.pop();
        root_ar.push(TA_MARBUTA_JOINED);

        let stem = chat
            .strip_suffix("ah")
            .or_else(|| chat.strip_suffix('a'))
            .unwrap_or(chat);
        (root_ar, format!("{}t", stem))
    } else {
        (ar.to_string(), chat.to_string())
    }
}

/// Fixed suffix table: (Arabic, Arabizi) for each noun gender and category.
pub fn suffix(gender: Gender, category: PossessiveCategory) -> (&'static str, &'static str) {
    use PossessiveCategory::*;
    match (gender, category) {
        (Gender::Masculine, My) => ("ي", "i"),
        (Gender::Masculine, YourM) => ("ك", "ik"),
        (Gender::Masculine, YourF) => ("ج", "ich"),
        (Gender::Masculine, YourPl) => ("كم", "kum"),
        (Gender::Masculine, Our) => ("نا", "na"),
        (Gender::Masculine, His) => ("ه", "ah"),
        (Gender::Masculine, Her) => ("ها", "ha"),
        (Gender::Masculine, Their) => ("هم", "hum"),

        (Gender::Feminine, My) => ("ي", "y"),
        (Gender::Feminine, YourM) => ("ك", "ak"),
        (Gender::Feminine, YourF) => ("ج", "ich"),
        (Gender::Feminine, YourPl) => ("كم", "kum"),
        (Gender::Feminine, Our) => ("نا", "na"),
        (Gender::Feminine, His) => ("ه", "eh"),
        (Gender::Feminine, Her) => ("ها", "ha"),
        (Gender::Feminine, Their) => ("هم", "hum"),
    }
}

/// True when suffixing `root` doubles a letter at the junction, or when the
/// root's rewritten ending (ta marbuta elision) produced a doubled pair.
fn introduces_double(surface: &str, root: &str, suffix: &str) -> bool {
    let doubled = |a: char, b: char| a == b && a.is_alphabetic();
    let tail: Vec<char> = root.chars().rev().take(2).collect();

    if let (Some(&last), Some(first)) = (tail.first(), suffix.chars().next()) {
        if doubled(last, first) {
            return true;
        }
    }
    root != surface && tail.len() == 2 && doubled(tail[0], tail[1])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noun(ar: &str, chat: &str, eng: &str, gender: Option<Gender>) -> VocabularyRecord {
        let mut r = VocabularyRecord::new(1, ar, chat, eng, "noun");
        r.gender = gender;
        r
    }

    #[test]
    fn masculine_forms_are_root_plus_table() {
        let deriver = PossessiveDeriver::new();
        let mut r = noun("بيت", "bait", "house", Some(Gender::Masculine));
        deriver.apply(&mut r).unwrap();

        for category in PossessiveCategory::ALL {
            let (sa, sc) = suffix(Gender::Masculine, category);
            let (ar, chat) = r.possessive(category);
            assert_eq!(ar.unwrap(), format!("بيت{}", sa));
            assert_eq!(chat.unwrap(), format!("bait{}", sc));
        }
        assert_eq!(r.my.as_deref(), Some("بيتي"));
        assert_eq!(r.your_m_chat.as_deref(), Some("baitik"));
    }

    #[test]
    fn feminine_marker_becomes_joined_ta() {
        let deriver = PossessiveDeriver::new();
        let mut r = noun("سيارة", "sayyarah", "car", Some(Gender::Feminine));
        let d = deriver.apply(&mut r).unwrap();
        assert_eq!(d.root_ar, "سيارت");
        assert_eq!(d.root_chat, "sayyart");
        for category in PossessiveCategory::ALL {
            let (ar, chat) = r.possessive(category);
            assert!(ar.unwrap().starts_with("سيارت"));
            assert!(chat.unwrap().starts_with("sayyart"));
        }
        assert_eq!(r.your_f_chat.as_deref(), Some("sayyartich"));
    }

    #[test]
    fn bag_uses_builtin_override() {
        let deriver = PossessiveDeriver::new();
        let mut r = noun("شنطة", "shantah", "bag", Some(Gender::Feminine));
        let d = deriver.apply(&mut r).unwrap();
        assert_eq!(r.my.as_deref(), Some("شنطتي"));
        assert_eq!(r.my_chat.as_deref(), Some("shanty"));
        assert!(!d.flagged);
    }

    #[test]
    fn naive_bag_is_flagged_not_fixed() {
        let deriver = PossessiveDeriver::without_overrides();
        let mut r = noun("شنطة", "shantah", "bag", Some(Gender::Feminine));
        let d = deriver.apply(&mut r).unwrap();
        assert_eq!(r.my_chat.as_deref(), Some("shantty"));
        assert!(d.flagged);
    }

    #[test]
    fn junction_double_is_flagged_even_when_the_word_has_one() {
        let deriver = PossessiveDeriver::new();
        let mut r = noun("سيدي", "siidi", "master", Some(Gender::Masculine));
        let d = deriver.apply(&mut r).unwrap();
        assert_eq!(r.my_chat.as_deref(), Some("siidii"));
        assert!(d.flagged);

        let mut plain = noun("سيارة", "sayyarah", "car", Some(Gender::Feminine));
        assert!(!deriver.apply(&mut plain).unwrap().flagged);
    }

    #[test]
    fn missing_arabic_writes_nothing() {
        let deriver = PossessiveDeriver::new();
        let mut r = noun("", "bait", "house", None);
        assert_eq!(deriver.apply(&mut r), Err(SkipReason::MissingArabic));
        assert!(r.my.is_none());
        assert!(r.my_chat.is_none());
    }

    #[test]
    fn applying_twice_is_identical() {
        let deriver = PossessiveDeriver::new();
        let mut once = noun("أخت", "ukht", "sister", None);
        deriver.apply(&mut once).unwrap();
        let mut twice = once.clone();
        deriver.apply(&mut twice).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn derive_all_only_touches_nouns() {
        let deriver = PossessiveDeriver::new();
        let mut items = vec![
            noun("بيت", "bait", "house", None),
            VocabularyRecord::new(2, "أحمر", "a7mar", "red", "adjective"),
            noun("", "", "ghost", None),
        ];
        let report = deriver.derive_all(&mut items, None);
        assert_eq!(report.enriched, 1);
        assert_eq!(report.skipped.len(), 1);
        assert!(items[1].my.is_none());
    }
}
