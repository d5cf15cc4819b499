// File: src/core/gender.rs
//! Grammatical gender inference as an ordered rule chain.
//!
//! Priority: explicit field > gloss keyword > Arabic orthographic marker > masculine.

use crate::core::types::{Gender, FEMININE_MARKER};

const FEMININE_KEYWORDS: &[&str] = &[
    "wife", "sister", "mother", "daughter", "aunt", "grandmother", "girl", "woman", "niece",
    "bride", "queen",
];

const MASCULINE_KEYWORDS: &[&str] = &[
    "husband", "brother", "father", "son", "uncle", "grandfather", "boy", "man", "nephew",
    "groom", "king",
];

/// Which rule in the chain decided the gender.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenderRule {
    ExplicitField,
    KeywordMatch,
    OrthographicMarker,
    Default,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Inference {
    pub gender: Gender,
    pub rule: GenderRule,
}

pub fn infer_gender(eng: &str, ar: &str, explicit: Option<Gender>) -> Inference {
    if let Some(gender) = from_explicit(explicit) {
        return Inference { gender, rule: GenderRule::ExplicitField };
    }
    if let Some(gender) = from_keywords(eng) {
        return Inference { gender, rule: GenderRule::KeywordMatch };
    }
    if let Some(gender) = from_marker(ar) {
        return Inference { gender, rule: GenderRule::OrthographicMarker };
    }
    Inference { gender: Gender::Masculine, rule: GenderRule::Default }
}

pub fn from_explicit(explicit: Option<Gender>) -> Option<Gender> {
    explicit
}

/// Whole-word match against the relation keyword lists, so "woman" never hits "man".
pub fn from_keywords(eng: &str) -> Option<Gender> {
    let lowered = eng.to_lowercase();
    let words: Vec<&str> = lowered
        .split(|c: char| !c.is_alphabetic())
        .filter(|w| !w.is_empty())
        .collect();

    if words.iter().any(|w| FEMININE_KEYWORDS.contains(w)) {
        Some(Gender::Feminine)
    } else if words.iter().any(|w| MASCULINE_KEYWORDS.contains(w)) {
        Some(Gender::Masculine)
    } else {
        None
    }
}

pub fn from_marker(ar: &str) -> Option<Gender> {
    if ar.trim_end().ends_with(FEMININE_MARKER) {
        Some(Gender::Feminine)
    } else {
        None
    }
}
