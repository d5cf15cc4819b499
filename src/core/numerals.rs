// File: src/core/numerals.rs
use crate::core::alternate::renumber;
use crate::core::types::{Database, NumeralRecord, VocabularyRecord};
use log::{info, warn};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NumeralReport {
    pub moved: usize,
    pub duplicates: usize,
    pub unparsed: Vec<String>,
}

/// Moves `pos == "numeral"` items into `numerals`, then renumbers `items`.
pub fn split_numerals(db: &mut Database) -> NumeralReport {
    let mut report = NumeralReport::default();
    let items = std::mem::take(&mut db.items);
    let mut kept = Vec::with_capacity(items.len());

    for record in items {
        if !record.is_pos("numeral") {
            kept.push(record);
            continue;
        }
        match numeral_value(&record) {
            Some(value) => {
                if db.numerals.iter().any(|n| n.value == value) {
                    warn!("Numeral {} already present, dropping duplicate '{}'", value, record.chat);
                    report.duplicates += 1;
                } else {
                    db.numerals.push(NumeralRecord {
                        value,
                        ar: record.ar.clone(),
                        chat: record.chat.clone(),
                    });
                    report.moved += 1;
                }
            }
            None => {
                warn!("Could not read a value for numeral {} ('{}'), keeping it in items", record.id, record.eng);
                report.unparsed.push(record.eng.clone());
                kept.push(record);
            }
        }
    }

    db.numerals.sort_by_key(|n| n.value);
    db.items = kept;
    renumber(&mut db.items);
    info!("Moved {} numerals ({} duplicates, {} unparsed)", report.moved, report.duplicates, report.unparsed.len());
    report
}

/// Explicit `value` key, then a digit gloss, then English number words.
pub fn numeral_value(record: &VocabularyRecord) -> Option<i64> {
    if let Some(v) = record.extra.get("value").and_then(|v| v.as_i64()) {
        return Some(v);
    }
    let gloss = record.eng.trim();
    if let Ok(v) = gloss.parse::<i64>() {
        return Some(v);
    }
    parse_number_words(gloss)
}

pub fn parse_number_words(text: &str) -> Option<i64> {
    let lowered = text.to_lowercase();
    let mut total = 0i64;
    let mut current = 0i64;
    let mut seen = false;

    for word in lowered.split(|c: char| c.is_whitespace() || c == '-').filter(|w| !w.is_empty()) {
        match word {
            "and" => continue,
            "a" if !seen => current = 1,
            "hundred" => current = current.max(1) * 100,
            "thousand" => {
                total += current.max(1) * 1000;
                current = 0;
            }
            _ => current += small_number(word)?,
        }
        seen = true;
    }
    if seen {
        Some(total + current)
    } else {
        None
    }
}

fn small_number(word: &str) -> Option<i64> {
    let v = match word {
        "zero" => 0, "one" => 1, "two" => 2, "three" => 3, "four" => 4,
        "five" => 5, "six" => 6, "seven" => 7, "eight" => 8, "nine" => 9,
        "ten" => 10, "eleven" => 11, "twelve" => 12, "thirteen" => 13,
        "fourteen" => 14, "fifteen" => 15, "sixteen" => 16, "seventeen" => 17,
        "eighteen" => 18, "nineteen" => 19, "twenty" => 20, "thirty" => 30,
        "forty" => 40, "fifty" => 50, "sixty" => 60, "seventy" => 70,
        "eighty" => 80, "ninety" => 90,
        _ => return None,
    };
    Some(v)
}
