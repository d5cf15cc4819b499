// File: src/ingest.rs
use crate::core::lexicon::Lexicon;
use crate::core::types::{lenient_gender, Gender, RecordId, VocabularyRecord};
use crate::error::Result;
use crate::fuzzy::symspell::SymSpell;
use crate::persistence::read_json;
use log::{info, warn};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::path::Path;

const NEAR_DUPLICATE_DISTANCE: usize = 1;

/// A record as supplied by the operator, before it has an id.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewEntry {
    #[serde(default)]
    pub ar: String,
    pub chat: String,
    pub eng: String,
    pub pos: String,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "lenient_gender")]
    pub gender: Option<Gender>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    Added { id: RecordId, near_duplicates: Vec<RecordId> },
    Duplicate { existing: RecordId },
    Invalid(&'static str),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub added: usize,
    pub duplicates: usize,
    pub invalid: usize,
    pub near_duplicates: usize,
}

pub struct Ingestor {
    index: SymSpell,
}

impl Ingestor {
    pub fn new(lexicon: &Lexicon) -> Self {
        Self {
            index: SymSpell::from_records(lexicon.items(), NEAR_DUPLICATE_DISTANCE),
        }
    }

    /// Appends one entry under the next id. Exact `chat`+`pos` duplicates are
    /// refused; close spellings are reported but still added.
    pub fn add(&mut self, lexicon: &mut Lexicon, entry: NewEntry) -> AddOutcome {
        let chat = entry.chat.trim().to_string();
        if chat.is_empty() || entry.eng.trim().is_empty() {
            return AddOutcome::Invalid("chat and eng are required");
        }
        if entry.pos.trim().is_empty() {
            return AddOutcome::Invalid("pos is required");
        }
        if let Some(existing) = lexicon.find_by_chat(&chat, Some(entry.pos.trim())) {
            warn!("'{}' ({}) already exists as {}", chat, entry.pos, existing.id);
            return AddOutcome::Duplicate { existing: existing.id };
        }

        let mut near: Vec<RecordId> = self.index.lookup(&chat).into_iter().collect();
        near.sort_unstable();
        if !near.is_empty() {
            warn!("'{}' looks like existing records {:?}", chat, near);
        }

        let record = VocabularyRecord {
            ar: entry.ar.trim().to_string(),
            chat: chat.clone(),
            eng: entry.eng.trim().to_lowercase(),
            pos: entry.pos.trim().to_lowercase(),
            kind: entry.kind,
            gender: entry.gender,
            extra: entry.extra,
            ..Default::default()
        };
        let id = lexicon.push(record);
        self.index.add_word(&chat, id);
        info!("Added '{}' as {}", chat, id);
        AddOutcome::Added { id, near_duplicates: near }
    }

    /// Adds every entry of a JSON array file.
    pub fn import(&mut self, lexicon: &mut Lexicon, file: &Path) -> Result<ImportReport> {
        let entries: Vec<NewEntry> = read_json(file)?;
        let mut report = ImportReport::default();
        for entry in entries {
            match self.add(lexicon, entry) {
                AddOutcome::Added { near_duplicates, .. } => {
                    report.added += 1;
                    if !near_duplicates.is_empty() {
                        report.near_duplicates += 1;
                    }
                }
                AddOutcome::Duplicate { .. } => report.duplicates += 1,
                AddOutcome::Invalid(why) => {
                    warn!("Skipping entry: {}", why);
                    report.invalid += 1;
                }
            }
        }
        info!(
            "Import: {} added, {} duplicates, {} invalid, {} near-duplicates",
            report.added, report.duplicates, report.invalid, report.near_duplicates
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Database;

    fn entry(chat: &str, eng: &str, pos: &str) -> NewEntry {
        NewEntry {
            chat: chat.into(),
            eng: eng.into(),
            pos: pos.into(),
            ..Default::default()
        }
    }

    #[test]
    fn add_assigns_next_id_and_refuses_duplicates() {
        let mut db = Database::default();
        db.items.push(VocabularyRecord::new(4, "بيت", "bait", "house", "noun"));
        let mut lex = Lexicon::from_database(db, Path::new("unused.json"));
        let mut ingestor = Ingestor::new(&lex);

        match ingestor.add(&mut lex, entry("baab", "Door", "noun")) {
            AddOutcome::Added { id, .. } => assert_eq!(id, 5),
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(lex.items()[1].eng, "door");
        assert_eq!(
            ingestor.add(&mut lex, entry("Bait", "house", "noun")),
            AddOutcome::Duplicate { existing: 4 }
        );
        assert_eq!(
            ingestor.add(&mut lex, entry("", "x", "noun")),
            AddOutcome::Invalid("chat and eng are required")
        );
    }

    #[test]
    fn close_spelling_is_added_but_reported() {
        let mut db = Database::default();
        db.items.push(VocabularyRecord::new(1, "شنطة", "shantah", "bag", "noun"));
        let mut lex = Lexicon::from_database(db, Path::new("unused.json"));
        let mut ingestor = Ingestor::new(&lex);

        match ingestor.add(&mut lex, entry("shanta", "handbag", "noun")) {
            AddOutcome::Added { id, near_duplicates } => {
                assert_eq!(id, 2);
                assert_eq!(near_duplicates, vec![1]);
            }
            other => panic!("unexpected {:?}", other),
        }
    }
}
