// File: src/fuzzy/symspell.rs
use crate::core::types::{RecordId, VocabularyRecord};
use crate::fuzzy::similarity::normalize_arabizi;
use std::collections::{HashMap, HashSet};

/// Near-duplicate lookup over Arabizi spellings, based on the Symmetric
/// Delete algorithm: every spelling is indexed under all of its deletes up
/// to `max_edit_distance`, so a lookup only has to generate the deletes of
/// the query.
#[derive(Clone, Debug)]
pub struct SymSpell {
    deletes: HashMap<String, HashSet<RecordId>>,
    max_edit_distance: usize,
}

impl SymSpell {
    pub fn new(max_edit_distance: usize) -> Self {
        Self {
            deletes: HashMap::new(),
            max_edit_distance,
        }
    }

    /// Indexes the `chat` of every record.
    pub fn from_records(records: &[VocabularyRecord], max_edit_distance: usize) -> Self {
        let mut index = Self::new(max_edit_distance);
        for record in records {
            index.add_word(&record.chat, record.id);
        }
        index
    }

    pub fn add_word(&mut self, word: &str, id: RecordId) {
        let normalized = normalize_arabizi(word);
        if normalized.is_empty() {
            return;
        }
        for edit in self.generate_edits(&normalized) {
            self.deletes.entry(edit).or_default().insert(id);
        }
    }

    /// Ids whose spelling is within the edit distance of `input`, after
    /// normalisation. Complexity is independent of the index size.
    pub fn lookup(&self, input: &str) -> HashSet<RecordId> {
        let mut candidates = HashSet::new();
        let normalized = normalize_arabizi(input);
        if normalized.is_empty() {
            return candidates;
        }
        for edit in self.generate_edits(&normalized) {
            if let Some(ids) = self.deletes.get(&edit) {
                candidates.extend(ids.iter().copied());
            }
        }
        candidates
    }

    fn generate_edits(&self, word: &str) -> HashSet<String> {
        let mut edits = HashSet::new();
        edits.insert(word.to_string());

        let mut current_edits = edits.clone();
        for _ in 0..self.max_edit_distance {
            let mut next_edits = HashSet::new();
            for edit in current_edits {
                let chars: Vec<char> = edit.chars().collect();
                for i in 0..chars.len() {
                    let deleted_variant: String = chars
                        .iter()
                        .enumerate()
                        .filter(|&(j, _)| j != i)
                        .map(|(_, c)| *c)
                        .collect();
                    next_edits.insert(deleted_variant);
                }
            }
            edits.extend(next_edits.iter().cloned());
            current_edits = next_edits;
        }
        edits
    }
}
