// File: src/core/alternate.rs
//! Dialectal variant pairs (`alternate`) and dense id renumbering.

use crate::core::types::{RecordId, VocabularyRecord};
use crate::error::{Error, Result};
use log::{info, warn};
use std::collections::HashMap;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SplitReport {
    pub split: usize,
    pub left_as_is: Vec<RecordId>,
    pub dangling_cleared: usize,
    pub partners_cleared: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlternateIssue {
    SelfReference { id: RecordId },
    Dangling { id: RecordId, alternate: RecordId },
    Asymmetric { id: RecordId, alternate: RecordId, back: Option<RecordId> },
}

/// Splits "zoojee/rayylee" style records into two linked records and
/// renumbers the whole collection densely from 1.
pub fn split_compounds(items: Vec<VocabularyRecord>) -> (Vec<VocabularyRecord>, SplitReport) {
    let mut report = SplitReport::default();
    let mut out: Vec<VocabularyRecord> = Vec::with_capacity(items.len());
    let mut remap: HashMap<RecordId, RecordId> = HashMap::new();
    let mut pairs: Vec<(usize, usize)> = Vec::new();

    for record in items {
        let old_id = record.id;
        let new_id = out.len() as RecordId + 1;
        if remap.insert(old_id, new_id).is_some() {
            warn!("Duplicate id {} found while splitting; later record wins", old_id);
        }

        match split_parts(&record) {
            Some(((chat_a, ar_a), (chat_b, ar_b))) => {
                let mut first = record.clone();
                let mut second = record;
                first.chat = chat_a;
                first.ar = ar_a;
                second.chat = chat_b;
                second.ar = ar_b;
                // Forms derived from the compound spelling are meaningless now.
                first.clear_possessives();
                second.clear_possessives();

                let i = out.len();
                out.push(first);
                out.push(second);
                pairs.push((i, i + 1));
                report.split += 1;
            }
            None => {
                if record.chat.contains('/') {
                    warn!("Record {} ('{}') is not a two-way compound, leaving it", old_id, record.chat);
                    report.left_as_is.push(old_id);
                }
                out.push(record);
            }
        }
    }

    for (i, record) in out.iter_mut().enumerate() {
        record.id = i as RecordId + 1;
    }
    report.dangling_cleared = remap_alternates(&mut out, &remap);

    for (a, b) in pairs {
        let (id_a, id_b) = (out[a].id, out[b].id);
        out[a].alternate = Some(id_b);
        out[b].alternate = Some(id_a);
        // The compound's previous partner now points at one of the halves.
        for record in out.iter_mut() {
            let points_at_pair = matches!(record.alternate, Some(x) if x == id_a || x == id_b);
            if points_at_pair && record.id != id_a && record.id != id_b {
                warn!(
                    "Record {} was the alternate of a split compound, clearing its back-pointer",
                    record.id
                );
                record.alternate = None;
                report.partners_cleared += 1;
            }
        }
    }

    info!(
        "Split {} compound records, {} left as-is, {} records total",
        report.split,
        report.left_as_is.len(),
        out.len()
    );
    (out, report)
}

/// Renumbers densely from 1 in array order, carrying every `alternate`
/// pointer through the old-to-new id map. Returns how many dangling
/// pointers were cleared.
pub fn renumber(items: &mut [VocabularyRecord]) -> usize {
    let mut remap = HashMap::new();
    for (i, record) in items.iter_mut().enumerate() {
        let new_id = i as RecordId + 1;
        if remap.insert(record.id, new_id).is_some() {
            warn!("Duplicate id {} found while renumbering; later record wins", record.id);
        }
        record.id = new_id;
    }
    remap_alternates(items, &remap)
}

fn remap_alternates(items: &mut [VocabularyRecord], remap: &HashMap<RecordId, RecordId>) -> usize {
    let mut cleared = 0;
    for record in items.iter_mut() {
        if let Some(old) = record.alternate {
            match remap.get(&old) {
                Some(&new) => record.alternate = Some(new),
                None => {
                    warn!("Record {} pointed at missing alternate {}, clearing", record.id, old);
                    record.alternate = None;
                    cleared += 1;
                }
            }
        }
    }
    cleared
}

/// Makes `a` and `b` each other's alternate, unlinking any previous partners.
pub fn link_alternates(items: &mut [VocabularyRecord], a: RecordId, b: RecordId) -> Result<()> {
    if a == b {
        return Err(Error::InvalidRecord(format!("record {} cannot be its own alternate", a)));
    }
    for id in [a, b] {
        if !items.iter().any(|r| r.id == id) {
            return Err(Error::RecordNotFound(id));
        }
    }

    for record in items.iter_mut() {
        let points_at_pair = matches!(record.alternate, Some(x) if x == a || x == b);
        if points_at_pair && record.id != a && record.id != b {
            record.alternate = None;
        }
    }
    for record in items.iter_mut() {
        if record.id == a {
            record.alternate = Some(b);
        } else if record.id == b {
            record.alternate = Some(a);
        }
    }
    Ok(())
}

pub fn check_symmetry(items: &[VocabularyRecord]) -> Vec<AlternateIssue> {
    let by_id: HashMap<RecordId, &VocabularyRecord> = items.iter().map(|r| (r.id, r)).collect();
    let mut issues = Vec::new();
    for record in items {
        let Some(alt) = record.alternate else { continue };
        if alt == record.id {
            issues.push(AlternateIssue::SelfReference { id: record.id });
            continue;
        }
        match by_id.get(&alt) {
            None => issues.push(AlternateIssue::Dangling { id: record.id, alternate: alt }),
            Some(partner) if partner.alternate != Some(record.id) => {
                issues.push(AlternateIssue::Asymmetric {
                    id: record.id,
                    alternate: alt,
                    back: partner.alternate,
                })
            }
            Some(_) => {}
        }
    }
    issues
}

type Part = (String, String);

fn split_parts(record: &VocabularyRecord) -> Option<(Part, Part)> {
    let chats: Vec<&str> = record.chat.split('/').map(str::trim).collect();
    if chats.len() != 2 || chats.iter().any(|c| c.is_empty()) {
        return None;
    }
    let ars: Vec<&str> = record.ar.split('/').map(str::trim).collect();
    let (ar_a, ar_b) = match ars.as_slice() {
        [one] => (*one, *one),
        [a, b] => (*a, *b),
        _ => return None,
    };
    Some((
        (chats[0].to_string(), ar_a.to_string()),
        (chats[1].to_string(), ar_b.to_string()),
    ))
}
