// src/core/types.rs
use chrono::{DateTime, Utc};
use log::warn;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Identifier of a vocabulary record. Dense, renumbered by maintenance jobs.
pub type RecordId = u64;

pub const FEMININE_MARKER: char = 'ة';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "m", alias = "M")]
    Masculine,
    #[serde(rename = "f", alias = "F")]
    Feminine,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Masculine => "m",
            Gender::Feminine => "f",
        }
    }

    /// Reads the hand-written spellings seen in `logic.json`.
    pub fn parse(raw: &str) -> Option<Gender> {
        match raw.trim().to_lowercase().as_str() {
            "m" | "masc" | "masculine" | "male" => Some(Gender::Masculine),
            "f" | "fem" | "feminine" | "female" => Some(Gender::Feminine),
            _ => None,
        }
    }
}

/// An unreadable `gender` is dropped with a warning so inference takes over,
/// instead of rejecting the whole file.
pub(crate) fn lenient_gender<'de, D>(deserializer: D) -> Result<Option<Gender>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(match raw {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => {
            let parsed = Gender::parse(&s);
            if parsed.is_none() {
                warn!("Ignoring unknown gender {:?}; it will be inferred", s);
            }
            parsed
        }
        Some(other) => {
            warn!("Ignoring non-string gender {}; it will be inferred", other);
            None
        }
    })
}

/// The eight possessed forms attached to nouns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PossessiveCategory {
    My,
    YourM,
    YourF,
    YourPl,
    Our,
    His,
    Her,
    Their,
}

impl PossessiveCategory {
    pub const ALL: [PossessiveCategory; 8] = [
        PossessiveCategory::My,
        PossessiveCategory::YourM,
        PossessiveCategory::YourF,
        PossessiveCategory::YourPl,
        PossessiveCategory::Our,
        PossessiveCategory::His,
        PossessiveCategory::Her,
        PossessiveCategory::Their,
    ];

    /// JSON key of the Arabic-script field; the transliteration key adds `_chat`.
    pub fn key(&self) -> &'static str {
        match self {
            PossessiveCategory::My => "my",
            PossessiveCategory::YourM => "your_m",
            PossessiveCategory::YourF => "your_f",
            PossessiveCategory::YourPl => "your_pl",
            PossessiveCategory::Our => "our",
            PossessiveCategory::His => "his",
            PossessiveCategory::Her => "her",
            PossessiveCategory::Their => "their",
        }
    }
}

/// One entry of `logic.json.items`.
///
/// Keys this type does not model are kept in `extra` and written back
/// untouched, since the file is also edited by hand.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VocabularyRecord {
    pub id: RecordId,
    #[serde(default)]
    pub ar: String,
    #[serde(default)]
    pub chat: String,
    #[serde(default)]
    pub eng: String,
    #[serde(default)]
    pub pos: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "lenient_gender", skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alternate: Option<RecordId>,

    // Possessives (nouns)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub my: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub my_chat: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub your_m: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub your_m_chat: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub your_f: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub your_f_chat: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub your_pl: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub your_pl_chat: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub our: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub our_chat: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub his: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub his_chat: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub her: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub her_chat: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub their: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub their_chat: Option<String>,

    // Verb conjugations
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub you_m: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub you_m_chat: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub you_f: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub you_f_chat: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub you_pl: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub you_pl_chat: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub we: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub we_chat: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub he: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub he_chat: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub she: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub she_chat: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub they: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub they_chat: Option<String>,

    // Feminine agreement (adjectives)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ar_f: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chat_f: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl VocabularyRecord {
    pub fn new(id: RecordId, ar: &str, chat: &str, eng: &str, pos: &str) -> Self {
        Self {
            id,
            ar: ar.to_string(),
            chat: chat.to_string(),
            eng: eng.to_string(),
            pos: pos.to_string(),
            ..Default::default()
        }
    }

    pub fn is_pos(&self, pos: &str) -> bool {
        self.pos.eq_ignore_ascii_case(pos)
    }

    pub fn is_kind(&self, kind: &str) -> bool {
        self.kind.as_deref().map_or(false, |k| k.eq_ignore_ascii_case(kind))
    }

    /// Filename stem for media belonging to this record.
    pub fn media_stem(&self) -> String {
        self.chat.trim().to_lowercase()
    }

    /// Returns the (Arabic, transliteration) pair stored for `category`.
    pub fn possessive(&self, category: PossessiveCategory) -> (Option<&str>, Option<&str>) {
        let (ar, chat) = match category {
            PossessiveCategory::My => (&self.my, &self.my_chat),
            PossessiveCategory::YourM => (&self.your_m, &self.your_m_chat),
            PossessiveCategory::YourF => (&self.your_f, &self.your_f_chat),
            PossessiveCategory::YourPl => (&self.your_pl, &self.your_pl_chat),
            PossessiveCategory::Our => (&self.our, &self.our_chat),
            PossessiveCategory::His => (&self.his, &self.his_chat),
            PossessiveCategory::Her => (&self.her, &self.her_chat),
            PossessiveCategory::Their => (&self.their, &self.their_chat),
        };
        (ar.as_deref(), chat.as_deref())
    }

    pub fn set_possessive(&mut self, category: PossessiveCategory, ar: String, chat: String) {
        let (ar_slot, chat_slot) = match category {
            PossessiveCategory::My => (&mut self.my, &mut self.my_chat),
            PossessiveCategory::YourM => (&mut self.your_m, &mut self.your_m_chat),
            PossessiveCategory::YourF => (&mut self.your_f, &mut self.your_f_chat),
            PossessiveCategory::YourPl => (&mut self.your_pl, &mut self.your_pl_chat),
            PossessiveCategory::Our => (&mut self.our, &mut self.our_chat),
            PossessiveCategory::His => (&mut self.his, &mut self.his_chat),
            PossessiveCategory::Her => (&mut self.her, &mut self.her_chat),
            PossessiveCategory::Their => (&mut self.their, &mut self.their_chat),
        };
        *ar_slot = Some(ar);
        *chat_slot = Some(chat);
    }

    pub fn clear_possessives(&mut self) {
        for slot in [
            &mut self.my,
            &mut self.my_chat,
            &mut self.your_m,
            &mut self.your_m_chat,
            &mut self.your_f,
            &mut self.your_f_chat,
            &mut self.your_pl,
            &mut self.your_pl_chat,
            &mut self.our,
            &mut self.our_chat,
            &mut self.his,
            &mut self.his_chat,
            &mut self.her,
            &mut self.her_chat,
            &mut self.their,
            &mut self.their_chat,
        ] {
            *slot = None;
        }
    }

    pub fn has_possessives(&self) -> bool {
        PossessiveCategory::ALL.iter().all(|&c| {
            let (ar, chat) = self.possessive(c);
            ar.is_some() && chat.is_some()
        })
    }
}

/// One entry of `logic.json.numerals`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumeralRecord {
    pub value: i64,
    pub ar: String,
    pub chat: String,
}

/// The whole of `logic.json`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Database {
    #[serde(default)]
    pub items: Vec<VocabularyRecord>,
    #[serde(default)]
    pub numerals: Vec<NumeralRecord>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Database {
    pub fn find(&self, id: RecordId) -> Option<&VocabularyRecord> {
        self.items.iter().find(|r| r.id == id)
    }

    pub fn find_mut(&mut self, id: RecordId) -> Option<&mut VocabularyRecord> {
        self.items.iter_mut().find(|r| r.id == id)
    }

    pub fn next_id(&self) -> RecordId {
        self.items.iter().map(|r| r.id).max().unwrap_or(0) + 1
    }
}

/// A quiz unit pairing a sentence with one correct and three distractor images.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentenceRecord {
    pub id: u64,
    pub arabic: String,
    pub chat: String,
    pub english: String,
    pub audio_path: String,
    pub images: Vec<String>,
    /// Always 0: the first generated image is the correct one.
    pub correct_image_index: usize,
    pub created_at: DateTime<Utc>,
}

/// The whole of `sentences.json`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentenceFile {
    #[serde(default)]
    pub sentences: Vec<SentenceRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,
}

impl SentenceFile {
    pub fn next_id(&self) -> u64 {
        self.sentences.iter().map(|s| s.id).max().unwrap_or(0) + 1
    }
}
