use crate::core::alternate;
use crate::core::types::{Database, RecordId, VocabularyRecord};
use crate::error::Result;
use crate::persistence::{load_database, save_database};
use log::info;
use std::path::{Path, PathBuf};

/// The in-memory vocabulary with an explicit load/save boundary around `logic.json`.
pub struct Lexicon {
    pub db: Database,
    path: PathBuf,
}

impl Lexicon {
    pub fn open(path: &Path) -> Result<Self> {
        Ok(Self {
            db: load_database(path)?,
            path: path.to_path_buf(),
        })
    }

    pub fn from_database(db: Database, path: &Path) -> Self {
        Self { db, path: path.to_path_buf() }
    }

    /// Loads, lets `f` mutate, and saves only if `f` succeeded.
    pub fn edit<T, F>(path: &Path, f: F) -> Result<T>
    where
        F: FnOnce(&mut Lexicon) -> Result<T>,
    {
        Self::edit_with(path, false, f)
    }

    /// Like [`Lexicon::edit`], but with `dry_run` the mutation is never written.
    pub fn edit_with<T, F>(path: &Path, dry_run: bool, f: F) -> Result<T>
    where
        F: FnOnce(&mut Lexicon) -> Result<T>,
    {
        let mut lexicon = Self::open(path)?;
        let out = f(&mut lexicon)?;
        if dry_run {
            info!("Dry run: {} left unchanged", path.display());
        } else {
            lexicon.save()?;
        }
        Ok(out)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn save(&self) -> Result<()> {
        save_database(&self.db, &self.path)
    }

    pub fn items(&self) -> &[VocabularyRecord] {
        &self.db.items
    }

    pub fn items_mut(&mut self) -> &mut Vec<VocabularyRecord> {
        &mut self.db.items
    }

    pub fn find_by_chat(&self, chat: &str, pos: Option<&str>) -> Option<&VocabularyRecord> {
        let wanted = chat.trim().to_lowercase();
        self.db
            .items
            .iter()
            .find(|r| r.media_stem() == wanted && pos.map_or(true, |p| r.is_pos(p)))
    }

    /// Appends `record` under the next free id and returns that id.
    pub fn push(&mut self, mut record: VocabularyRecord) -> RecordId {
        let id = self.db.next_id();
        record.id = id;
        self.db.items.push(record);
        id
    }

    pub fn link_alternates(&mut self, a: RecordId, b: RecordId) -> Result<()> {
        alternate::link_alternates(&mut self.db.items, a, b)
    }
}
