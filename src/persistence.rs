// File: src/persistence.rs
use crate::core::types::{Database, SentenceFile};
use crate::error::{Error, Result};
use chrono::Utc;
use log::{debug, info};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Writes `value` as 2-space pretty JSON through a temp file in the same
/// directory, then renames it over `path`.
pub fn write_json_atomic<T: Serialize>(value: &T, path: &Path) -> Result<()> {
    let parent_dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent_dir)?;

    let temp_file = NamedTempFile::new_in(parent_dir)?;
    {
        let mut writer = BufWriter::new(&temp_file);
        serde_json::to_writer_pretty(&mut writer, value)?;
        writer.flush()?;
    }

    temp_file.persist(path).map_err(|e| Error::Io(e.error))?;
    debug!("Wrote {}", path.display());
    Ok(())
}

pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    if !path.exists() {
        return Err(Error::MissingFile(path.to_path_buf()));
    }
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}

pub fn load_database(path: &Path) -> Result<Database> {
    let db: Database = read_json(path)?;
    info!(
        "Loaded {} items and {} numerals from {}",
        db.items.len(),
        db.numerals.len(),
        path.display()
    );
    Ok(db)
}

pub fn save_database(db: &Database, path: &Path) -> Result<()> {
    write_json_atomic(db, path)?;
    info!("Saved {} items to {}", db.items.len(), path.display());
    Ok(())
}

/// A missing sentences file is an empty one: the sentence job creates it.
pub fn load_sentences(path: &Path) -> Result<SentenceFile> {
    match read_json(path) {
        Err(Error::MissingFile(_)) => Ok(SentenceFile::default()),
        other => other,
    }
}

/// Stamps `lastUpdated` and writes the canonical copy followed by every mirror.
pub fn save_sentences<P: AsRef<Path>>(file: &mut SentenceFile, path: &Path, mirrors: &[P]) -> Result<()> {
    file.last_updated = Some(Utc::now());
    write_json_atomic(&*file, path)?;
    for mirror in mirrors {
        write_json_atomic(&*file, mirror.as_ref())?;
    }
    info!(
        "Saved {} sentences to {} (+{} mirrors)",
        file.sentences.len(),
        path.display(),
        mirrors.len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{Gender, VocabularyRecord};
    use tempfile::tempdir;

    #[test]
    fn unknown_keys_survive_a_rewrite() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("logic.json");
        fs::write(
            &path,
            r#"{"items":[{"id":1,"ar":"بيت","chat":"bait","eng":"house","pos":"noun","emoji":"🏠"}],"numerals":[],"version":3}"#,
        )
        .unwrap();

        let db = load_database(&path).unwrap();
        assert_eq!(db.items[0].extra.get("emoji").and_then(|v| v.as_str()), Some("🏠"));
        save_database(&db, &path).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("\n  \"items\""));
        assert!(text.contains("\"emoji\": \"🏠\""));
        assert!(text.contains("\"version\": 3"));
        assert!(!text.contains("\"my\""));
    }

    #[test]
    fn unreadable_gender_only_affects_its_record() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("logic.json");
        fs::write(
            &path,
            r#"{"items":[
                {"id":1,"ar":"شنطة","chat":"shantah","eng":"bag","pos":"noun","gender":""},
                {"id":2,"ar":"بيت","chat":"bait","eng":"house","pos":"noun","gender":"m"},
                {"id":3,"ar":"أم","chat":"umm","eng":"mother","pos":"noun","gender":"Female"},
                {"id":4,"ar":"باب","chat":"baab","eng":"door","pos":"noun","gender":7}
            ],"numerals":[]}"#,
        )
        .unwrap();

        let db = load_database(&path).unwrap();
        assert_eq!(db.items.len(), 4);
        assert_eq!(db.items[0].gender, None);
        assert_eq!(db.items[1].gender, Some(Gender::Masculine));
        assert_eq!(db.items[2].gender, Some(Gender::Feminine));
        assert_eq!(db.items[3].gender, None);
    }

    #[test]
    fn missing_database_is_an_error() {
        let dir = tempdir().unwrap();
        let err = load_database(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, Error::MissingFile(_)));
    }

    #[test]
    fn sentences_are_mirrored() {
        let dir = tempdir().unwrap();
        let canonical = dir.path().join("sentences.json");
        let public = dir.path().join("public").join("sentences.json");
        let build = dir.path().join("dist").join("sentences.json");

        let mut file = load_sentences(&canonical).unwrap();
        assert!(file.sentences.is_empty());
        save_sentences(&mut file, &canonical, &[&public, &build]).unwrap();

        let a = fs::read_to_string(&canonical).unwrap();
        assert_eq!(a, fs::read_to_string(&public).unwrap());
        assert_eq!(a, fs::read_to_string(&build).unwrap());
        assert!(a.contains("lastUpdated"));
    }

    #[test]
    fn record_round_trips_through_disk() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("logic.json");
        let mut db = Database::default();
        let mut r = VocabularyRecord::new(1, "شنطة", "shantah", "bag", "noun");
        r.kind = Some("word".into());
        db.items.push(r);
        save_database(&db, &path).unwrap();
        assert_eq!(load_database(&path).unwrap(), db);
    }
}
