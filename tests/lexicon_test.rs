use lexicon_core::core::alternate::{check_symmetry, split_compounds};
use lexicon_core::core::numerals::split_numerals;
use lexicon_core::core::possessive::PossessiveDeriver;
use lexicon_core::error::Error;
use lexicon_core::ingest::Ingestor;
use lexicon_core::media::reconcile;
use lexicon_core::Lexicon;
use serde_json::Value;
use std::fs;
use tempfile::tempdir;

const LOGIC: &str = r#"{
  "version": 3,
  "items": [
    {"id": 1, "ar": "شنطة", "chat": "shantah", "eng": "bag", "pos": "noun", "notes": "checked by hand"},
    {"id": 2, "ar": "زوجي/ريلي", "chat": "zoojee/rayylee", "eng": "my husband", "pos": "noun", "my": "stale"},
    {"id": 3, "ar": "ثلاثة", "chat": "thalatha", "eng": "three", "pos": "numeral"},
    {"id": 4, "ar": "يكتب", "chat": "yiktib", "eng": "write", "pos": "verb", "alternate": 5},
    {"id": 5, "ar": "يخط", "chat": "yikhit", "eng": "write", "pos": "verb", "alternate": 4}
  ],
  "numerals": []
}"#;

fn init_logs() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn maintenance_jobs_round_trip_through_disk() {
    init_logs();
    let dir = tempdir().unwrap();
    let path = dir.path().join("logic.json");
    fs::write(&path, LOGIC).unwrap();

    Lexicon::edit(&path, |lex| {
        let items = std::mem::take(lex.items_mut());
        let (split, report) = split_compounds(items);
        assert_eq!(report.split, 1);
        *lex.items_mut() = split;
        split_numerals(&mut lex.db);
        let report = PossessiveDeriver::new().derive_all(lex.items_mut(), None);
        assert_eq!(report.enriched, 3);
        Ok(())
    })
    .unwrap();

    let lex = Lexicon::open(&path).unwrap();
    let chats: Vec<&str> = lex.items().iter().map(|r| r.chat.as_str()).collect();
    assert_eq!(chats, vec!["shantah", "zoojee", "rayylee", "yiktib", "yikhit"]);
    let ids: Vec<u64> = lex.items().iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    assert!(check_symmetry(lex.items()).is_empty());

    // One split added a record and one numeral left; the pair is remapped through both.
    let yiktib = lex.find_by_chat("yiktib", None).unwrap();
    let yikhit = lex.find_by_chat("yikhit", None).unwrap();
    assert_eq!(yiktib.alternate, Some(yikhit.id));

    let bag = lex.find_by_chat("shantah", Some("noun")).unwrap();
    assert_eq!(bag.my_chat.as_deref(), Some("shanty"));
    assert_eq!(bag.my.as_deref(), Some("شنطتي"));
    assert_eq!(bag.extra.get("notes"), Some(&Value::from("checked by hand")));

    let zoojee = lex.find_by_chat("zoojee", None).unwrap();
    assert_ne!(zoojee.my.as_deref(), Some("stale"));

    assert_eq!(lex.db.numerals.len(), 1);
    assert_eq!(lex.db.numerals[0].value, 3);

    let raw: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(raw["version"], 3);
}

#[test]
fn failed_edit_leaves_file_untouched() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("logic.json");
    fs::write(&path, LOGIC).unwrap();

    let result = Lexicon::edit(&path, |lex| lex.link_alternates(1, 99));
    assert!(matches!(result, Err(Error::RecordNotFound(99))));
    assert_eq!(fs::read_to_string(&path).unwrap(), LOGIC);
}

#[test]
fn missing_database_is_fatal() {
    let dir = tempdir().unwrap();
    let result = Lexicon::open(&dir.path().join("logic.json"));
    assert!(matches!(result, Err(Error::MissingFile(_))));
}

#[test]
fn import_skips_duplicates() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("logic.json");
    fs::write(&path, LOGIC).unwrap();
    let batch = dir.path().join("new.json");
    fs::write(
        &batch,
        r#"[
            {"chat": "shantah", "eng": "bag", "pos": "noun"},
            {"ar": "كرسي", "chat": "kursi", "eng": "chair", "pos": "noun", "gender": "m"},
            {"chat": "", "eng": "nothing", "pos": "noun"}
        ]"#,
    )
    .unwrap();

    let report = Lexicon::edit(&path, |lex| {
        let mut ingestor = Ingestor::new(lex);
        ingestor.import(lex, &batch)
    })
    .unwrap();
    assert_eq!(report.added, 1);
    assert_eq!(report.duplicates, 1);
    assert_eq!(report.invalid, 1);

    let lex = Lexicon::open(&path).unwrap();
    let kursi = lex.find_by_chat("kursi", None).unwrap();
    assert_eq!(kursi.id, 6);
}

#[test]
fn manifest_shares_media_between_alternate_verbs() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("logic.json");
    fs::write(&path, LOGIC).unwrap();
    let media = dir.path().join("media");
    fs::create_dir_all(media.join("verbs")).unwrap();
    fs::write(media.join("Shantah.png"), b"png").unwrap();
    fs::write(media.join("verbs").join("yiktib.mp4"), b"mp4").unwrap();

    let lex = Lexicon::open(&path).unwrap();
    let manifest = reconcile(lex.items(), &media).unwrap();

    let bag = manifest.get("shantah").unwrap();
    assert!(bag.has_image && !bag.has_video);

    let base = manifest.get("yiktib").unwrap();
    assert!(base.has_video && !base.is_alternate);
    let alt = manifest.get("yikhit").unwrap();
    assert!(alt.is_alternate && alt.has_video);
    assert_eq!(alt.base_verb_chat.as_deref(), Some("yiktib"));

    assert!(!manifest.get("thalatha").unwrap().has_any_media);

    let missing = reconcile(lex.items(), &dir.path().join("nope"));
    assert!(matches!(missing, Err(Error::MediaDirMissing(_))));
}

#[test]
fn unreadable_gender_falls_back_to_inference() {
    init_logs();
    let dir = tempdir().unwrap();
    let path = dir.path().join("logic.json");
    fs::write(
        &path,
        r#"{"items":[
            {"id":1,"ar":"شنطة","chat":"shantah","eng":"bag","pos":"noun","gender":""},
            {"id":2,"ar":"بيت","chat":"bait","eng":"house","pos":"noun","gender":"neuter"}
        ],"numerals":[]}"#,
    )
    .unwrap();

    let report = Lexicon::edit(&path, |lex| {
        Ok(PossessiveDeriver::new().derive_all(lex.items_mut(), None))
    })
    .unwrap();
    assert_eq!(report.enriched, 2);

    let lex = Lexicon::open(&path).unwrap();
    let bag = lex.find_by_chat("shantah", None).unwrap();
    assert_eq!(bag.gender, None);
    assert_eq!(bag.my_chat.as_deref(), Some("shanty"));
    assert_eq!(lex.find_by_chat("bait", None).unwrap().my_chat.as_deref(), Some("baiti"));
}

#[test]
fn splitting_a_linked_compound_keeps_pairs_symmetric() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("logic.json");
    fs::write(
        &path,
        r#"{"items":[
            {"id":1,"ar":"زوجي/ريلي","chat":"zoojee/rayylee","eng":"husband","pos":"noun","alternate":2},
            {"id":2,"ar":"بعل","chat":"ba3al","eng":"husband","pos":"noun","alternate":1}
        ],"numerals":[]}"#,
    )
    .unwrap();

    Lexicon::edit(&path, |lex| {
        let items = std::mem::take(lex.items_mut());
        let (split, report) = split_compounds(items);
        assert_eq!(report.partners_cleared, 1);
        *lex.items_mut() = split;
        Ok(())
    })
    .unwrap();

    let lex = Lexicon::open(&path).unwrap();
    assert!(check_symmetry(lex.items()).is_empty());
    assert_eq!(lex.find_by_chat("ba3al", None).unwrap().alternate, None);
}
