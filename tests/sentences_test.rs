use lexicon_core::config::Config;
use lexicon_core::core::types::VocabularyRecord;
use lexicon_core::error::{Error, Result};
use lexicon_core::persistence::load_sentences;
use lexicon_core::pipeline::sentences::{
    run, SentenceServices, DISTRACTOR_SYSTEM, IMAGE_PROMPT_SYSTEM, SENTENCE_SYSTEM,
};
use lexicon_core::services::{Downloader, ImageGen, SpeechSynth, TextModel};
use std::cell::Cell;
use std::fs;
use std::time::Duration;
use tempfile::tempdir;

struct FakeText;
impl TextModel for FakeText {
    fn complete(&self, system: &str, input: &str) -> Result<String> {
        if system == SENTENCE_SYSTEM {
            if input.contains("kursi") {
                return Ok("```json\n{\"arabic\": \"القطو تحت الكرسي\", \"chat\": \"il gattu ta7t il kursi\", \"english\": \"The cat is under the chair\"}\n```".into());
            }
            return Err(Error::Api { status: 500, body: "no sentence".into() });
        }
        if system == IMAGE_PROMPT_SYSTEM {
            return Ok(format!("flat illustration: {}", input));
        }
        if system == DISTRACTOR_SYSTEM {
            return Ok(r#"["cat on the chair", "cat behind the chair", "dog under the chair"]"#.into());
        }
        Err(Error::Api { status: 400, body: "unexpected".into() })
    }
}

struct FakeSpeech;
impl SpeechSynth for FakeSpeech {
    fn synthesize(&self, _text: &str, voice: &str) -> Result<Vec<u8>> {
        assert_eq!(voice, "test-voice");
        Ok(b"ID3".to_vec())
    }
}

struct FakeImages {
    calls: Cell<usize>,
}
impl ImageGen for FakeImages {
    fn generate(&self, prompt: &str) -> Result<String> {
        self.calls.set(self.calls.get() + 1);
        Ok(format!("https://images.test/{}", prompt.len()))
    }
}

struct FakeDownloader;
impl Downloader for FakeDownloader {
    fn download(&self, _url: &str) -> Result<Vec<u8>> {
        Ok(vec![0x89, b'P', b'N', b'G'])
    }
}

#[test]
fn sentence_job_writes_media_and_every_copy() {
    let dir = tempdir().unwrap();
    let mut config = Config::default();
    config.sentences_path = dir.path().join("sentences.json");
    config.mirrors = vec![
        dir.path().join("public").join("sentences.json"),
        dir.path().join("dist").join("sentences.json"),
    ];
    config.audio_dir = dir.path().join("audio");
    config.image_dir = dir.path().join("images");
    config.throttle = Duration::ZERO;
    config.voice_id = "test-voice".into();

    let items = vec![
        VocabularyRecord::new(1, "بيت", "bait", "house", "noun"),
        VocabularyRecord::new(2, "كرسي", "kursi", "chair", "noun"),
    ];
    let images = FakeImages { calls: Cell::new(0) };
    let services = SentenceServices {
        text: &FakeText,
        speech: &FakeSpeech,
        images: &images,
        downloader: &FakeDownloader,
    };

    let report = run(services, &config, &items, 5).unwrap();
    // "bait" fails at the text step and is skipped, "kursi" succeeds.
    assert_eq!(report.processed, 2);
    assert_eq!(report.succeeded, 1);
    assert_eq!(report.failed, 1);
    assert_eq!(images.calls.get(), 4);

    let file = load_sentences(&config.sentences_path).unwrap();
    assert_eq!(file.sentences.len(), 1);
    let s = &file.sentences[0];
    assert_eq!(s.correct_image_index, 0);
    assert_eq!(s.images.len(), 4);
    assert_eq!(s.english, "The cat is under the chair");
    for image in &s.images {
        assert!(std::path::Path::new(image).exists(), "{} missing", image);
    }
    assert!(std::path::Path::new(&s.audio_path).exists());
    assert!(file.last_updated.is_some());

    let canonical = fs::read_to_string(&config.sentences_path).unwrap();
    for mirror in &config.mirrors {
        assert_eq!(fs::read_to_string(mirror).unwrap(), canonical);
    }
    assert!(canonical.contains("\"correctImageIndex\": 0"));
    assert!(canonical.contains("\"audioPath\""));
}

#[test]
fn nothing_generated_means_nothing_written() {
    let dir = tempdir().unwrap();
    let mut config = Config::default();
    config.sentences_path = dir.path().join("sentences.json");
    config.audio_dir = dir.path().join("audio");
    config.image_dir = dir.path().join("images");
    config.throttle = Duration::ZERO;

    let items = vec![VocabularyRecord::new(1, "بيت", "bait", "house", "noun")];
    let images = FakeImages { calls: Cell::new(0) };
    let services = SentenceServices {
        text: &FakeText,
        speech: &FakeSpeech,
        images: &images,
        downloader: &FakeDownloader,
    };
    let report = run(services, &config, &items, 3).unwrap();
    assert_eq!(report.succeeded, 0);
    assert!(!config.sentences_path.exists());
}
