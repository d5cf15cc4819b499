// File: src/pipeline/sentences.rs
//! Picture-quiz sentences: text, audio, one correct image and three distractors.

use crate::config::Config;
use crate::core::types::{SentenceFile, SentenceRecord, VocabularyRecord};
use crate::error::{Error, Result};
use crate::persistence::{load_sentences, save_sentences};
use crate::pipeline::{path_string, BatchReport, Throttle};
use crate::services::{complete_or_original, Downloader, ImageGen, SpeechSynth, TextModel};
use chrono::Utc;
use log::{info, warn};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DISTRACTOR_COUNT: usize = 3;

pub const SENTENCE_SYSTEM: &str = "You write very short, everyday Emirati Arabic sentences for \
beginners. The sentence must describe a scene that can be drawn. Reply with JSON only: \
{\"arabic\": \"...\", \"chat\": \"...\", \"english\": \"...\"} where chat is Arabizi.";

pub const IMAGE_PROMPT_SYSTEM: &str = "Turn the sentence into a detailed prompt for a simple, \
friendly flat illustration with no text in the image. Reply with the prompt only.";

pub const DISTRACTOR_SYSTEM: &str = "Given a scene, describe three different scenes that a \
learner could confuse with it (same setting, different action or object). Reply with a JSON \
array of three strings only.";

#[derive(Debug, Deserialize)]
struct GeneratedSentence {
    arabic: String,
    chat: String,
    english: String,
}

/// The external collaborators the sentence job needs.
pub struct SentenceServices<'a> {
    pub text: &'a dyn TextModel,
    pub speech: &'a dyn SpeechSynth,
    pub images: &'a dyn ImageGen,
    pub downloader: &'a dyn Downloader,
}

/// Models like to wrap JSON in markdown fences.
fn strip_fences(reply: &str) -> &str {
    let trimmed = reply.trim();
    let without_open = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .unwrap_or(trimmed);
    without_open.strip_suffix("```").unwrap_or(without_open).trim()
}

fn parse_sentence(reply: &str) -> Result<GeneratedSentence> {
    let s: GeneratedSentence = serde_json::from_str(strip_fences(reply))?;
    if s.arabic.trim().is_empty() || s.english.trim().is_empty() {
        return Err(Error::InvalidRecord("generated sentence is empty".into()));
    }
    Ok(s)
}

fn parse_distractors(reply: &str) -> Result<Vec<String>> {
    let scenes: Vec<String> = serde_json::from_str(strip_fences(reply))?;
    let scenes: Vec<String> = scenes.into_iter().filter(|s| !s.trim().is_empty()).collect();
    if scenes.len() < DISTRACTOR_COUNT {
        return Err(Error::InvalidRecord(format!("expected {} distractors, got {}", DISTRACTOR_COUNT, scenes.len())));
    }
    Ok(scenes.into_iter().take(DISTRACTOR_COUNT).collect())
}

/// Words that do not yet appear in any sentence's English.
pub fn seed_words<'a>(items: &'a [VocabularyRecord], file: &SentenceFile) -> Vec<&'a VocabularyRecord> {
    let used: Vec<String> = file.sentences.iter().map(|s| s.english.to_lowercase()).collect();
    items
        .iter()
        .filter(|r| r.is_pos("noun") && !r.eng.trim().is_empty() && !r.chat.trim().is_empty())
        .filter(|r| {
            let word = r.eng.trim().to_lowercase();
            !used.iter().any(|e| e.split(|c: char| !c.is_alphanumeric()).any(|w| w == word))
        })
        .collect()
}

pub struct SentenceJob<'a> {
    services: SentenceServices<'a>,
    voice: String,
    audio_dir: PathBuf,
    image_dir: PathBuf,
    throttle: Throttle,
}

impl<'a> SentenceJob<'a> {
    pub fn new(services: SentenceServices<'a>, config: &Config) -> Self {
        Self {
            services,
            voice: config.voice_id.clone(),
            audio_dir: config.audio_dir.join("sentences"),
            image_dir: config.image_dir.join("sentences"),
            throttle: Throttle::new(config.throttle),
        }
    }

    pub fn with_throttle(mut self, throttle: Throttle) -> Self {
        self.throttle = throttle;
        self
    }

    /// Appends up to `count` sentences to `file`, one per unused seed word.
    pub fn generate(&self, items: &[VocabularyRecord], file: &mut SentenceFile, count: usize) -> Result<BatchReport> {
        fs::create_dir_all(&self.audio_dir)?;
        fs::create_dir_all(&self.image_dir)?;
        let mut report = BatchReport::default();

        let seeds: Vec<VocabularyRecord> = seed_words(items, file).into_iter().cloned().collect();
        for word in seeds.iter().take(count) {
            let id = file.next_id();
            match self.build_one(id, word) {
                Ok(sentence) => {
                    info!("Sentence {}: {}", id, sentence.english);
                    file.sentences.push(sentence);
                    report.success();
                }
                Err(e) => {
                    warn!("Sentence for '{}' failed: {}", word.chat, e);
                    report.failure();
                }
            }
        }
        report.log_summary("sentences");
        Ok(report)
    }

    fn build_one(&self, id: u64, word: &VocabularyRecord) -> Result<SentenceRecord> {
        let ask = format!("Use the word '{}' ({}, meaning '{}').", word.chat, word.ar, word.eng);
        let reply = self.services.text.complete(SENTENCE_SYSTEM, &ask);
        self.throttle.pause();
        let generated = parse_sentence(&reply?)?;

        let audio = self.services.speech.synthesize(generated.arabic.trim(), &self.voice);
        self.throttle.pause();
        let audio_path = self.audio_dir.join(format!("sentence_{}.mp3", id));
        fs::write(&audio_path, audio?)?;

        let correct = complete_or_original(self.services.text, IMAGE_PROMPT_SYSTEM, &generated.english);
        self.throttle.pause();
        let reply = self.services.text.complete(DISTRACTOR_SYSTEM, &generated.english);
        self.throttle.pause();
        let distractors = parse_distractors(&reply?)?;

        let mut images = Vec::with_capacity(1 + DISTRACTOR_COUNT);
        for (i, prompt) in std::iter::once(correct).chain(distractors).enumerate() {
            let path = self.image_dir.join(format!("sentence_{}_{}.png", id, i));
            self.fetch_image(&prompt, &path)?;
            images.push(path_string(&path));
        }

        Ok(SentenceRecord {
            id,
            arabic: generated.arabic.trim().to_string(),
            chat: generated.chat.trim().to_string(),
            english: generated.english.trim().to_string(),
            audio_path: path_string(&audio_path),
            images,
            correct_image_index: 0,
            created_at: Utc::now(),
        })
    }

    fn fetch_image(&self, prompt: &str, path: &Path) -> Result<()> {
        let url = self.services.images.generate(prompt);
        self.throttle.pause();
        let bytes = self.services.downloader.download(&url?)?;
        fs::write(path, bytes)?;
        Ok(())
    }
}

/// Loads both files, generates, and saves the canonical sentences file plus mirrors.
pub fn run(services: SentenceServices<'_>, config: &Config, items: &[VocabularyRecord], count: usize) -> Result<BatchReport> {
    let mut file = load_sentences(&config.sentences_path)?;
    let report = SentenceJob::new(services, config).generate(items, &mut file, count)?;
    if report.succeeded > 0 {
        save_sentences(&mut file, &config.sentences_path, &config.mirrors)?;
    }
    Ok(report)
}
