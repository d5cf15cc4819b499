// File: src/pipeline/audio.rs
use crate::core::types::VocabularyRecord;
use crate::error::Result;
use crate::pipeline::{file_stem, BatchReport, Throttle};
use crate::services::SpeechSynth;
use log::{info, warn};
use std::fs;
use std::path::{Path, PathBuf};

pub fn word_audio_path(audio_dir: &Path, record: &VocabularyRecord) -> PathBuf {
    audio_dir.join(format!("{}.mp3", file_stem(&record.chat)))
}

/// Renders the Arabic of every record to `<audio_dir>/<chat>.mp3`.
/// Existing files are left alone, so reruns only fill the gaps.
pub fn generate_word_audio(
    items: &[VocabularyRecord],
    synth: &dyn SpeechSynth,
    voice: &str,
    audio_dir: &Path,
    throttle: Throttle,
    limit: Option<usize>,
) -> Result<BatchReport> {
    fs::create_dir_all(audio_dir)?;
    let mut report = BatchReport::default();
    let mut calls = 0usize;

    for record in items {
        if limit.map_or(false, |l| calls >= l) {
            break;
        }
        if record.ar.trim().is_empty() || record.chat.trim().is_empty() {
            warn!("Record {} has no Arabic or chat, skipping audio", record.id);
            report.skip();
            continue;
        }
        let path = word_audio_path(audio_dir, record);
        if path.exists() {
            report.skip();
            continue;
        }

        calls += 1;
        let result = synth.synthesize(record.ar.trim(), voice);
        throttle.pause();
        match result.and_then(|bytes| fs::write(&path, bytes).map_err(Into::into)) {
            Ok(()) => {
                info!("Audio for '{}' -> {}", record.chat, path.display());
                report.success();
            }
            Err(e) => {
                warn!("Audio for '{}' failed: {}", record.chat, e);
                report.failure();
            }
        }
    }
    report.log_summary("audio");
    Ok(report)
}
