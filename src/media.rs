// File: src/media.rs
//! Which records have image/video assets, keyed by lowercased `chat`.

use crate::core::types::{RecordId, VocabularyRecord};
use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp", "gif"];
const VIDEO_EXTENSIONS: &[&str] = &["mp4", "webm", "mov"];

/// Assets found under the media directory, by lowercased file stem.
#[derive(Debug, Default)]
pub struct MediaIndex {
    images: HashMap<String, PathBuf>,
    videos: HashMap<String, PathBuf>,
}

impl MediaIndex {
    /// Walks `dir` recursively. A missing directory is fatal.
    pub fn scan(dir: &Path) -> Result<Self> {
        if !dir.is_dir() {
            return Err(Error::MediaDirMissing(dir.to_path_buf()));
        }
        let mut index = Self::default();
        for entry in WalkDir::new(dir).into_iter().filter_map(|e| e.ok()) {
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            let (Some(stem), Some(ext)) = (path.file_stem(), path.extension()) else {
                continue;
            };
            let stem = stem.to_string_lossy().to_lowercase();
            let ext = ext.to_string_lossy().to_lowercase();
            let relative = path.strip_prefix(dir).unwrap_or(path).to_path_buf();

            if IMAGE_EXTENSIONS.contains(&ext.as_str()) {
                index.images.entry(stem).or_insert(relative);
            } else if VIDEO_EXTENSIONS.contains(&ext.as_str()) {
                index.videos.entry(stem).or_insert(relative);
            }
        }
        info!(
            "Media index: {} images, {} videos under {}",
            index.images.len(),
            index.videos.len(),
            dir.display()
        );
        Ok(index)
    }

    pub fn insert_image(&mut self, stem: &str, path: PathBuf) {
        self.images.insert(stem.to_lowercase(), path);
    }

    pub fn insert_video(&mut self, stem: &str, path: PathBuf) {
        self.videos.insert(stem.to_lowercase(), path);
    }

    pub fn image(&self, stem: &str) -> Option<&PathBuf> {
        self.images.get(stem)
    }

    pub fn video(&self, stem: &str) -> Option<&PathBuf> {
        self.videos.get(stem)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaEntry {
    pub id: RecordId,
    pub chat: String,
    pub has_image: bool,
    pub has_video: bool,
    pub has_any_media: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_path: Option<String>,
    pub is_alternate: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_verb_chat: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaManifest {
    pub generated_at: DateTime<Utc>,
    pub entries: BTreeMap<String, MediaEntry>,
}

impl MediaManifest {
    pub fn get(&self, chat: &str) -> Option<&MediaEntry> {
        self.entries.get(&chat.trim().to_lowercase())
    }

    pub fn with_media(&self) -> usize {
        self.entries.values().filter(|e| e.has_any_media).count()
    }
}

/// The base verb whose media an alternate verb shares, if `record` is one.
///
/// Explicit `isAlternate`/`baseVerbChat` keys win; otherwise a verb whose
/// `alternate` partner is a verb with a lower id is the alternate.
pub fn base_verb_chat(record: &VocabularyRecord, items: &[VocabularyRecord]) -> Option<String> {
    if !record.is_pos("verb") {
        return None;
    }
    let flagged = record.extra.get("isAlternate").and_then(|v| v.as_bool()).unwrap_or(false);
    if flagged {
        if let Some(base) = record.extra.get("baseVerbChat").and_then(|v| v.as_str()) {
            return Some(base.to_string());
        }
    }
    let partner_id = record.alternate?;
    let partner = items.iter().find(|r| r.id == partner_id)?;
    if partner.is_pos("verb") && partner.id < record.id {
        Some(partner.chat.clone())
    } else {
        None
    }
}

pub fn build_manifest(items: &[VocabularyRecord], index: &MediaIndex) -> MediaManifest {
    let mut entries = BTreeMap::new();
    for record in items {
        let key = record.media_stem();
        if key.is_empty() {
            continue;
        }
        let base = base_verb_chat(record, items);
        // Alternates share the base verb's assets; never look up their own stem.
        let lookup = base.as_deref().map(|b| b.trim().to_lowercase()).unwrap_or_else(|| key.clone());

        let image = index.image(&lookup);
        let video = index.video(&lookup);
        let entry = MediaEntry {
            id: record.id,
            chat: record.chat.clone(),
            has_image: image.is_some(),
            has_video: video.is_some(),
            has_any_media: image.is_some() || video.is_some(),
            image_path: image.map(|p| p.to_string_lossy().replace('\\', "/")),
            video_path: video.map(|p| p.to_string_lossy().replace('\\', "/")),
            is_alternate: base.is_some(),
            base_verb_chat: base,
        };
        if entries.insert(key.clone(), entry).is_some() {
            warn!("Media key '{}' is shared by several records; keeping record {}", key, record.id);
        }
    }
    MediaManifest { generated_at: Utc::now(), entries }
}

/// Scans `media_dir` and reconciles it against `items`.
pub fn reconcile(items: &[VocabularyRecord], media_dir: &Path) -> Result<MediaManifest> {
    let index = MediaIndex::scan(media_dir)?;
    let manifest = build_manifest(items, &index);
    info!(
        "Manifest: {} of {} records have media",
        manifest.with_media(),
        manifest.entries.len()
    );
    Ok(manifest)
}
