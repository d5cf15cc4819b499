// File: src/config.rs
use crate::error::{Error, Result};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub const OPENAI_API_KEY: &str = "OPENAI_API_KEY";
pub const ELEVENLABS_API_KEY: &str = "ELEVENLABS_API_KEY";
pub const REPLICATE_API_TOKEN: &str = "REPLICATE_API_TOKEN";
pub const ELEVENLABS_VOICE_ID: &str = "ELEVENLABS_VOICE_ID";
pub const OPENAI_MODEL: &str = "OPENAI_MODEL";

pub const DEFAULT_TEXT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_VOICE_ID: &str = "21m00Tcm4TlvDq8ikWAM";
const DEFAULT_THROTTLE_MS: u64 = 1500;

/// Paths and knobs shared by every batch job.
#[derive(Debug, Clone)]
pub struct Config {
    pub data_path: PathBuf,
    pub sentences_path: PathBuf,
    /// Served/build copies of `sentences.json` kept in sync with the canonical one.
    pub mirrors: Vec<PathBuf>,
    pub media_dir: PathBuf,
    pub audio_dir: PathBuf,
    pub image_dir: PathBuf,
    pub throttle: Duration,
    pub text_model: String,
    pub voice_id: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("logic.json"),
            sentences_path: PathBuf::from("sentences.json"),
            mirrors: Vec::new(),
            media_dir: PathBuf::from("media"),
            audio_dir: PathBuf::from("audio"),
            image_dir: PathBuf::from("images"),
            throttle: Duration::from_millis(DEFAULT_THROTTLE_MS),
            text_model: DEFAULT_TEXT_MODEL.to_string(),
            voice_id: DEFAULT_VOICE_ID.to_string(),
        }
    }
}

pub fn required_env(name: &'static str) -> Result<String> {
    optional_env(name).ok_or(Error::MissingEnv(name))
}

pub fn optional_env(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}
