// File: src/services/elevenlabs.rs
use crate::error::Result;
use crate::services::{check_status, http_client, SpeechSynth};
use reqwest::blocking::Client;
use serde::Serialize;

const TTS_URL: &str = "https://api.elevenlabs.io/v1/text-to-speech";
const TTS_MODEL: &str = "eleven_multilingual_v2";

#[derive(Serialize)]
struct TtsRequest<'a> {
    text: &'a str,
    model_id: &'a str,
}

pub struct ElevenLabs {
    client: Client,
    api_key: String,
}

impl ElevenLabs {
    pub fn new(api_key: String) -> Result<Self> {
        Ok(Self { client: http_client()?, api_key })
    }
}

impl SpeechSynth for ElevenLabs {
    /// Any non-2xx status is a failure for this one item.
    fn synthesize(&self, text: &str, voice: &str) -> Result<Vec<u8>> {
        let resp = self
            .client
            .post(format!("{}/{}", TTS_URL, voice))
            .header("xi-api-key", &self.api_key)
            .header("accept", "audio/mpeg")
            .json(&TtsRequest { text, model_id: TTS_MODEL })
            .send()?;
        Ok(check_status(resp)?.bytes()?.to_vec())
    }
}
