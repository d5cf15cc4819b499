// File: src/services/mod.rs
//! External text, speech and image APIs behind small traits, so batch jobs
//! can run against fakes in tests.

pub mod elevenlabs;
pub mod openai;
pub mod replicate;

use crate::config::{optional_env, required_env, OPENAI_API_KEY, REPLICATE_API_TOKEN};
use crate::error::{Error, Result};
use log::warn;
use reqwest::blocking::{Client, Response};
use std::time::Duration;

const HTTP_TIMEOUT: Duration = Duration::from_secs(120);

/// Chat-completion style text generation.
pub trait TextModel {
    fn complete(&self, system: &str, input: &str) -> Result<String>;
}

/// Text-to-speech. Returns encoded audio (mp3).
pub trait SpeechSynth {
    fn synthesize(&self, text: &str, voice: &str) -> Result<Vec<u8>>;
}

/// Image generation. Returns a URL to download the image from.
pub trait ImageGen {
    fn generate(&self, prompt: &str) -> Result<String>;
}

pub trait Downloader {
    fn download(&self, url: &str) -> Result<Vec<u8>>;
}

/// Asks `model`, falling back to `input` unchanged when the call fails.
pub fn complete_or_original(model: &dyn TextModel, system: &str, input: &str) -> String {
    match model.complete(system, input) {
        Ok(text) if !text.trim().is_empty() => text.trim().to_string(),
        Ok(_) => {
            warn!("Empty completion for '{}', keeping input", input);
            input.to_string()
        }
        Err(e) => {
            warn!("Text model failed for '{}': {}", input, e);
            input.to_string()
        }
    }
}

pub fn http_client() -> Result<Client> {
    Ok(Client::builder().timeout(HTTP_TIMEOUT).build()?)
}

/// Turns a non-2xx response into `Error::Api`.
pub(crate) fn check_status(resp: Response) -> Result<Response> {
    let status = resp.status();
    if status.is_success() {
        Ok(resp)
    } else {
        let body = resp.text().unwrap_or_default();
        Err(Error::Api { status: status.as_u16(), body })
    }
}

pub struct HttpDownloader {
    client: Client,
}

impl HttpDownloader {
    pub fn new() -> Result<Self> {
        Ok(Self { client: http_client()? })
    }
}

impl Downloader for HttpDownloader {
    fn download(&self, url: &str) -> Result<Vec<u8>> {
        let resp = check_status(self.client.get(url).send()?)?;
        Ok(resp.bytes()?.to_vec())
    }
}

/// Replicate when its token is present, OpenAI images otherwise.
pub fn image_generator() -> Result<Box<dyn ImageGen>> {
    if let Some(token) = optional_env(REPLICATE_API_TOKEN) {
        return Ok(Box::new(replicate::ReplicateImages::new(token)?));
    }
    let key = required_env(OPENAI_API_KEY)?;
    Ok(Box::new(openai::OpenAiImages::new(key)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Failing;
    impl TextModel for Failing {
        fn complete(&self, _system: &str, _input: &str) -> Result<String> {
            Err(Error::Api { status: 500, body: "boom".into() })
        }
    }

    struct Echo;
    impl TextModel for Echo {
        fn complete(&self, _system: &str, input: &str) -> Result<String> {
            Ok(format!("  {}!\n", input))
        }
    }

    #[test]
    fn failure_falls_back_to_input() {
        assert_eq!(complete_or_original(&Failing, "sys", "marhaba"), "marhaba");
        assert_eq!(complete_or_original(&Echo, "sys", "marhaba"), "marhaba!");
    }
}
