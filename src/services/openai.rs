// File: src/services/openai.rs
use crate::error::{Error, Result};
use crate::services::{check_status, http_client, ImageGen, TextModel};
use log::debug;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

const CHAT_URL: &str = "https://api.openai.com/v1/chat/completions";
const IMAGES_URL: &str = "https://api.openai.com/v1/images/generations";
const IMAGE_MODEL: &str = "dall-e-3";
const IMAGE_SIZE: &str = "1024x1024";

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Deserialize)]
struct ChatReply {
    #[serde(default)]
    content: Option<String>,
}

pub struct OpenAiText {
    client: Client,
    api_key: String,
    model: String,
}

impl OpenAiText {
    pub fn new(api_key: String, model: &str) -> Result<Self> {
        Ok(Self {
            client: http_client()?,
            api_key,
            model: model.to_string(),
        })
    }
}

impl TextModel for OpenAiText {
    fn complete(&self, system: &str, input: &str) -> Result<String> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage { role: "system", content: system },
                ChatMessage { role: "user", content: input },
            ],
            temperature: 0.3,
        };
        debug!("chat completion ({} chars in)", input.len());
        let resp = self
            .client
            .post(CHAT_URL)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()?;
        let parsed: ChatResponse = check_status(resp)?.json()?;
        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| Error::Api { status: 200, body: "completion had no content".into() })
    }
}

#[derive(Serialize)]
struct ImageRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    n: u32,
    size: &'a str,
}

#[derive(Deserialize)]
struct ImageResponse {
    data: Vec<ImageDatum>,
}

#[derive(Deserialize)]
struct ImageDatum {
    #[serde(default)]
    url: Option<String>,
}

pub struct OpenAiImages {
    client: Client,
    api_key: String,
}

impl OpenAiImages {
    pub fn new(api_key: String) -> Result<Self> {
        Ok(Self { client: http_client()?, api_key })
    }
}

impl ImageGen for OpenAiImages {
    fn generate(&self, prompt: &str) -> Result<String> {
        let request = ImageRequest { model: IMAGE_MODEL, prompt, n: 1, size: IMAGE_SIZE };
        let resp = self
            .client
            .post(IMAGES_URL)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()?;
        let parsed: ImageResponse = check_status(resp)?.json()?;
        parsed
            .data
            .into_iter()
            .find_map(|d| d.url)
            .ok_or_else(|| Error::Api { status: 200, body: "image response had no url".into() })
    }
}
