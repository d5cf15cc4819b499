// File: src/services/replicate.rs
use crate::error::{Error, Result};
use crate::services::{check_status, http_client, ImageGen};
use reqwest::blocking::Client;
use serde_json::{json, Value};

const PREDICTIONS_URL: &str =
    "https://api.replicate.com/v1/models/black-forest-labs/flux-schnell/predictions";

pub struct ReplicateImages {
    client: Client,
    token: String,
}

impl ReplicateImages {
    pub fn new(token: String) -> Result<Self> {
        Ok(Self { client: http_client()?, token })
    }
}

impl ImageGen for ReplicateImages {
    fn generate(&self, prompt: &str) -> Result<String> {
        // "Prefer: wait" holds the request open until the prediction finishes.
        let resp = self
            .client
            .post(PREDICTIONS_URL)
            .bearer_auth(&self.token)
            .header("Prefer", "wait")
            .json(&json!({ "input": { "prompt": prompt } }))
            .send()?;
        let body: Value = check_status(resp)?.json()?;
        output_url(&body).ok_or_else(|| Error::Api {
            status: 200,
            body: format!("prediction had no output: {}", body),
        })
    }
}

/// `output` is either a URL or a list of URLs depending on the model.
fn output_url(body: &Value) -> Option<String> {
    match body.get("output")? {
        Value::String(url) => Some(url.clone()),
        Value::Array(urls) => urls.first().and_then(|u| u.as_str()).map(str::to_string),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_both_output_shapes() {
        assert_eq!(output_url(&json!({"output": "https://a/x.png"})).as_deref(), Some("https://a/x.png"));
        assert_eq!(output_url(&json!({"output": ["https://a/y.webp"]})).as_deref(), Some("https://a/y.webp"));
        assert_eq!(output_url(&json!({"status": "failed"})), None);
    }
}
