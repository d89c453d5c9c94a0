//! Vision model seam: describe an image using a multimodal LLM.
//!
//! The trait exists so the extractor can be exercised in tests with a canned
//! provider; production uses the Gemini `generateContent` REST endpoint.

use anyhow::Result;
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine};
use tracing::info;

use billscan_core::BillscanError;

/// A model that can answer a text prompt about an image.
#[async_trait]
pub trait VisionModel: Send + Sync {
    /// Submit the prompt and image in one call and return the response text.
    async fn describe(&self, image: &[u8], mime_type: &str, prompt: &str) -> Result<String>;
}

const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// Gemini-backed vision provider.
pub struct GeminiVision {
    api_key: String,
    model: String,
    client: reqwest::Client,
}

impl GeminiVision {
    /// Construct with an API key, failing fast when the credential is
    /// missing instead of deferring the failure to the first upload.
    pub fn new(api_key: impl Into<String>) -> Result<Self, BillscanError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(BillscanError::Config(
                "Gemini API key is empty".to_string(),
            ));
        }
        Ok(Self {
            api_key,
            model: DEFAULT_MODEL.to_string(),
            client: reqwest::Client::new(),
        })
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

#[async_trait]
impl VisionModel for GeminiVision {
    async fn describe(&self, image: &[u8], mime_type: &str, prompt: &str) -> Result<String> {
        info!(model = %self.model, bytes = image.len(), "Describing bill image via Gemini");
        let b64 = STANDARD.encode(image);
        let url = format!(
            "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent?key={}",
            self.model, self.api_key
        );
        let body = serde_json::json!({
            "contents": [{ "parts": [
                { "text": prompt },
                { "inlineData": { "mimeType": mime_type, "data": b64 } }
            ]}]
        });
        let resp = self.client.post(&url).json(&body).send().await?;
        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(BillscanError::Provider(format!("Gemini {status}: {body}")).into());
        }
        let json: serde_json::Value = resp.json().await?;
        Ok(json["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .unwrap_or("")
            .to_string())
    }
}
