//! Gemini `generateContent` client.
//!
//! Thin HTTP wrapper over the Generative Language REST API. Serves both as
//! the primary text advisor and as the vision model for crop-image analysis.
//! Pure parsing in `parse_generate_response` for testability.

use std::time::Duration;

use base64::Engine as _;
use serde_json::{Value, json};

use crate::config::ProviderTimeouts;

use super::types::{LlmError, TextGenerate};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

// =============================================================================
// CLIENT
// =============================================================================

pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
    vision_model: String,
    base_url: String,
}

impl GeminiClient {
    /// Build the client with explicit timeouts.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(
        api_key: String,
        model: String,
        vision_model: String,
        timeouts: ProviderTimeouts,
    ) -> Result<Self, LlmError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeouts.request_secs))
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .build()
            .map_err(|e| LlmError::HttpClientBuild(e.to_string()))?;
        Ok(Self {
            http,
            api_key,
            model,
            vision_model,
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Analyze a JPEG image with the vision model using an inline-data part.
    ///
    /// # Errors
    ///
    /// Returns an [`LlmError`] if the request fails or the response is malformed.
    pub async fn analyze_image(&self, prompt: &str, jpeg_bytes: &[u8]) -> Result<String, LlmError> {
        let encoded = base64::engine::general_purpose::STANDARD.encode(jpeg_bytes);
        let parts = vec![
            json!({ "text": prompt }),
            json!({ "inline_data": { "mime_type": "image/jpeg", "data": encoded } }),
        ];
        self.generate_content(&self.vision_model, parts).await
    }

    async fn generate_content(&self, model: &str, parts: Vec<Value>) -> Result<String, LlmError> {
        let url = format!("{}/models/{}:generateContent?key={}", self.base_url, model, self.api_key);
        let body = json!({
            "contents": [{ "parts": parts }],
            "safetySettings": safety_settings(),
        });

        let response = self
            .http
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::from_transport(&e))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| LlmError::from_transport(&e))?;
        if status != 200 {
            return Err(LlmError::ApiResponse { status, body: text });
        }

        parse_generate_response(&text)
    }
}

#[async_trait::async_trait]
impl TextGenerate for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        let parts = vec![json!({ "text": prompt })];
        self.generate_content(&self.model, parts).await
    }

    fn name(&self) -> &'static str {
        "gemini"
    }
}

/// Safety categories relaxed to BLOCK_NONE so agricultural pesticide and
/// chemical advice is not filtered out.
fn safety_settings() -> Value {
    json!([
        { "category": "HARM_CATEGORY_HARASSMENT", "threshold": "BLOCK_NONE" },
        { "category": "HARM_CATEGORY_HATE_SPEECH", "threshold": "BLOCK_NONE" },
        { "category": "HARM_CATEGORY_SEXUALLY_EXPLICIT", "threshold": "BLOCK_NONE" },
        { "category": "HARM_CATEGORY_DANGEROUS_CONTENT", "threshold": "BLOCK_NONE" },
    ])
}

// =============================================================================
// PARSING
// =============================================================================

/// Extract the concatenated text parts of the first candidate.
///
/// A candidate with no text parts yields an empty string, which the fallback
/// chain treats as "no answer".
pub(crate) fn parse_generate_response(json_text: &str) -> Result<String, LlmError> {
    let root: Value = serde_json::from_str(json_text).map_err(|e| LlmError::ApiParse(e.to_string()))?;

    let Some(candidate) = root
        .get("candidates")
        .and_then(Value::as_array)
        .and_then(|arr| arr.first())
    else {
        return Err(LlmError::ApiParse("gemini: missing candidates[0]".to_string()));
    };

    let mut out = String::new();
    if let Some(parts) = candidate
        .get("content")
        .and_then(|c| c.get("parts"))
        .and_then(Value::as_array)
    {
        for part in parts {
            if let Some(text) = part.get("text").and_then(Value::as_str) {
                out.push_str(text);
            }
        }
    }

    Ok(out)
}

#[cfg(test)]
#[path = "gemini_test.rs"]
mod tests;
