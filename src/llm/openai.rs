//! OpenAI chat-completions client — the fallback text advisor.
//!
//! Single-purpose wrapper: one user prompt, a fixed advisory system message,
//! a short answer. Pure parsing in `parse_chat_response` for testability.

use std::time::Duration;

use serde_json::{Value, json};

use crate::config::ProviderTimeouts;

use super::types::{LlmError, TextGenerate};

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const SYSTEM_PROMPT: &str =
    "You are an agricultural advisor for Indian farmers. Give concise, clear advice in simple language.";
const MAX_TOKENS: u32 = 200;

// =============================================================================
// CLIENT
// =============================================================================

pub struct OpenAiClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
}

impl OpenAiClient {
    /// Build the client with explicit timeouts.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(api_key: String, model: String, timeouts: ProviderTimeouts) -> Result<Self, LlmError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeouts.request_secs))
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .build()
            .map_err(|e| LlmError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, api_key, model })
    }
}

#[async_trait::async_trait]
impl TextGenerate for OpenAiClient {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        let url = format!("{DEFAULT_BASE_URL}/chat/completions");
        let body = json!({
            "model": self.model,
            "max_tokens": MAX_TOKENS,
            "messages": [
                { "role": "system", "content": SYSTEM_PROMPT },
                { "role": "user", "content": prompt },
            ],
        });

        let response = self
            .http
            .post(url)
            .bearer_auth(&self.api_key)
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

        parse_chat_response(&text)
    }

    fn name(&self) -> &'static str {
        "openai"
    }
}

// =============================================================================
// PARSING
// =============================================================================

/// Extract the trimmed content of the first choice.
pub(crate) fn parse_chat_response(json_text: &str) -> Result<String, LlmError> {
    let root: Value = serde_json::from_str(json_text).map_err(|e| LlmError::ApiParse(e.to_string()))?;

    let Some(choice) = root
        .get("choices")
        .and_then(Value::as_array)
        .and_then(|arr| arr.first())
    else {
        return Err(LlmError::ApiParse("chat_completions: missing choices[0]".to_string()));
    };

    let content = choice
        .get("message")
        .and_then(|m| m.get("content"))
        .and_then(Value::as_str)
        .unwrap_or("");

    Ok(content.trim().to_string())
}

#[cfg(test)]
#[path = "openai_test.rs"]
mod tests;
