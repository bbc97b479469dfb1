//! Provider-neutral text-generation trait and errors.

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by language-model provider calls.
///
/// The advisory dispatcher swallows these on purpose (the fallback chain is
/// the recovery policy), but each variant stays distinguishable so logs can
/// tell "timed out" from "upstream rejected" from "garbage response".
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    /// The provider did not answer within the configured request timeout.
    #[error("provider timed out")]
    Timeout,

    /// The HTTP request to the provider failed.
    #[error("API request failed: {0}")]
    ApiRequest(String),

    /// The provider returned a non-success HTTP status.
    #[error("API response error: status {status}")]
    ApiResponse { status: u16, body: String },

    /// The provider response body could not be interpreted.
    #[error("API response parse failed: {0}")]
    ApiParse(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

impl LlmError {
    /// Map a transport error, keeping timeouts distinguishable.
    pub fn from_transport(err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::ApiRequest(err.to_string())
        }
    }

    /// Short tag for structured log fields.
    #[must_use]
    pub fn reason(&self) -> &'static str {
        match self {
            Self::Timeout => "timeout",
            Self::ApiRequest(_) => "request",
            Self::ApiResponse { .. } => "response",
            Self::ApiParse(_) => "parse",
            Self::HttpClientBuild(_) => "client_build",
        }
    }
}

// =============================================================================
// TEXT GENERATION TRAIT
// =============================================================================

/// Provider-neutral async trait for single-prompt text generation.
/// Enables mocking in tests and keeps the fallback chain provider-agnostic.
#[async_trait::async_trait]
pub trait TextGenerate: Send + Sync {
    /// Send one prompt and return the generated text. An empty string is a
    /// valid "no answer" outcome, not an error.
    ///
    /// # Errors
    ///
    /// Returns an [`LlmError`] if the request fails, times out, or the
    /// response is malformed.
    async fn generate(&self, prompt: &str) -> Result<String, LlmError>;

    /// Short provider name for log fields.
    fn name(&self) -> &'static str;
}
