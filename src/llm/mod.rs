//! Language-model provider clients.
//!
//! DESIGN
//! ======
//! Two concrete clients behind the provider-neutral [`TextGenerate`] trait:
//! Gemini (primary, also handles vision) and OpenAI (fallback). Each wraps a
//! single REST call with explicit timeouts and typed errors; the advisory
//! dispatcher owns the fallback policy, not the clients.

pub mod gemini;
pub mod openai;
pub mod types;

pub use gemini::GeminiClient;
pub use openai::OpenAiClient;
pub use types::{LlmError, TextGenerate};
