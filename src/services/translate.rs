//! Translation adapter — instruction-prompted through the primary advisor.

use tracing::warn;

use crate::state::AppState;

pub const NOT_CONFIGURED: &str =
    "Translation requires a language model API key. Please configure your API key.";

pub const DEFAULT_TARGET_LANGUAGE: &str = "Malayalam";

/// Translate advisory text into the target language. Degrades to an
/// explanatory string when unconfigured or when the provider fails.
pub async fn translate(state: &AppState, text: &str, target_language: &str) -> String {
    let Some(llm) = &state.primary_llm else {
        return NOT_CONFIGURED.to_string();
    };

    let prompt = format!(
        "Translate the following text to {target_language}:\n\n\
         {text}\n\n\
         Provide only the translated text without any additional explanations."
    );

    match llm.generate(&prompt).await {
        Ok(translated) => translated,
        Err(e) => {
            warn!(%target_language, reason = e.reason(), error = %e, "translation failed");
            format!("Error translating text: {e}")
        }
    }
}
