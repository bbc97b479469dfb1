//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor: one
//! explicit context (API client configuration, model handles) constructed at
//! startup and passed to every adapter invocation, never read from process
//! globals at call time. All adapters are stateless given this context.

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::config::{AppConfig, ProviderTimeouts};
use crate::llm::{GeminiClient, LlmError, TextGenerate};

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum — all inner fields are Arc-wrapped or Clone.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub config: Arc<AppConfig>,
    /// Primary text advisor (Gemini). `None` when the key is absent.
    pub primary_llm: Option<Arc<dyn TextGenerate>>,
    /// Fallback text advisor (OpenAI). `None` when the key is absent.
    pub fallback_llm: Option<Arc<dyn TextGenerate>>,
    /// Vision model for crop-image analysis. `None` when the key is absent.
    pub vision: Option<Arc<GeminiClient>>,
    /// Plain HTTP client for geocoding, forecast, and transcription calls.
    pub http: reqwest::Client,
}

impl AppState {
    #[must_use]
    pub fn new(
        pool: SqlitePool,
        config: Arc<AppConfig>,
        primary_llm: Option<Arc<dyn TextGenerate>>,
        fallback_llm: Option<Arc<dyn TextGenerate>>,
        vision: Option<Arc<GeminiClient>>,
        http: reqwest::Client,
    ) -> Self {
        Self { pool, config, primary_llm, fallback_llm, vision, http }
    }
}

/// Build the shared outbound HTTP client with explicit timeouts.
///
/// # Errors
///
/// Returns an error if the client cannot be constructed.
pub fn http_client(timeouts: ProviderTimeouts) -> Result<reqwest::Client, LlmError> {
    reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(timeouts.request_secs))
        .connect_timeout(std::time::Duration::from_secs(timeouts.connect_secs))
        .build()
        .map_err(|e| LlmError::HttpClientBuild(e.to_string()))
}

// =============================================================================
// TEST HELPERS
// =============================================================================

#[cfg(test)]
pub mod test_helpers {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    /// Create a test `AppState` with a dummy pool (connect_lazy, no live DB)
    /// and no providers configured.
    #[must_use]
    pub fn test_app_state() -> AppState {
        let pool = SqlitePoolOptions::new()
            .connect_lazy("sqlite::memory:")
            .expect("connect_lazy should not fail");
        AppState::new(
            pool,
            Arc::new(AppConfig::default()),
            None,
            None,
            None,
            reqwest::Client::new(),
        )
    }

    /// Create a test `AppState` with mock text providers.
    #[must_use]
    pub fn test_app_state_with_llms(
        primary: Option<Arc<dyn TextGenerate>>,
        fallback: Option<Arc<dyn TextGenerate>>,
    ) -> AppState {
        let mut state = test_app_state();
        state.primary_llm = primary;
        state.fallback_llm = fallback;
        state
    }

    /// Create a test `AppState` backed by a live in-memory database with the
    /// full schema, for tests that verify persistence.
    pub async fn test_app_state_with_db() -> AppState {
        let mut state = test_app_state();
        state.pool = test_pool().await;
        state
    }

    /// Create a live in-memory database with the full schema, for tests that
    /// verify persistence. Single connection: `sqlite::memory:` is
    /// per-connection state.
    pub async fn test_pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("in-memory sqlite should connect");
        sqlx::migrate!("src/db/migrations")
            .run(&pool)
            .await
            .expect("migrations should apply");
        pool
    }
}
