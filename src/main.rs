mod config;
mod db;
mod llm;
mod routes;
mod services;
mod state;

use std::sync::Arc;

use llm::{GeminiClient, OpenAiClient, TextGenerate};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = Arc::new(config::AppConfig::from_env());

    let database_url = std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://queries.db".into());
    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| "5000".into())
        .parse()
        .expect("invalid PORT");

    std::fs::create_dir_all(&config.upload_dir).expect("failed to create upload dir");
    std::fs::create_dir_all(&config.data_dir).expect("failed to create data dir");

    let pool = db::init_pool(&database_url)
        .await
        .expect("database init failed");

    // Provider clients are all optional: a missing key degrades the matching
    // advisory features instead of refusing to start.
    let gemini = match &config.gemini_api_key {
        Some(key) => match GeminiClient::new(
            key.clone(),
            config.gemini_model.clone(),
            config.gemini_vision_model.clone(),
            config.timeouts,
        ) {
            Ok(client) => {
                tracing::info!(model = %config.gemini_model, "primary advisor initialized");
                Some(Arc::new(client))
            }
            Err(e) => {
                tracing::warn!(error = %e, "primary advisor unavailable");
                None
            }
        },
        None => {
            tracing::warn!("GEMINI_API_KEY not set — language and vision advice degraded");
            None
        }
    };

    let openai: Option<Arc<dyn TextGenerate>> = match &config.openai_api_key {
        Some(key) => match OpenAiClient::new(key.clone(), config.openai_model.clone(), config.timeouts) {
            Ok(client) => {
                tracing::info!(model = %config.openai_model, "fallback advisor initialized");
                Some(Arc::new(client))
            }
            Err(e) => {
                tracing::warn!(error = %e, "fallback advisor unavailable");
                None
            }
        },
        None => None,
    };

    let http = state::http_client(config.timeouts).expect("failed to build HTTP client");

    let primary: Option<Arc<dyn TextGenerate>> = gemini.clone().map(|c| c as Arc<dyn TextGenerate>);
    let state = state::AppState::new(pool, config, primary, openai, gemini, http);

    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "krishimitra listening");
    axum::serve(listener, app).await.expect("server failed");
}
