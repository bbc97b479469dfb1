//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! JSON API surface over the advisory services, plus a static mount for
//! synthesized audio. Rendering/templating is a client concern; every
//! endpoint here speaks structured bodies.

pub mod admin;
pub mod advisory;
pub mod ask;
pub mod chat;
pub mod speech;

use axum::Json;
use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Synthesized speech is written into the upload dir and served read-only.
    let audio_service = ServeDir::new(&state.config.upload_dir);

    Router::new()
        .route("/api/ask", post(ask::ask))
        .route("/api/analyze-image", post(advisory::analyze_image))
        .route("/api/weather", post(advisory::weather_forecast))
        .route("/api/market", post(advisory::market_price))
        .route("/api/seasonal", post(advisory::seasonal_crops))
        .route("/api/chat", post(chat::chat))
        .route("/api/speech-to-text", post(speech::speech_to_text))
        .route("/api/text-to-speech", post(speech::text_to_speech))
        .route("/api/admin/recent", get(admin::recent))
        .route("/healthz", get(healthz))
        .nest_service("/audio", audio_service)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

/// Missing or invalid user input maps to 400 with a structured payload.
/// Provider degradation stays a 200 with explanatory advisory text.
pub(crate) fn bad_request(message: &str) -> (StatusCode, Json<serde_json::Value>) {
    (StatusCode::BAD_REQUEST, Json(serde_json::json!({ "error": message })))
}
