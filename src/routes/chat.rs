//! Conversational endpoint.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;
use tracing::warn;

use crate::services::chat::ChatReply;
use crate::services::{chat, history};
use crate::state::AppState;

use super::bad_request;

#[derive(Deserialize)]
pub struct ChatBody {
    pub message: Option<String>,
}

/// `POST /api/chat` — `{message}` to `{response, timestamp}`, also appending
/// to the flat CSV transcript.
pub async fn chat(
    State(state): State<AppState>,
    Json(body): Json<ChatBody>,
) -> Result<Json<ChatReply>, (StatusCode, Json<serde_json::Value>)> {
    let Some(message) = body.message.filter(|m| !m.is_empty()) else {
        return Err(bad_request("No message provided"));
    };

    let reply = chat::respond(&state, &message).await;

    if let Err(e) = history::append_csv_log(&state.config.data_dir, &message, &reply.response) {
        warn!(error = %e, "chat CSV append failed");
    }

    Ok(Json(reply))
}
