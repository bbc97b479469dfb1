//! General-question endpoint: text and/or audio in, advice out.

use axum::Json;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use serde::Serialize;
use tracing::warn;

use crate::services::{advice, history, speech, translate};
use crate::state::AppState;

use super::bad_request;

#[derive(Serialize)]
pub struct AskResponse {
    pub response: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translated_response: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_response_path: Option<String>,
}

/// `POST /api/ask` — multipart form with optional fields:
/// `query` (text), `audio` (file, transcribed and appended to the query),
/// `translate`/`language`, `voice_response`.
pub async fn ask(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AskResponse>, (StatusCode, Json<serde_json::Value>)> {
    let mut query: Option<String> = None;
    let mut audio: Option<(String, Vec<u8>)> = None;
    let mut translate_flag = false;
    let mut language: Option<String> = None;
    let mut voice_response = false;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| bad_request("invalid multipart body"))?
    {
        let Some(name) = field.name().map(str::to_owned) else {
            continue;
        };
        match name.as_str() {
            "query" => query = field.text().await.ok().filter(|t| !t.is_empty()),
            "audio" => {
                let file_name = field.file_name().unwrap_or("audio.wav").to_owned();
                if let Ok(bytes) = field.bytes().await {
                    if !bytes.is_empty() {
                        audio = Some((file_name, bytes.to_vec()));
                    }
                }
            }
            "translate" => translate_flag = field.text().await.is_ok_and(|v| v == "on"),
            "language" => language = field.text().await.ok().filter(|t| !t.is_empty()),
            "voice_response" => voice_response = field.text().await.is_ok_and(|v| v == "on"),
            _ => {}
        }
    }

    // An audio upload contributes its transcript to the question text.
    let mut query_type = "general";
    if let Some((file_name, bytes)) = audio {
        let transcript = speech::transcribe(&state, bytes, &file_name).await;
        if !transcript.is_empty() {
            query = match query {
                Some(text) => Some(format!("{text} {transcript}")),
                None => {
                    query_type = "voice";
                    Some(transcript)
                }
            };
        }
    }

    let Some(query) = query else {
        return Err(bad_request("No query provided"));
    };

    let response = advice::get_advice(&state, &query).await;

    if let Err(e) = history::save_query(&state.pool, &query, &response, query_type).await {
        warn!(error = %e, "query history insert failed");
    }

    let translated_response = if translate_flag {
        let target = language.as_deref().unwrap_or(translate::DEFAULT_TARGET_LANGUAGE);
        Some(translate::translate(&state, &response, target).await)
    } else {
        None
    };

    let audio_response_path = if voice_response {
        speech::synthesize(&state, &response)
            .await
            .map(|path| audio_url(&path))
    } else {
        None
    };

    Ok(Json(AskResponse { response, translated_response, audio_response_path }))
}

/// Map a synthesized file path to its public `/audio/` URL.
pub(crate) fn audio_url(path: &std::path::Path) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    format!("/audio/{name}")
}
