//! Speech endpoints: transcription upload and synthesis.

use axum::Json;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use serde::Deserialize;
use serde_json::json;

use crate::services::speech;
use crate::state::AppState;

use super::{ask::audio_url, bad_request};

type ApiError = (StatusCode, Json<serde_json::Value>);

/// `POST /api/speech-to-text` — multipart `audio` file to transcript.
pub async fn speech_to_text(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<serde_json::Value>, ApiError> {
    let mut audio: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| bad_request("invalid multipart body"))?
    {
        if field.name() != Some("audio") {
            continue;
        }
        let file_name = field.file_name().unwrap_or("audio.wav").to_owned();
        if let Ok(bytes) = field.bytes().await {
            if !bytes.is_empty() {
                audio = Some((file_name, bytes.to_vec()));
            }
        }
    }

    let Some((file_name, bytes)) = audio else {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(json!({ "success": false, "error": "No audio file provided" })),
        ));
    };

    let text = speech::transcribe(&state, bytes, &file_name).await;
    Ok(Json(json!({ "success": true, "text": text })))
}

#[derive(Deserialize)]
pub struct TextToSpeechBody {
    pub text: Option<String>,
}

/// `POST /api/text-to-speech` — `{text}` to a served audio path.
pub async fn text_to_speech(
    State(state): State<AppState>,
    Json(body): Json<TextToSpeechBody>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let Some(text) = body.text.filter(|t| !t.is_empty()) else {
        return Err(bad_request("No text provided"));
    };

    match speech::synthesize(&state, &text).await {
        Some(path) => Ok(Json(json!({ "success": true, "audio_path": audio_url(&path) }))),
        None => Ok(Json(json!({ "success": false, "error": "Failed to generate speech" }))),
    }
}
