//! Speech adapters: transcription in, synthesis out.
//!
//! DESIGN
//! ======
//! Transcription posts the uploaded audio to a local whisper-server style
//! endpoint and returns the trimmed transcript, or an empty string on any
//! failure — callers treat an empty transcript as "nothing heard".
//! Synthesis shells out to a local espeak-style command writing to a fixed
//! file under the upload directory; `None` means no audio was produced.

use std::path::PathBuf;

use serde_json::Value;
use tracing::warn;

use crate::state::AppState;

/// Fixed output name for synthesized speech, served under `/audio/`.
pub const SYNTHESIS_FILE_NAME: &str = "response.wav";

// =============================================================================
// SPEECH TO TEXT
// =============================================================================

/// Transcribe uploaded audio. Empty string on any failure or when no
/// transcription endpoint is configured.
pub async fn transcribe(state: &AppState, audio: Vec<u8>, file_name: &str) -> String {
    let Some(base_url) = &state.config.whisper_url else {
        warn!("WHISPER_URL not set, transcription disabled");
        return String::new();
    };

    let part = reqwest::multipart::Part::bytes(audio).file_name(file_name.to_string());
    let form = reqwest::multipart::Form::new().part("file", part);

    let response = match state.http.post(base_url).multipart(form).send().await {
        Ok(response) => response,
        Err(e) => {
            warn!(error = %e, "transcription request failed");
            return String::new();
        }
    };

    if response.status().as_u16() != 200 {
        warn!(status = response.status().as_u16(), "transcription endpoint rejected request");
        return String::new();
    }

    match response.json::<Value>().await {
        Ok(body) => body
            .get("text")
            .and_then(Value::as_str)
            .map(|t| t.trim().to_string())
            .unwrap_or_default(),
        Err(e) => {
            warn!(error = %e, "transcription response parse failed");
            String::new()
        }
    }
}

// =============================================================================
// TEXT TO SPEECH
// =============================================================================

/// Synthesize spoken audio for the response text. Returns the output path,
/// or `None` when no synthesis command is configured or the command fails.
pub async fn synthesize(state: &AppState, text: &str) -> Option<PathBuf> {
    let command = state.config.tts_command.as_ref()?;
    let out_path = state.config.upload_dir.join(SYNTHESIS_FILE_NAME);

    // espeak-style invocation: <command> -w <file> <text>
    let status = tokio::process::Command::new(command)
        .arg("-w")
        .arg(&out_path)
        .arg(text)
        .status()
        .await;

    match status {
        Ok(status) if status.success() => Some(out_path),
        Ok(status) => {
            warn!(%status, "speech synthesis command failed");
            None
        }
        Err(e) => {
            warn!(error = %e, "speech synthesis command could not run");
            None
        }
    }
}
