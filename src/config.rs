//! Application configuration parsed from environment variables.
//!
//! DESIGN
//! ======
//! Every external-service credential is optional: adapters degrade to an
//! explanatory message instead of failing the request when a key is absent.
//! The config is built once at startup and shared through `AppState` so no
//! adapter reads process globals at call time.

use std::path::PathBuf;

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_GEMINI_VISION_MODEL: &str = "gemini-pro-vision";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_WEATHER_API_KEY: &str = "demo_key";
pub const DEFAULT_GEOCODE_BASE_URL: &str = "https://nominatim.openstreetmap.org";
pub const DEFAULT_FORECAST_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Request/connect timeouts applied to every outbound HTTP client.
///
/// Without these a stalled upstream would hold the request open indefinitely.
/// Every outbound client sets both and reports a distinct timeout outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProviderTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Key for the primary language/vision provider. Absent => degraded text.
    pub gemini_api_key: Option<String>,
    /// Key for the fallback language provider.
    pub openai_api_key: Option<String>,
    /// OpenWeatherMap key. The demo-key default keeps the forecast endpoint
    /// answering (degraded) in unconfigured environments.
    pub weather_api_key: String,
    pub gemini_model: String,
    pub gemini_vision_model: String,
    pub openai_model: String,
    /// Directory for uploaded images/audio and synthesized speech output.
    pub upload_dir: PathBuf,
    /// Directory holding the flat CSV chat transcript.
    pub data_dir: PathBuf,
    /// Local transcription endpoint (whisper-server style). Absent => empty transcripts.
    pub whisper_url: Option<String>,
    /// Local speech-synthesis command (espeak-style `-w <file> <text>` CLI).
    pub tts_command: Option<String>,
    pub geocode_base_url: String,
    pub forecast_base_url: String,
    pub timeouts: ProviderTimeouts,
}

impl AppConfig {
    /// Build the typed config from environment variables.
    ///
    /// Recognized variables:
    /// - `GEMINI_API_KEY`, `OPENAI_API_KEY`, `WEATHER_API_KEY`
    /// - `GEMINI_MODEL`, `GEMINI_VISION_MODEL`, `OPENAI_MODEL`
    /// - `UPLOAD_DIR` (default `uploads`), `DATA_DIR` (default `data`)
    /// - `WHISPER_URL`, `TTS_COMMAND`
    /// - `GEOCODE_BASE_URL`, `FORECAST_BASE_URL`
    /// - `PROVIDER_REQUEST_TIMEOUT_SECS`, `PROVIDER_CONNECT_TIMEOUT_SECS`
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            gemini_api_key: env_opt("GEMINI_API_KEY"),
            openai_api_key: env_opt("OPENAI_API_KEY"),
            weather_api_key: env_or("WEATHER_API_KEY", DEFAULT_WEATHER_API_KEY),
            gemini_model: env_or("GEMINI_MODEL", DEFAULT_GEMINI_MODEL),
            gemini_vision_model: env_or("GEMINI_VISION_MODEL", DEFAULT_GEMINI_VISION_MODEL),
            openai_model: env_or("OPENAI_MODEL", DEFAULT_OPENAI_MODEL),
            upload_dir: PathBuf::from(env_or("UPLOAD_DIR", "uploads")),
            data_dir: PathBuf::from(env_or("DATA_DIR", "data")),
            whisper_url: env_opt("WHISPER_URL").map(|u| u.trim_end_matches('/').to_string()),
            tts_command: env_opt("TTS_COMMAND"),
            geocode_base_url: env_or("GEOCODE_BASE_URL", DEFAULT_GEOCODE_BASE_URL)
                .trim_end_matches('/')
                .to_string(),
            forecast_base_url: env_or("FORECAST_BASE_URL", DEFAULT_FORECAST_BASE_URL)
                .trim_end_matches('/')
                .to_string(),
            timeouts: ProviderTimeouts {
                request_secs: env_parse_u64("PROVIDER_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS),
                connect_secs: env_parse_u64("PROVIDER_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS),
            },
        }
    }
}

impl Default for AppConfig {
    /// All-defaults config with no credentials. Used by tests; adapters see
    /// the same shape they would in an unconfigured deployment.
    fn default() -> Self {
        Self {
            gemini_api_key: None,
            openai_api_key: None,
            weather_api_key: DEFAULT_WEATHER_API_KEY.to_string(),
            gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
            gemini_vision_model: DEFAULT_GEMINI_VISION_MODEL.to_string(),
            openai_model: DEFAULT_OPENAI_MODEL.to_string(),
            upload_dir: PathBuf::from("uploads"),
            data_dir: PathBuf::from("data"),
            whisper_url: None,
            tts_command: None,
            geocode_base_url: DEFAULT_GEOCODE_BASE_URL.to_string(),
            forecast_base_url: DEFAULT_FORECAST_BASE_URL.to_string(),
            timeouts: ProviderTimeouts {
                request_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
                connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            },
        }
    }
}

fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn env_or(key: &str, default: &str) -> String {
    env_opt(key).unwrap_or_else(|| default.to_string())
}

fn env_parse_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(default)
}
