//! Structured advisory endpoints: image analysis, weather, market, seasonal.

use axum::Json;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::services::{history, market, seasonal, vision, weather};
use crate::state::AppState;

use super::bad_request;

type ApiError = (StatusCode, Json<serde_json::Value>);

// =============================================================================
// IMAGE ANALYSIS
// =============================================================================

#[derive(Serialize)]
pub struct AnalyzeImageResponse {
    pub result: String,
}

/// `POST /api/analyze-image` — multipart `image` file upload.
pub async fn analyze_image(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AnalyzeImageResponse>, ApiError> {
    let mut upload: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| bad_request("invalid multipart body"))?
    {
        if field.name() != Some("image") {
            continue;
        }
        let Some(file_name) = field.file_name().map(str::to_owned).filter(|n| !n.is_empty()) else {
            return Err(bad_request("No file selected"));
        };
        let bytes = field
            .bytes()
            .await
            .map_err(|_| bad_request("invalid multipart body"))?;
        upload = Some((file_name, bytes.to_vec()));
    }

    let Some((file_name, bytes)) = upload else {
        return Err(bad_request("Please upload an image file"));
    };

    // Keep the upload for the audit trail; the analysis itself works on the
    // in-memory bytes.
    let saved_path = state.config.upload_dir.join(sanitize_file_name(&file_name));
    if let Err(e) = tokio::fs::write(&saved_path, &bytes).await {
        warn!(error = %e, "failed to save uploaded image");
    }

    let result = vision::analyze(&state, &bytes).await;

    if let Err(e) = history::save_image_analysis(&state.pool, &saved_path.to_string_lossy(), &result).await {
        warn!(error = %e, "image analysis history insert failed");
    }

    Ok(Json(AnalyzeImageResponse { result }))
}

/// Strip any path components from a client-supplied file name.
pub(crate) fn sanitize_file_name(name: &str) -> String {
    std::path::Path::new(name)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .filter(|n| !n.is_empty() && n != ".." && n != ".")
        .unwrap_or_else(|| "upload.jpg".to_string())
}

// =============================================================================
// WEATHER
// =============================================================================

#[derive(Deserialize)]
pub struct WeatherBody {
    pub location: Option<String>,
}

#[derive(Serialize)]
pub struct WeatherResponse {
    pub forecast: String,
}

/// `POST /api/weather` — `{location}` to multi-day forecast plus advice.
pub async fn weather_forecast(
    State(state): State<AppState>,
    Json(body): Json<WeatherBody>,
) -> Result<Json<WeatherResponse>, ApiError> {
    let Some(location) = body.location.filter(|l| !l.trim().is_empty()) else {
        return Err(bad_request("No location provided"));
    };

    let forecast = weather::forecast_for(&state, &location).await;

    if let Err(e) = history::save_weather_forecast(&state.pool, &location, &forecast).await {
        warn!(error = %e, "weather history insert failed");
    }

    Ok(Json(WeatherResponse { forecast }))
}

// =============================================================================
// MARKET PRICES
// =============================================================================

#[derive(Deserialize)]
pub struct MarketBody {
    pub crop_name: Option<String>,
}

#[derive(Serialize)]
pub struct MarketResponse {
    pub result: String,
}

/// `POST /api/market` — `{crop_name}` to price summary plus advisory text.
pub async fn market_price(
    State(state): State<AppState>,
    Json(body): Json<MarketBody>,
) -> Result<Json<MarketResponse>, ApiError> {
    let Some(crop_name) = body.crop_name.filter(|c| !c.trim().is_empty()) else {
        return Err(bad_request("No crop name provided"));
    };

    let result = market::price_report(&state, &crop_name).await;

    if let Err(e) = history::save_market_price(&state.pool, &crop_name, &result).await {
        warn!(error = %e, "market history insert failed");
    }

    Ok(Json(MarketResponse { result }))
}

// =============================================================================
// SEASONAL CROPS
// =============================================================================

#[derive(Deserialize)]
pub struct SeasonalBody {
    pub region: Option<String>,
    pub season: Option<String>,
}

#[derive(Serialize)]
pub struct SeasonalResponse {
    pub advice: String,
}

/// `POST /api/seasonal` — `{region, season?}` to crop recommendations.
pub async fn seasonal_crops(
    State(state): State<AppState>,
    Json(body): Json<SeasonalBody>,
) -> Result<Json<SeasonalResponse>, ApiError> {
    let Some(region) = body.region.filter(|r| !r.trim().is_empty()) else {
        return Err(bad_request("No region provided"));
    };
    let season = body.season.filter(|s| !s.trim().is_empty());

    let advice = seasonal::seasonal_advice(&state, &region, season.as_deref()).await;

    if let Err(e) = history::save_seasonal_advice(&state.pool, &region, season.as_deref(), &advice).await {
        warn!(error = %e, "seasonal history insert failed");
    }

    Ok(Json(SeasonalResponse { advice }))
}
