//! Read-only administrative listing of recent advisory activity.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;
use tracing::error;

use crate::services::history::{
    self, ChatQueryRecord, ImageAnalysisRecord, MarketPriceRecord, QueryRecord, SeasonalAdviceRecord,
    WeatherForecastRecord,
};
use crate::state::AppState;

const QUERY_LIMIT: i64 = 50;
const DETAIL_LIMIT: i64 = 20;

#[derive(Serialize)]
pub struct RecentActivity {
    pub queries: Vec<QueryRecord>,
    pub image_analyses: Vec<ImageAnalysisRecord>,
    pub weather_forecasts: Vec<WeatherForecastRecord>,
    pub market_prices: Vec<MarketPriceRecord>,
    pub seasonal_crops: Vec<SeasonalAdviceRecord>,
    pub chat_queries: Vec<ChatQueryRecord>,
}

/// `GET /api/admin/recent` — most-recent-N rows from every advisory table.
pub async fn recent(State(state): State<AppState>) -> Result<Json<RecentActivity>, StatusCode> {
    let pool = &state.pool;

    let activity = RecentActivity {
        queries: history::recent_queries(pool, QUERY_LIMIT)
            .await
            .map_err(internal)?,
        image_analyses: history::recent_image_analyses(pool, DETAIL_LIMIT)
            .await
            .map_err(internal)?,
        weather_forecasts: history::recent_weather_forecasts(pool, DETAIL_LIMIT)
            .await
            .map_err(internal)?,
        market_prices: history::recent_market_prices(pool, DETAIL_LIMIT)
            .await
            .map_err(internal)?,
        seasonal_crops: history::recent_seasonal_advice(pool, DETAIL_LIMIT)
            .await
            .map_err(internal)?,
        chat_queries: history::recent_chat_queries(pool, DETAIL_LIMIT)
            .await
            .map_err(internal)?,
    };

    Ok(Json(activity))
}

fn internal(e: sqlx::Error) -> StatusCode {
    error!(error = %e, "admin listing query failed");
    StatusCode::INTERNAL_SERVER_ERROR
}
