//! Advisory history persistence.
//!
//! DESIGN
//! ======
//! One append-only table per advisory kind, written on every call and read
//! only by the admin listing (most-recent-N). Records are self-contained
//! text; timestamps come from the store's own CURRENT_TIMESTAMP default.
//! The chat endpoint additionally appends to a flat CSV transcript file.

use std::io::Write as _;
use std::path::Path;

use serde::Serialize;
use sqlx::SqlitePool;

pub const CSV_LOG_FILE: &str = "queries.csv";

// =============================================================================
// SAVE HELPERS
// =============================================================================

/// Append a general/voice question and its response.
///
/// # Errors
///
/// Returns the underlying database error.
pub async fn save_query(
    pool: &SqlitePool,
    question: &str,
    response: &str,
    query_type: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query("INSERT INTO queries (question, response, query_type) VALUES (?, ?, ?)")
        .bind(question)
        .bind(response)
        .bind(query_type)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn save_image_analysis(
    pool: &SqlitePool,
    image_path: &str,
    analysis_result: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query("INSERT INTO image_analysis (image_path, analysis_result) VALUES (?, ?)")
        .bind(image_path)
        .bind(analysis_result)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn save_weather_forecast(
    pool: &SqlitePool,
    location: &str,
    forecast_data: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query("INSERT INTO weather_forecasts (location, forecast_data) VALUES (?, ?)")
        .bind(location)
        .bind(forecast_data)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn save_market_price(
    pool: &SqlitePool,
    crop_name: &str,
    price_data: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query("INSERT INTO market_prices (crop_name, price_data) VALUES (?, ?)")
        .bind(crop_name)
        .bind(price_data)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn save_seasonal_advice(
    pool: &SqlitePool,
    region: &str,
    season: Option<&str>,
    advice: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query("INSERT INTO seasonal_crops (region, season, advice) VALUES (?, ?, ?)")
        .bind(region)
        .bind(season)
        .bind(advice)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn save_chat_query(
    pool: &SqlitePool,
    query: &str,
    response: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query("INSERT INTO chat_queries (query, response) VALUES (?, ?)")
        .bind(query)
        .bind(response)
        .execute(pool)
        .await?;
    Ok(())
}

// =============================================================================
// RECENT LISTINGS
// =============================================================================

#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct QueryRecord {
    pub id: i64,
    pub question: String,
    pub response: String,
    pub query_type: String,
    pub timestamp: String,
}

#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct ImageAnalysisRecord {
    pub id: i64,
    pub image_path: String,
    pub analysis_result: String,
    pub timestamp: String,
}

#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct WeatherForecastRecord {
    pub id: i64,
    pub location: String,
    pub forecast_data: String,
    pub timestamp: String,
}

#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct MarketPriceRecord {
    pub id: i64,
    pub crop_name: String,
    pub price_data: String,
    pub timestamp: String,
}

#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct SeasonalAdviceRecord {
    pub id: i64,
    pub region: String,
    pub season: Option<String>,
    pub advice: String,
    pub timestamp: String,
}

#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct ChatQueryRecord {
    pub id: i64,
    pub query: String,
    pub response: String,
    pub timestamp: String,
}

pub async fn recent_queries(pool: &SqlitePool, limit: i64) -> Result<Vec<QueryRecord>, sqlx::Error> {
    sqlx::query_as("SELECT id, question, response, query_type, timestamp FROM queries ORDER BY id DESC LIMIT ?")
        .bind(limit)
        .fetch_all(pool)
        .await
}

pub async fn recent_image_analyses(
    pool: &SqlitePool,
    limit: i64,
) -> Result<Vec<ImageAnalysisRecord>, sqlx::Error> {
    sqlx::query_as("SELECT id, image_path, analysis_result, timestamp FROM image_analysis ORDER BY id DESC LIMIT ?")
        .bind(limit)
        .fetch_all(pool)
        .await
}

pub async fn recent_weather_forecasts(
    pool: &SqlitePool,
    limit: i64,
) -> Result<Vec<WeatherForecastRecord>, sqlx::Error> {
    sqlx::query_as("SELECT id, location, forecast_data, timestamp FROM weather_forecasts ORDER BY id DESC LIMIT ?")
        .bind(limit)
        .fetch_all(pool)
        .await
}

pub async fn recent_market_prices(
    pool: &SqlitePool,
    limit: i64,
) -> Result<Vec<MarketPriceRecord>, sqlx::Error> {
    sqlx::query_as("SELECT id, crop_name, price_data, timestamp FROM market_prices ORDER BY id DESC LIMIT ?")
        .bind(limit)
        .fetch_all(pool)
        .await
}

pub async fn recent_seasonal_advice(
    pool: &SqlitePool,
    limit: i64,
) -> Result<Vec<SeasonalAdviceRecord>, sqlx::Error> {
    sqlx::query_as("SELECT id, region, season, advice, timestamp FROM seasonal_crops ORDER BY id DESC LIMIT ?")
        .bind(limit)
        .fetch_all(pool)
        .await
}

pub async fn recent_chat_queries(
    pool: &SqlitePool,
    limit: i64,
) -> Result<Vec<ChatQueryRecord>, sqlx::Error> {
    sqlx::query_as("SELECT id, query, response, timestamp FROM chat_queries ORDER BY id DESC LIMIT ?")
        .bind(limit)
        .fetch_all(pool)
        .await
}

// =============================================================================
// CSV TRANSCRIPT
// =============================================================================

/// Append one (timestamp, query, response) row to the flat CSV transcript,
/// writing the header when the file is created.
///
/// # Errors
///
/// Returns the underlying IO error.
pub fn append_csv_log(data_dir: &Path, query: &str, response: &str) -> std::io::Result<()> {
    std::fs::create_dir_all(data_dir)?;
    let csv_path = data_dir.join(CSV_LOG_FILE);
    let write_header = !csv_path.exists();

    let mut file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&csv_path)?;

    if write_header {
        writeln!(file, "timestamp,query,response")?;
    }

    let timestamp = chrono::Local::now().naive_local().format("%Y-%m-%dT%H:%M:%S%.6f");
    writeln!(
        file,
        "{timestamp},{},{}",
        csv_escape(query),
        csv_escape(response)
    )?;
    Ok(())
}

/// Quote a field when it contains a comma, quote, or newline.
pub(crate) fn csv_escape(field: &str) -> String {
    if field.contains(['"', ',', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
#[path = "history_test.rs"]
mod tests;
