//! Weather forecast adapter.
//!
//! DESIGN
//! ======
//! Two chained boundary calls: Nominatim geocoding resolves the location name
//! to coordinates, then OpenWeatherMap returns a 5-day/3-hour forecast. The
//! raw entries are grouped by calendar day and summarized (min/max
//! temperature, floor-averaged humidity, unique condition descriptions in
//! first-seen order). When the primary advisor is configured its prose advice
//! is appended under FARMING RECOMMENDATIONS; when that call fails the
//! structured summary still goes out alone.

use chrono::{Local, TimeZone};
use serde_json::Value;
use tracing::{info, warn};

use crate::state::AppState;

pub const LOCATION_NOT_FOUND: &str = "Location not found. Please try a different location name.";
pub const FORECAST_UNAVAILABLE: &str = "Weather data unavailable. Please try again later.";

/// Nominatim requires an identifying User-Agent for API access.
const GEOCODER_USER_AGENT: &str = "krishimitra-advisory/0.1";

const MAX_FORECAST_DAYS: usize = 5;

#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("geocoding request failed: {0}")]
    Geocode(String),

    #[error("forecast request failed: {0}")]
    Forecast(String),

    #[error("provider timed out")]
    Timeout,

    #[error("response parse failed: {0}")]
    Parse(String),
}

impl WeatherError {
    fn geocode_transport(err: &reqwest::Error) -> Self {
        if err.is_timeout() { Self::Timeout } else { Self::Geocode(err.to_string()) }
    }

    fn forecast_transport(err: &reqwest::Error) -> Self {
        if err.is_timeout() { Self::Timeout } else { Self::Forecast(err.to_string()) }
    }
}

// =============================================================================
// ENTRY POINT
// =============================================================================

/// Multi-day forecast plus farming advice for a location name.
///
/// Always returns text: degraded outcomes (unknown location, upstream
/// unavailable, transport failure) come back as explanatory strings.
pub async fn forecast_for(state: &AppState, location: &str) -> String {
    match fetch_forecast(state, location).await {
        Ok(text) => text,
        Err(e) => {
            warn!(%location, error = %e, "weather forecast failed");
            format!("Error getting weather forecast: {e}")
        }
    }
}

async fn fetch_forecast(state: &AppState, location: &str) -> Result<String, WeatherError> {
    let Some((lat, lon)) = geocode(state, location).await? else {
        info!(%location, "geocoder found no match");
        return Ok(LOCATION_NOT_FOUND.to_string());
    };

    let url = format!("{}/forecast", state.config.forecast_base_url);
    let response = state
        .http
        .get(url)
        .query(&[
            ("lat", lat.to_string()),
            ("lon", lon.to_string()),
            ("appid", state.config.weather_api_key.clone()),
            ("units", "metric".to_string()),
        ])
        .send()
        .await
        .map_err(|e| WeatherError::forecast_transport(&e))?;

    if response.status().as_u16() != 200 {
        warn!(%location, status = response.status().as_u16(), "forecast upstream rejected request");
        return Ok(FORECAST_UNAVAILABLE.to_string());
    }

    let data: Value = response
        .json()
        .await
        .map_err(|e| WeatherError::Parse(e.to_string()))?;

    let forecast_text = build_forecast_text(location, &data);

    // Structured summary stands on its own; advisor prose is best-effort.
    if let Some(llm) = &state.primary_llm {
        match llm.generate(&advice_prompt(&forecast_text)).await {
            Ok(advice) if !advice.trim().is_empty() => {
                return Ok(format!("{forecast_text}\n\nFARMING RECOMMENDATIONS:\n{advice}"));
            }
            Ok(_) => {}
            Err(e) => {
                warn!(reason = e.reason(), error = %e, "forecast advisory prose failed, returning summary only");
            }
        }
    }

    Ok(forecast_text)
}

// =============================================================================
// GEOCODING
// =============================================================================

async fn geocode(state: &AppState, location: &str) -> Result<Option<(f64, f64)>, WeatherError> {
    let url = format!("{}/search", state.config.geocode_base_url);
    let response = state
        .http
        .get(url)
        .query(&[("q", location), ("format", "json"), ("limit", "1")])
        .header(reqwest::header::USER_AGENT, GEOCODER_USER_AGENT)
        .send()
        .await
        .map_err(|e| WeatherError::geocode_transport(&e))?;

    let status = response.status().as_u16();
    let body = response
        .text()
        .await
        .map_err(|e| WeatherError::geocode_transport(&e))?;
    if status != 200 {
        return Err(WeatherError::Geocode(format!("status {status}")));
    }

    parse_geocode_response(&body)
}

/// Nominatim returns a JSON array of matches with lat/lon as strings.
pub(crate) fn parse_geocode_response(json_text: &str) -> Result<Option<(f64, f64)>, WeatherError> {
    let root: Value = serde_json::from_str(json_text).map_err(|e| WeatherError::Parse(e.to_string()))?;

    let Some(first) = root.as_array().and_then(|arr| arr.first()) else {
        return Ok(None);
    };

    let lat = first
        .get("lat")
        .and_then(Value::as_str)
        .and_then(|s| s.parse::<f64>().ok());
    let lon = first
        .get("lon")
        .and_then(Value::as_str)
        .and_then(|s| s.parse::<f64>().ok());

    match (lat, lon) {
        (Some(lat), Some(lon)) => Ok(Some((lat, lon))),
        _ => Err(WeatherError::Parse("geocoder match missing lat/lon".to_string())),
    }
}

// =============================================================================
// SUMMARIZATION
// =============================================================================

/// Group 3-hourly forecast entries by calendar day and format the summary.
pub(crate) fn build_forecast_text(location: &str, data: &Value) -> String {
    let mut text = format!("Weather forecast for {location} (next 5 days):\n\n");

    let entries = data
        .get("list")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[]);

    // Group by date, preserving first-seen day order.
    let mut days: Vec<(String, String, Vec<&Value>)> = Vec::new();
    for item in entries {
        let Some(dt) = item.get("dt").and_then(Value::as_i64) else {
            continue;
        };
        let Some(when) = Local.timestamp_opt(dt, 0).single() else {
            continue;
        };
        let date = when.format("%Y-%m-%d").to_string();
        match days.iter_mut().find(|(d, _, _)| *d == date) {
            Some((_, _, items)) => items.push(item),
            None => days.push((date, when.format("%A").to_string(), vec![item])),
        }
    }

    for (date, day_name, items) in days.iter().take(MAX_FORECAST_DAYS) {
        let temps: Vec<f64> = items
            .iter()
            .filter_map(|i| i.get("main").and_then(|m| m.get("temp")).and_then(Value::as_f64))
            .collect();
        let humidity: Vec<i64> = items
            .iter()
            .filter_map(|i| i.get("main").and_then(|m| m.get("humidity")).and_then(Value::as_i64))
            .collect();

        let mut descriptions: Vec<&str> = Vec::new();
        for item in items {
            let desc = item
                .get("weather")
                .and_then(Value::as_array)
                .and_then(|w| w.first())
                .and_then(|w| w.get("description"))
                .and_then(Value::as_str);
            if let Some(d) = desc {
                if !descriptions.contains(&d) {
                    descriptions.push(d);
                }
            }
        }

        let min_temp = temps.iter().copied().fold(f64::INFINITY, f64::min);
        let max_temp = temps.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let avg_humidity = if humidity.is_empty() {
            0
        } else {
            humidity.iter().sum::<i64>() / humidity.len() as i64
        };

        text.push_str(&format!("{day_name} ({date}):\n"));
        if temps.is_empty() {
            text.push_str("  Temperature: unavailable\n");
        } else {
            text.push_str(&format!("  Temperature: {min_temp:.1}°C to {max_temp:.1}°C\n"));
        }
        text.push_str(&format!("  Humidity: {avg_humidity}%\n"));
        text.push_str(&format!("  Conditions: {}\n\n", descriptions.join(", ")));
    }

    text
}

fn advice_prompt(forecast_text: &str) -> String {
    format!(
        "Based on this weather forecast, provide farming advice:\n\n\
         {forecast_text}\n\n\
         What agricultural activities should farmers consider? What precautions should they take?\n\
         Focus on practical advice related to irrigation, pest control, harvesting, and crop protection."
    )
}

#[cfg(test)]
#[path = "weather_test.rs"]
mod tests;
