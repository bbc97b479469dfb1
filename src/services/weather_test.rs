use super::*;
use serde_json::json;

// =========================================================================
// Geocode parsing
// =========================================================================

#[test]
fn geocode_empty_array_is_no_match() {
    let result = parse_geocode_response("[]").unwrap();
    assert!(result.is_none());
}

#[test]
fn geocode_parses_string_coordinates() {
    let body = json!([
        { "display_name": "Kochi, Kerala, India", "lat": "9.9312", "lon": "76.2673" }
    ])
    .to_string();
    let (lat, lon) = parse_geocode_response(&body).unwrap().unwrap();
    assert!((lat - 9.9312).abs() < 1e-9);
    assert!((lon - 76.2673).abs() < 1e-9);
}

#[test]
fn geocode_invalid_json_is_parse_error() {
    let err = parse_geocode_response("<html>rate limited</html>").unwrap_err();
    assert!(matches!(err, WeatherError::Parse(_)));
}

#[test]
fn geocode_match_without_coordinates_is_parse_error() {
    let body = json!([{ "display_name": "somewhere" }]).to_string();
    let err = parse_geocode_response(&body).unwrap_err();
    assert!(matches!(err, WeatherError::Parse(_)));
}

// =========================================================================
// Forecast summarization
// =========================================================================

fn entry(dt: i64, temp: f64, humidity: i64, description: &str) -> serde_json::Value {
    json!({
        "dt": dt,
        "main": { "temp": temp, "humidity": humidity },
        "weather": [{ "description": description }]
    })
}

#[test]
fn summary_groups_one_day() {
    // Same timestamp for every entry keeps them on one calendar day no matter
    // what zone the test host runs in.
    let dt = 1_700_000_000;
    let data = json!({
        "list": [
            entry(dt, 20.0, 50, "light rain"),
            entry(dt, 30.0, 61, "clear sky"),
            entry(dt, 25.0, 55, "light rain"),
        ]
    });

    let text = build_forecast_text("Kochi", &data);

    assert!(text.starts_with("Weather forecast for Kochi (next 5 days):\n\n"));
    assert!(text.contains("  Temperature: 20.0°C to 30.0°C\n"));
    // (50 + 61 + 55) / 3 = 55 with integer division.
    assert!(text.contains("  Humidity: 55%\n"));
    // Unique descriptions, first-seen order.
    assert!(text.contains("  Conditions: light rain, clear sky\n"));
}

#[test]
fn summary_is_capped_at_five_days() {
    // Seven noon-ish timestamps one day apart give seven distinct local dates.
    let base = 1_700_050_000;
    let entries: Vec<serde_json::Value> = (0..7)
        .map(|day| entry(base + day * 86_400, 22.0, 60, "clear sky"))
        .collect();
    let data = json!({ "list": entries });

    let text = build_forecast_text("Kochi", &data);

    assert_eq!(text.matches("  Temperature: ").count(), 5);
}

#[test]
fn summary_handles_missing_fields() {
    let data = json!({
        "list": [
            { "dt": 1_700_000_000, "weather": [{ "description": "haze" }] }
        ]
    });

    let text = build_forecast_text("Kochi", &data);

    assert!(text.contains("  Temperature: unavailable\n"));
    assert!(text.contains("  Humidity: 0%\n"));
    assert!(text.contains("  Conditions: haze\n"));
}

#[test]
fn summary_without_entries_is_header_only() {
    let data = json!({ "cod": "200" });

    let text = build_forecast_text("Nowhere", &data);

    assert_eq!(text, "Weather forecast for Nowhere (next 5 days):\n\n");
}
