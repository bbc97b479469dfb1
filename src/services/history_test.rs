use super::*;

use crate::state::test_helpers::test_pool;

// =========================================================================
// CSV escaping
// =========================================================================

#[test]
fn plain_field_passes_through() {
    assert_eq!(csv_escape("when to plant rice"), "when to plant rice");
}

#[test]
fn comma_forces_quoting() {
    assert_eq!(csv_escape("rice, wheat"), "\"rice, wheat\"");
}

#[test]
fn embedded_quotes_are_doubled() {
    assert_eq!(csv_escape("so-called \"organic\""), "\"so-called \"\"organic\"\"\"");
}

#[test]
fn newline_forces_quoting() {
    assert_eq!(csv_escape("line one\nline two"), "\"line one\nline two\"");
}

// =========================================================================
// CSV transcript file
// =========================================================================

#[test]
fn transcript_gets_header_once_then_rows() {
    let dir = std::env::temp_dir().join(format!("advisory-csv-{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);

    append_csv_log(&dir, "first question", "first answer").unwrap();
    append_csv_log(&dir, "second, with comma", "second answer").unwrap();

    let content = std::fs::read_to_string(dir.join(CSV_LOG_FILE)).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "timestamp,query,response");
    assert!(lines[1].ends_with(",first question,first answer"));
    assert!(lines[2].ends_with(",\"second, with comma\",second answer"));

    let _ = std::fs::remove_dir_all(&dir);
}

// =========================================================================
// Save / recent round trips
// =========================================================================

#[tokio::test]
async fn queries_round_trip_most_recent_first() {
    let pool = test_pool().await;

    save_query(&pool, "q1", "r1", "general").await.unwrap();
    save_query(&pool, "q2", "r2", "voice").await.unwrap();
    save_query(&pool, "q3", "r3", "general").await.unwrap();

    let rows = recent_queries(&pool, 2).await.unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].question, "q3");
    assert_eq!(rows[1].question, "q2");
    assert_eq!(rows[1].query_type, "voice");
    assert!(!rows[0].timestamp.is_empty());
}

#[tokio::test]
async fn seasonal_round_trip_keeps_missing_season() {
    let pool = test_pool().await;

    save_seasonal_advice(&pool, "Kerala", None, "grow rice").await.unwrap();
    save_seasonal_advice(&pool, "Punjab", Some("winter"), "grow wheat").await.unwrap();

    let rows = recent_seasonal_advice(&pool, 10).await.unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].region, "Punjab");
    assert_eq!(rows[0].season.as_deref(), Some("winter"));
    assert_eq!(rows[1].region, "Kerala");
    assert_eq!(rows[1].season, None);
}

#[tokio::test]
async fn every_advisory_table_accepts_writes() {
    let pool = test_pool().await;

    save_image_analysis(&pool, "uploads/leaf.jpg", "healthy").await.unwrap();
    save_weather_forecast(&pool, "Kochi", "sunny all week").await.unwrap();
    save_market_price(&pool, "rice", "stable at 2000").await.unwrap();
    save_chat_query(&pool, "hello", "welcome").await.unwrap();

    assert_eq!(recent_image_analyses(&pool, 10).await.unwrap().len(), 1);
    assert_eq!(recent_weather_forecasts(&pool, 10).await.unwrap().len(), 1);
    assert_eq!(recent_market_prices(&pool, 10).await.unwrap().len(), 1);
    assert_eq!(recent_chat_queries(&pool, 10).await.unwrap().len(), 1);
}
