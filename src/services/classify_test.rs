use super::*;

// =========================================================================
// Priority order
// =========================================================================

#[test]
fn weather_beats_price_when_both_match() {
    // "weather" and "price" both present; weather wins by priority order.
    let intent = classify("What is the weather and the price of rice?");
    assert!(matches!(intent, Intent::Weather { .. }));
}

#[test]
fn rainy_is_a_weather_keyword_before_season() {
    // "rainy" contains "rain", so it classifies as weather even though the
    // query reads like a seasonal one.
    let intent = classify("rainy season planting tips");
    assert!(matches!(intent, Intent::Weather { .. }));
}

#[test]
fn price_beats_season() {
    let intent = classify("market rate for planting wheat");
    assert_eq!(intent, Intent::Price { crop: "wheat".to_string() });
}

#[test]
fn unmatched_query_is_general() {
    assert_eq!(classify("hello there"), Intent::General);
}

// =========================================================================
// Location extraction
// =========================================================================

#[test]
fn location_after_in_marker() {
    let intent = classify("What is the weather in Kochi?");
    assert_eq!(intent, Intent::Weather { location: "Kochi".to_string() });
}

#[test]
fn location_trims_trailing_punctuation() {
    let intent = classify("forecast for Thrissur.");
    assert_eq!(intent, Intent::Weather { location: "Thrissur".to_string() });
}

#[test]
fn last_matching_marker_wins() {
    // Every marker is scanned; "near" overrides the earlier "at" match.
    let intent = classify("weather at Delhi near Pune");
    assert_eq!(intent, Intent::Weather { location: "Pune".to_string() });
}

#[test]
fn location_defaults_when_no_marker() {
    let intent = classify("Will it rain tomorrow");
    assert_eq!(intent, Intent::Weather { location: DEFAULT_LOCATION.to_string() });
}

#[test]
fn marker_with_nothing_after_keeps_default() {
    let intent = classify("what is the weather in ");
    assert_eq!(intent, Intent::Weather { location: DEFAULT_LOCATION.to_string() });
}

// =========================================================================
// Crop extraction
// =========================================================================

#[test]
fn first_known_crop_found_as_substring() {
    let intent = classify("Should I sell my tomato harvest now?");
    assert_eq!(intent, Intent::Price { crop: "tomato".to_string() });
}

#[test]
fn crop_defaults_to_rice() {
    let intent = classify("What is the market rate today?");
    assert_eq!(intent, Intent::Price { crop: DEFAULT_CROP.to_string() });
}

#[test]
fn crop_match_is_case_insensitive() {
    let intent = classify("COST OF SUGARCANE");
    assert_eq!(intent, Intent::Price { crop: "sugarcane".to_string() });
}

// =========================================================================
// Season extraction
// =========================================================================

#[test]
fn season_token_extracted() {
    let intent = classify("what to cultivate in monsoon");
    assert_eq!(
        intent,
        Intent::Seasonal { region: DEFAULT_REGION.to_string(), season: Some("monsoon".to_string()) }
    );
}

#[test]
fn season_absent_when_no_token() {
    let intent = classify("which crop should I grow");
    assert_eq!(intent, Intent::Seasonal { region: DEFAULT_REGION.to_string(), season: None });
}

// =========================================================================
// title_case
// =========================================================================

#[test]
fn title_case_capitalizes_first_letter() {
    assert_eq!(title_case("kochi"), "Kochi");
    assert_eq!(title_case("NEW"), "New");
    assert_eq!(title_case(""), "");
}
