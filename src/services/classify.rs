//! Intent classification for free-text queries.
//!
//! DESIGN
//! ======
//! Keyword-substring matching, checked in a fixed priority order with the
//! first satisfied branch short-circuiting the rest. A query matching both
//! weather and price keywords classifies as weather — that precedence is
//! load-bearing compatibility, not an accident to fix. The keyword tables and
//! extraction rules are deliberately isolated here as pure functions.

pub const WEATHER_KEYWORDS: [&str; 4] = ["weather", "rain", "forecast", "climate"];
pub const PRICE_KEYWORDS: [&str; 5] = ["price", "market", "sell", "cost", "rate"];
pub const SEASON_KEYWORDS: [&str; 5] = ["season", "crop", "plant", "grow", "cultivate"];

/// The crops the market table knows about, scanned as substrings in order.
pub const KNOWN_CROPS: [&str; 8] = [
    "rice", "wheat", "cotton", "sugarcane", "maize", "potato", "tomato", "onion",
];

const LOCATION_MARKERS: [&str; 4] = ["in", "at", "for", "near"];
const SEASON_TOKENS: [&str; 4] = ["summer", "winter", "monsoon", "rainy"];

pub const DEFAULT_LOCATION: &str = "Kerala";
pub const DEFAULT_REGION: &str = "Kerala";
pub const DEFAULT_CROP: &str = "rice";

/// Classified advisory category with its extracted argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Weather { location: String },
    Price { crop: String },
    Seasonal { region: String, season: Option<String> },
    General,
}

/// Classify a free-text query. Case-insensitive, priority-ordered.
#[must_use]
pub fn classify(query: &str) -> Intent {
    let lower = query.to_lowercase();

    if WEATHER_KEYWORDS.iter().any(|k| lower.contains(k)) {
        return Intent::Weather { location: extract_location(&lower) };
    }

    if PRICE_KEYWORDS.iter().any(|k| lower.contains(k)) {
        let crop = KNOWN_CROPS
            .iter()
            .find(|c| lower.contains(*c))
            .copied()
            .unwrap_or(DEFAULT_CROP);
        return Intent::Price { crop: crop.to_string() };
    }

    if SEASON_KEYWORDS.iter().any(|k| lower.contains(k)) {
        let season = SEASON_TOKENS
            .iter()
            .find(|s| lower.contains(*s))
            .map(|s| (*s).to_string());
        return Intent::Seasonal { region: DEFAULT_REGION.to_string(), season };
    }

    Intent::General
}

/// Scan for " in ", " at ", " for ", " near " followed by one word.
///
/// Every marker is checked and the last match wins. The word is trimmed of
/// trailing punctuation and title-cased; a marker with nothing after it keeps
/// the previous value.
fn extract_location(lower: &str) -> String {
    let mut location = DEFAULT_LOCATION.to_string();
    for marker in LOCATION_MARKERS {
        let pattern = format!(" {marker} ");
        if let Some(idx) = lower.find(&pattern) {
            let rest = &lower[idx + pattern.len()..];
            if let Some(word) = rest.split_whitespace().next() {
                let trimmed = word.trim_matches(['?', '.', ',', '!']);
                if !trimmed.is_empty() {
                    location = title_case(trimmed);
                }
            }
        }
    }
    location
}

/// Uppercase the first character, lowercase the rest.
pub(crate) fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
#[path = "classify_test.rs"]
mod tests;
