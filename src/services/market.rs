//! Market price adapter.
//!
//! The price table is a fixed in-memory snapshot (the upstream mandi price
//! feed has no public API); the advisory prose on top of it comes from the
//! primary LLM when configured. Unknown crops return a miss message and never
//! touch a provider.

use tracing::warn;

use crate::state::AppState;

use super::classify::title_case;

/// Price band in rupees per quintal plus a trend label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropPrice {
    pub min: u32,
    pub max: u32,
    pub avg: u32,
    pub trend: &'static str,
}

pub const CROP_PRICES: [(&str, CropPrice); 8] = [
    ("rice", CropPrice { min: 1800, max: 2200, avg: 2000, trend: "stable" }),
    ("wheat", CropPrice { min: 1900, max: 2300, avg: 2100, trend: "rising" }),
    ("cotton", CropPrice { min: 5500, max: 6200, avg: 5800, trend: "falling" }),
    ("sugarcane", CropPrice { min: 280, max: 320, avg: 300, trend: "stable" }),
    ("maize", CropPrice { min: 1700, max: 1900, avg: 1800, trend: "rising" }),
    ("potato", CropPrice { min: 1200, max: 1800, avg: 1500, trend: "volatile" }),
    ("tomato", CropPrice { min: 1500, max: 2500, avg: 2000, trend: "falling" }),
    ("onion", CropPrice { min: 1800, max: 2800, avg: 2300, trend: "rising" }),
];

/// Table lookup after lowercase/trim normalization.
#[must_use]
pub fn lookup(crop_name: &str) -> Option<(&'static str, CropPrice)> {
    let normalized = crop_name.to_lowercase();
    let normalized = normalized.trim();
    CROP_PRICES
        .iter()
        .find(|(name, _)| *name == normalized)
        .map(|(name, price)| (*name, *price))
}

/// Price summary plus optional advisory prose for a crop name.
pub async fn price_report(state: &AppState, crop_name: &str) -> String {
    let normalized = crop_name.to_lowercase();
    let normalized = normalized.trim();

    let Some((name, data)) = lookup(normalized) else {
        return format!("Price data for {normalized} is not available. Please try another crop.");
    };

    let mut response = format!("Current market prices for {}:\n", title_case(name));
    response.push_str(&format!("Minimum: ₹{} per quintal\n", data.min));
    response.push_str(&format!("Maximum: ₹{} per quintal\n", data.max));
    response.push_str(&format!("Average: ₹{} per quintal\n", data.avg));
    response.push_str(&format!("Price Trend: {}\n\n", title_case(data.trend)));

    if let Some(llm) = &state.primary_llm {
        match llm.generate(&advisory_prompt(name, data)).await {
            Ok(advice) if !advice.trim().is_empty() => {
                response.push_str(&format!("MARKET ADVISORY:\n{advice}"));
            }
            Ok(_) => {}
            Err(e) => {
                warn!(crop = name, reason = e.reason(), error = %e, "market advisory prose failed, returning prices only");
            }
        }
    }

    response
}

fn advisory_prompt(crop_name: &str, data: CropPrice) -> String {
    format!(
        "Based on these market prices for {crop_name}:\n\
         - Minimum: ₹{} per quintal\n\
         - Maximum: ₹{} per quintal\n\
         - Average: ₹{} per quintal\n\
         - Price Trend: {}\n\n\
         Provide advice to farmers about:\n\
         1. Whether this is a good time to sell their {crop_name} crop\n\
         2. Market outlook for the coming weeks\n\
         3. Storage recommendations if applicable\n\
         4. Alternative markets or value-addition opportunities\n\n\
         Keep the advice practical and actionable for Indian farmers.",
        data.min, data.max, data.avg, data.trend
    )
}

#[cfg(test)]
#[path = "market_test.rs"]
mod tests;
