//! Seasonal crop recommendations.
//!
//! When no season is given it is derived from the current calendar month.
//! The primary advisor produces the detailed recommendation; without it (or
//! when it fails) a fixed season→crop table answers instead.

use chrono::{Datelike, Local};
use tracing::warn;

use crate::state::AppState;

use super::classify::title_case;

/// Months 3–6 are summer, 7–10 monsoon, the rest winter.
#[must_use]
pub(crate) fn season_for_month(month: u32) -> &'static str {
    match month {
        3..=6 => "summer",
        7..=10 => "monsoon",
        _ => "winter",
    }
}

/// Static fallback table. Unknown season labels (e.g. "rainy") get the
/// generic list, matching the keyword set the classifier may hand over.
#[must_use]
pub fn fallback_crops(season: &str) -> &'static [&'static str] {
    match season.to_lowercase().as_str() {
        "summer" => &["cotton", "sugarcane", "rice", "vegetables", "fruits"],
        "monsoon" => &["rice", "maize", "pulses", "oilseeds", "vegetables"],
        "winter" => &["wheat", "barley", "mustard", "potato", "peas"],
        _ => &["rice", "wheat", "vegetables"],
    }
}

/// Seasonal crop recommendations for a region, deriving the season from the
/// current month when none is given.
pub async fn seasonal_advice(state: &AppState, region: &str, season: Option<&str>) -> String {
    let season = season
        .map(str::to_owned)
        .unwrap_or_else(|| season_for_month(Local::now().month()).to_string());

    if let Some(llm) = &state.primary_llm {
        match llm.generate(&recommendation_prompt(region, &season)).await {
            Ok(advice) if !advice.trim().is_empty() => return advice,
            Ok(_) => {}
            Err(e) => {
                warn!(%region, %season, reason = e.reason(), error = %e, "seasonal advisory failed, using static table");
            }
        }
    }

    let mut response = format!("Recommended crops for {season} season in {region}:\n");
    for crop in fallback_crops(&season) {
        response.push_str(&format!("- {}\n", title_case(crop)));
    }
    response
}

fn recommendation_prompt(region: &str, season: &str) -> String {
    format!(
        "Provide detailed seasonal crop recommendations for farmers in {region} during {season} season.\n\n\
         Include:\n\
         1. Top 5 recommended crops to plant now in {region} during {season}\n\
         2. Optimal planting times and methods\n\
         3. Expected water requirements\n\
         4. Common challenges during this season and how to address them\n\
         5. Intercropping opportunities if applicable\n\n\
         Format your response in a clear, structured way that would be helpful for a farmer."
    )
}

#[cfg(test)]
#[path = "seasonal_test.rs"]
mod tests;
