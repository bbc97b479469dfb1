//! General-question advisory dispatcher.
//!
//! DESIGN
//! ======
//! Fixed provider-priority fallback: primary LLM, then fallback LLM, then the
//! static rule table. First non-empty answer wins. Provider failure is
//! intentional graceful degradation, never surfaced to the caller — but each
//! failure is logged with its typed reason (timeout vs upstream vs parse) so
//! the swallowing is observable.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::llm::TextGenerate;
use crate::state::AppState;

pub const EMPTY_QUERY_MESSAGE: &str = "Please enter a valid farming question.";

/// Answer a general farming question. Never fails, never returns empty text.
///
/// An empty query short-circuits with a fixed message before any provider is
/// contacted.
pub async fn get_advice(state: &AppState, query: &str) -> String {
    if query.is_empty() {
        return EMPTY_QUERY_MESSAGE.to_string();
    }

    if let Some(primary) = &state.primary_llm {
        if let Some(answer) = try_provider(primary, query).await {
            return answer;
        }
    } else {
        debug!("primary advisor not configured");
    }

    if let Some(fallback) = &state.fallback_llm {
        if let Some(answer) = try_provider(fallback, query).await {
            return answer;
        }
    } else {
        debug!("fallback advisor not configured");
    }

    rule_based_advice(query).to_string()
}

/// One link in the fallback chain: a typed error or an empty answer both mean
/// "no answer here, try the next".
async fn try_provider(provider: &Arc<dyn TextGenerate>, query: &str) -> Option<String> {
    match provider.generate(query).await {
        Ok(text) if !text.trim().is_empty() => Some(text),
        Ok(_) => {
            debug!(provider = provider.name(), "advisor returned an empty answer");
            None
        }
        Err(e) => {
            warn!(
                provider = provider.name(),
                reason = e.reason(),
                error = %e,
                "advisor call failed, trying next"
            );
            None
        }
    }
}

/// Static keyword-matched advice, the last link in the chain.
#[must_use]
pub fn rule_based_advice(query: &str) -> &'static str {
    let query = query.to_lowercase();
    if query.contains("pest") {
        "Use eco-friendly pesticides and monitor crop leaves daily."
    } else if query.contains("water") || query.contains("irrigation") {
        "Ensure drip irrigation and avoid overwatering."
    } else if query.contains("soil") {
        "Test soil pH and enrich with organic compost."
    } else if query.contains("weather") || query.contains("rain") {
        "Check the local forecast; consider protective covering for crops."
    } else if query.contains("subsidy") || query.contains("scheme") {
        "Visit your Krishibhavan office for the latest subsidy and scheme details."
    } else {
        "Consult your nearest agricultural office for expert advice."
    }
}

#[cfg(test)]
#[path = "advice_test.rs"]
mod tests;
