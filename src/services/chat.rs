//! Conversational pipeline: classify → dispatch → persist.

use serde::Serialize;
use tracing::{info, warn};

use crate::state::AppState;

use super::classify::{self, Intent};
use super::{advice, history, market, seasonal, weather};

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Structured reply for the chat surface.
#[derive(Debug, Serialize)]
pub struct ChatReply {
    pub response: String,
    pub timestamp: String,
}

/// Answer a chat message by routing it to the matching advisory adapter and
/// record the exchange. Never fails: internal errors come back as an
/// apologetic reply.
pub async fn respond(state: &AppState, message: &str) -> ChatReply {
    let intent = classify::classify(message);
    info!(?intent, "chat message classified");

    let response = match intent {
        Intent::Weather { location } => weather::forecast_for(state, &location).await,
        Intent::Price { crop } => market::price_report(state, &crop).await,
        Intent::Seasonal { region, season } => {
            seasonal::seasonal_advice(state, &region, season.as_deref()).await
        }
        Intent::General => advice::get_advice(state, message).await,
    };

    let timestamp = chrono::Local::now().format(TIMESTAMP_FORMAT).to_string();

    match history::save_chat_query(&state.pool, message, &response).await {
        Ok(()) => ChatReply { response, timestamp },
        Err(e) => {
            warn!(error = %e, "chat history insert failed");
            ChatReply {
                response: format!("I'm sorry, I encountered an error: {e}. Please try again."),
                timestamp,
            }
        }
    }
}

#[cfg(test)]
#[path = "chat_test.rs"]
mod tests;
