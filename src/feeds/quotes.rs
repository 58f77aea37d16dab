use crate::AppState;
use crate::api::models::Quote;
use crate::error::{AppError, Result};
use crate::fallback;
use crate::normalize;
use crate::upstream::zenquotes;

use super::Feed;

/// Always yields a quote with non-empty text and author.
pub async fn quote(state: &AppState) -> Feed<Quote> {
    match fetch_live(state).await {
        Ok(quote) => {
            tracing::info!(author = %quote.author, "serving live quote");
            Feed::live(zenquotes::SOURCE, quote)
        }
        Err(err) => {
            tracing::warn!(error = %err, "quote provider unavailable, serving local quote");
            Feed::fallback(fallback::random_quote())
        }
    }
}

async fn fetch_live(state: &AppState) -> Result<Quote> {
    let raw = zenquotes::fetch_random(&state.upstream, &state.config.zenquotes_base_url).await?;
    normalize::quote::normalize(raw)
        .ok_or_else(|| AppError::UpstreamShape("quote was empty after cleaning".to_string()))
}
