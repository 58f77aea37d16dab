use crate::AppState;
use crate::api::models::WeatherSnapshot;
use crate::error::Result;
use crate::fallback;
use crate::normalize;
use crate::upstream::openweather;

use super::Feed;

/// Current conditions then the forecast, in sequence. Both must succeed for
/// live data to be served.
pub async fn weather(state: &AppState, city: Option<&str>) -> Feed<WeatherSnapshot> {
    let city = resolve_city(city, &state.config.default_city);

    let Some(api_key) = state.config.openweather_api_key.as_deref() else {
        tracing::warn!(city, "OPENWEATHER_API_KEY not set, serving local weather");
        return Feed::fallback(fallback::weather(city));
    };

    match fetch_live(state, city, api_key).await {
        Ok(snapshot) => {
            tracing::info!(city, location = %snapshot.location, "serving live weather");
            Feed::live(openweather::SOURCE, snapshot)
        }
        Err(err) => {
            tracing::warn!(city, error = %err, "weather provider unavailable, serving local weather");
            Feed::fallback(fallback::weather(city))
        }
    }
}

fn resolve_city<'a>(requested: Option<&'a str>, default_city: &'a str) -> &'a str {
    requested
        .map(str::trim)
        .filter(|city| !city.is_empty())
        .unwrap_or(default_city)
}

async fn fetch_live(state: &AppState, city: &str, api_key: &str) -> Result<WeatherSnapshot> {
    let base_url = &state.config.openweather_base_url;
    let current = openweather::fetch_current(&state.upstream, base_url, city, api_key).await?;
    let forecast = openweather::fetch_forecast(&state.upstream, base_url, city, api_key).await?;

    Ok(normalize::weather::snapshot(&current, &forecast))
}
