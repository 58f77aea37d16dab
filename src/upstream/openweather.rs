use serde::Deserialize;
use serde_json::Value;

use super::{UpstreamClient, UpstreamRequest};
use crate::error::{AppError, Result};

pub const SOURCE: &str = "openweathermap";

#[derive(Debug, Clone, Deserialize)]
pub struct Condition {
    #[serde(default)]
    pub main: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CurrentMain {
    pub temp: f64,
    pub feels_like: f64,
    pub humidity: f64,
    pub pressure: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Wind {
    pub speed: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Sys {
    #[serde(default)]
    pub country: Option<String>,
    pub sunrise: i64,
    pub sunset: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CurrentWeather {
    pub name: String,
    pub main: CurrentMain,
    pub weather: Vec<Condition>,
    pub wind: Wind,
    pub sys: Sys,
    /// Meters. Missing for some stations.
    #[serde(default)]
    pub visibility: Option<f64>,
    /// Shift from UTC in seconds.
    #[serde(default)]
    pub timezone: i32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EntryMain {
    pub temp: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ForecastEntry {
    pub dt: i64,
    pub main: EntryMain,
    #[serde(default)]
    pub weather: Vec<Condition>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct City {
    #[serde(default)]
    pub timezone: i32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Forecast {
    pub city: City,
    pub list: Vec<ForecastEntry>,
}

fn request(base_url: &str, endpoint: &str, city: &str, api_key: &str) -> UpstreamRequest {
    UpstreamRequest::get(format!("{}/{}", base_url.trim_end_matches('/'), endpoint))
        .with_query("q", city)
        .with_query("appid", api_key)
        .with_query("units", "metric")
}

pub fn current_request(base_url: &str, city: &str, api_key: &str) -> UpstreamRequest {
    request(base_url, "weather", city, api_key)
}

pub async fn fetch_current(client: &UpstreamClient, base_url: &str, city: &str, api_key: &str) -> Result<CurrentWeather> {
    let body = client.get_json(current_request(base_url, city, api_key)).await?;
    parse_current(body)
}

/// Five days of three-hour intervals.
pub async fn fetch_forecast(client: &UpstreamClient, base_url: &str, city: &str, api_key: &str) -> Result<Forecast> {
    let body = client.get_json(request(base_url, "forecast", city, api_key)).await?;
    parse_forecast(body)
}

pub fn parse_current(body: Value) -> Result<CurrentWeather> {
    let current: CurrentWeather = serde_json::from_value(body)?;
    if current.weather.is_empty() {
        return Err(AppError::UpstreamShape("current weather has no conditions".to_string()));
    }
    if current.name.trim().is_empty() {
        return Err(AppError::UpstreamShape("current weather has no location name".to_string()));
    }
    Ok(current)
}

pub fn parse_forecast(body: Value) -> Result<Forecast> {
    Ok(serde_json::from_value(body)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn current_body() -> Value {
        json!({
            "name": "London",
            "main": {"temp": 11.6, "feels_like": 10.2, "humidity": 81, "pressure": 1012},
            "weather": [{"main": "Clouds", "description": "broken clouds"}],
            "wind": {"speed": 5.0},
            "sys": {"country": "GB", "sunrise": 1700000000, "sunset": 1700030000},
            "timezone": 0
        })
    }

    #[test]
    fn parses_current_weather() {
        let current = parse_current(current_body()).unwrap();
        assert_eq!(current.name, "London");
        assert_eq!(current.sys.country.as_deref(), Some("GB"));
        assert_eq!(current.visibility, None);
        assert_eq!(current.weather[0].description, "broken clouds");
    }

    #[test]
    fn current_without_conditions_or_main_is_rejected() {
        let mut body = current_body();
        body["weather"] = json!([]);
        assert!(matches!(parse_current(body), Err(AppError::UpstreamShape(_))));

        let mut body = current_body();
        body.as_object_mut().unwrap().remove("main");
        assert!(matches!(parse_current(body), Err(AppError::UpstreamShape(_))));
    }

    #[test]
    fn forecast_requires_list() {
        assert!(matches!(
            parse_forecast(json!({"city": {"timezone": 3600}})),
            Err(AppError::UpstreamShape(_))
        ));

        let forecast = parse_forecast(json!({
            "city": {"timezone": 3600},
            "list": [{"dt": 1700000000, "main": {"temp": 3.2}, "weather": [{"main": "Rain", "description": "light rain"}]}]
        }))
        .unwrap();
        assert_eq!(forecast.city.timezone, 3600);
        assert_eq!(forecast.list.len(), 1);
    }
}
