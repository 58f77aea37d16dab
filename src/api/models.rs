use serde::{Deserialize, Serialize};

/// Provenance tag for records built from the static catalogs.
pub const LOCAL_SOURCE: &str = "local";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Quote {
    pub text: String,
    pub author: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub source: String,
    pub fallback: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ingredient {
    pub name: String,
    pub measure: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recipe {
    pub id: String,
    pub name: String,
    pub image: String,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area: Option<String>,
    pub instructions: String,
    /// `instructions` split into non-blank lines.
    pub steps: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video: Option<String>,
    pub ingredients: Vec<Ingredient>,
}

impl Recipe {
    /// Filter results only carry id, name and thumbnail.
    pub fn is_summary(&self) -> bool {
        self.instructions.is_empty() && self.ingredients.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastDay {
    pub day: String,
    pub high: i64,
    pub low: i64,
    pub condition: String,
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherSnapshot {
    pub location: String,
    pub temperature: i64,
    pub feels_like: i64,
    pub condition: String,
    pub humidity: i64,
    pub wind_speed: i64,
    pub visibility: i64,
    pub pressure: i64,
    pub uv_index: i64,
    pub sunrise: String,
    pub sunset: String,
    pub forecast: Vec<ForecastDay>,
    pub source: String,
    pub fallback: bool,
}

#[derive(Debug, Default, Deserialize)]
pub struct RecipeQuery {
    pub search: Option<String>,
    pub category: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct WeatherQuery {
    pub city: Option<String>,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}
