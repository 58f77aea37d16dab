use std::sync::Arc;

use async_trait::async_trait;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{Value, json};
use tower::ServiceExt;

use daily_routine_hub::api::routes::create_router;
use daily_routine_hub::config::Config;
use daily_routine_hub::error::{AppError, Result};
use daily_routine_hub::upstream::{Transport, UpstreamRequest, UpstreamResponse};
use daily_routine_hub::AppState;

/// Answers like the three providers when `healthy`, otherwise refuses every call.
struct FakeProviders {
    healthy: bool,
}

#[async_trait]
impl Transport for FakeProviders {
    async fn execute(&self, request: UpstreamRequest) -> Result<UpstreamResponse> {
        if !self.healthy {
            return Err(AppError::UpstreamUnavailable("connection refused".to_string()));
        }

        let body = if request.url.ends_with("/random") {
            json!([{"q": "Start where you are.", "a": "Arthur Ashe,type,author"}])
        } else if request.url.ends_with("/search.php") {
            json!({"meals": [meal("52772", "Teriyaki Chicken Casserole")]})
        } else if request.url.ends_with("/lookup.php") {
            match request.query_value("i") {
                Some("52772") => json!({"meals": [meal("52772", "Teriyaki Chicken Casserole")]}),
                _ => json!({"meals": null}),
            }
        } else if request.url.ends_with("/weather") {
            json!({
                "name": "Tokyo",
                "main": {"temp": 18.5, "feels_like": 17.2, "humidity": 60, "pressure": 1015},
                "weather": [{"main": "Clear", "description": "clear sky"}],
                "wind": {"speed": 2.5},
                "sys": {"country": "JP", "sunrise": 1704059400, "sunset": 1704095400},
                "timezone": 32400
            })
        } else if request.url.ends_with("/forecast") {
            let list: Vec<Value> = (0..40)
                .map(|i| json!({"dt": 1704067200 + i * 10800, "main": {"temp": 10.0 + i as f64 / 4.0}, "weather": [{"main": "Clouds", "description": "overcast clouds"}]}))
                .collect();
            json!({"city": {"timezone": 32400}, "list": list})
        } else {
            return Ok(UpstreamResponse { status: 404, body: String::new() });
        };

        Ok(UpstreamResponse::ok(body.to_string()))
    }
}

fn meal(id: &str, name: &str) -> Value {
    json!({
        "idMeal": id,
        "strMeal": name,
        "strMealThumb": "https://img/teriyaki.jpg",
        "strCategory": "Chicken",
        "strArea": "Japanese",
        "strInstructions": "Preheat oven to 350.\r\nCombine sauce.\r\n\r\nBake.",
        "strYoutube": "https://www.youtube.com/watch?v=4aZr5hZXP_s",
        "strIngredient1": "soy sauce",
        "strMeasure1": "3/4 cup",
        "strIngredient2": "",
        "strMeasure2": "",
        "strIngredient3": "brown sugar",
        "strMeasure3": null
    })
}

fn app(healthy: bool) -> Router {
    let config = Config {
        openweather_api_key: Some("test-key".to_string()),
        zenquotes_base_url: "http://quotes".to_string(),
        mealdb_base_url: "http://meals".to_string(),
        openweather_base_url: "http://weather".to_string(),
        ..Config::default()
    };
    create_router(AppState::with_transport(config, Arc::new(FakeProviders { healthy })))
}

async fn get(app: Router, uri: &str) -> (StatusCode, Option<String>, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let fallback = response
        .headers()
        .get("x-feed-fallback")
        .map(|v| v.to_str().unwrap().to_string());
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap();

    (status, fallback, body)
}

#[tokio::test]
async fn quote_is_served_live() {
    let (status, fallback, body) = get(app(true), "/api/quotes").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(fallback.as_deref(), Some("false"));
    assert_eq!(body["author"], "Arthur Ashe");
    assert_eq!(body["source"], "zenquotes");
    assert_eq!(body["fallback"], false);
    assert!(body.get("category").is_none());
}

#[tokio::test]
async fn quote_outage_still_returns_200() {
    let (status, fallback, body) = get(app(false), "/api/quotes").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(fallback.as_deref(), Some("true"));
    assert_eq!(body["fallback"], true);
    assert_eq!(body["source"], "local");
    assert!(!body["text"].as_str().unwrap().is_empty());
    assert!(!body["author"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn recipe_search_returns_bare_array() {
    let (status, fallback, body) = get(app(true), "/api/recipes?search=teriyaki%20chicken").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(fallback.as_deref(), Some("false"));
    let recipes = body.as_array().unwrap();
    assert_eq!(recipes.len(), 1);
    assert_eq!(recipes[0]["id"], "52772");
    assert_eq!(recipes[0]["steps"], json!(["Preheat oven to 350.", "Combine sauce.", "Bake."]));
    assert_eq!(
        recipes[0]["ingredients"],
        json!([
            {"name": "soy sauce", "measure": "3/4 cup"},
            {"name": "brown sugar", "measure": ""}
        ])
    );
}

#[tokio::test]
async fn recipe_outage_serves_catalog_with_200() {
    let (status, fallback, body) = get(app(false), "/api/recipes").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(fallback.as_deref(), Some("true"));
    assert!(!body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn recipe_categories_are_listed() {
    let (status, _, body) = get(app(false), "/api/recipes/categories").await;

    assert_eq!(status, StatusCode::OK);
    let categories = body.as_array().unwrap();
    assert_eq!(categories.len(), 14);
    assert!(categories.contains(&json!("Seafood")));
}

#[tokio::test]
async fn recipe_detail_statuses() {
    let (status, _, body) = get(app(true), "/api/recipes/52772").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Teriyaki Chicken Casserole");

    let (status, _, body) = get(app(true), "/api/recipes/404404").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().is_some());

    let (status, _, body) = get(app(false), "/api/recipes/404404").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body["error"].as_str().is_some());
}

#[tokio::test]
async fn weather_is_served_live() {
    let (status, fallback, body) = get(app(true), "/api/weather?city=Tokyo").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(fallback.as_deref(), Some("false"));
    assert_eq!(body["location"], "Tokyo, JP");
    assert_eq!(body["condition"], "Sunny");
    assert_eq!(body["windSpeed"], 9);
    assert_eq!(body["visibility"], 10);
    assert_eq!(body["uvIndex"], 5);

    let forecast = body["forecast"].as_array().unwrap();
    assert!(forecast.len() <= 5);
    assert_eq!(forecast[0]["day"], "Today");
    assert_eq!(forecast[1]["day"], "Tomorrow");
    assert_eq!(forecast[0]["condition"], "Cloudy");
}

#[tokio::test]
async fn weather_outage_falls_back_to_requested_city() {
    let (status, fallback, body) = get(app(false), "/api/weather?city=Lima").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(fallback.as_deref(), Some("true"));
    assert_eq!(body["location"], "Lima");
    assert_eq!(body["fallback"], true);
    assert_eq!(body["forecast"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn health_reports_version() {
    let (status, _, body) = get(app(false), "/api/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}
