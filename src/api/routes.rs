use axum::{
    routing::get,
    Router,
    extract::{Path, Query, State},
    response::Response,
    Json,
};
use tower_http::cors::{CorsLayer, Any};
use tower_http::trace::TraceLayer;

use crate::AppState;
use crate::api::models::{HealthResponse, RecipeQuery, WeatherQuery};
use crate::api::response;
use crate::error::Result;
use crate::fallback::RECIPE_CATEGORIES;
use crate::feeds::{quotes, recipes, recipes::RecipeMode, weather};

pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health_handler))
        .route("/api/quotes", get(quotes_handler))
        .route("/api/recipes", get(recipes_handler))
        .route("/api/recipes/categories", get(categories_handler))
        .route("/api/recipes/:id", get(recipe_handler))
        .route("/api/weather", get(weather_handler))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(app_state)
}

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn quotes_handler(State(state): State<AppState>) -> Response {
    response::feed(quotes::quote(&state).await)
}

async fn recipes_handler(
    State(state): State<AppState>,
    Query(query): Query<RecipeQuery>,
) -> Response {
    let mode = RecipeMode::from_query(&query);
    response::feed(recipes::recipes(&state, &mode).await)
}

async fn categories_handler() -> Json<&'static [&'static str]> {
    Json(RECIPE_CATEGORIES)
}

async fn recipe_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response> {
    let feed = recipes::recipe(&state, &id).await?;
    Ok(response::feed(feed))
}

async fn weather_handler(
    State(state): State<AppState>,
    Query(query): Query<WeatherQuery>,
) -> Response {
    response::feed(weather::weather(&state, query.city.as_deref()).await)
}
