use crate::AppState;
use crate::api::models::{Recipe, RecipeQuery};
use crate::error::{AppError, Result};
use crate::fallback;
use crate::normalize;
use crate::upstream::{UpstreamClient, mealdb};

use super::{Feed, collect_successes};

/// How the recipe list is selected. Search wins over category; with neither,
/// random meals are discovered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecipeMode {
    Search(String),
    Category(String),
    Discover,
}

impl RecipeMode {
    pub fn from_query(query: &RecipeQuery) -> Self {
        let non_blank = |value: &Option<String>| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };

        if let Some(term) = non_blank(&query.search) {
            RecipeMode::Search(term)
        } else if let Some(category) = non_blank(&query.category) {
            RecipeMode::Category(category)
        } else {
            RecipeMode::Discover
        }
    }
}

/// A provider answer with zero matches is served as an empty live list; only
/// upstream failures switch to the catalog.
pub async fn recipes(state: &AppState, mode: &RecipeMode) -> Feed<Vec<Recipe>> {
    match fetch_live(state, mode).await {
        Ok(recipes) => {
            tracing::info!(?mode, count = recipes.len(), "serving live recipes");
            Feed::live(mealdb::SOURCE, recipes)
        }
        Err(err) => {
            tracing::warn!(?mode, error = %err, "recipe provider unavailable, serving local recipes");
            Feed::fallback(fallback::recipes())
        }
    }
}

/// Full details for one recipe. Catalog ids resolve even when the provider
/// is down.
pub async fn recipe(state: &AppState, id: &str) -> Result<Feed<Recipe>> {
    let id = id.trim();
    let looked_up = mealdb::lookup(&state.upstream, &state.config.mealdb_base_url, id).await;

    match looked_up {
        Ok(Some(meal)) => {
            if let Some(recipe) = normalize::recipe::normalize(&meal) {
                return Ok(Feed::live(mealdb::SOURCE, recipe));
            }
        }
        Ok(None) => {}
        Err(err) if err.is_upstream() => {
            tracing::warn!(id, error = %err, "recipe lookup failed");
            return fallback::recipe_by_id(id).map(Feed::fallback).ok_or(err);
        }
        Err(err) => return Err(err),
    }

    fallback::recipe_by_id(id)
        .map(Feed::fallback)
        .ok_or_else(|| AppError::NotFound(format!("no recipe with id {id}")))
}

async fn fetch_live(state: &AppState, mode: &RecipeMode) -> Result<Vec<Recipe>> {
    let base_url = &state.config.mealdb_base_url;

    match mode {
        RecipeMode::Search(term) => {
            let meals = mealdb::search(&state.upstream, base_url, term).await?;
            enrich(state, normalize_all(&meals)).await
        }
        RecipeMode::Category(category) => {
            let meals = mealdb::filter_by_category(&state.upstream, base_url, category).await?;
            let mut recipes = normalize_all(&meals);
            for recipe in &mut recipes {
                if recipe.category.is_empty() {
                    recipe.category = category.clone();
                }
            }
            enrich(state, recipes).await
        }
        RecipeMode::Discover => discover(state).await,
    }
}

fn normalize_all(meals: &[mealdb::RawMeal]) -> Vec<Recipe> {
    meals.iter().filter_map(normalize::recipe::normalize).collect()
}

/// Fires the configured number of random-meal calls at once. Any number of
/// successes above zero is a usable answer.
async fn discover(state: &AppState) -> Result<Vec<Recipe>> {
    let attempts = state.config.recipe_random_attempts;
    let tasks: Vec<_> = (0..attempts)
        .map(|_| {
            let client = state.upstream.clone();
            let base_url = state.config.mealdb_base_url.clone();
            async move {
                let meal = mealdb::random(&client, &base_url).await?;
                normalize::recipe::normalize(&meal)
                    .ok_or_else(|| AppError::UpstreamShape("random meal has no id or name".to_string()))
            }
        })
        .collect();

    let recipes = collect_successes(tasks).await;
    if recipes.is_empty() {
        return Err(AppError::UpstreamUnavailable(format!(
            "all {attempts} random meal requests failed"
        )));
    }

    tracing::debug!(attempts, succeeded = recipes.len(), "random discovery finished");
    Ok(recipes)
}

/// Replaces summary-only results with full details, one concurrent lookup per
/// item. Items whose lookup fails are dropped.
async fn enrich(state: &AppState, recipes: Vec<Recipe>) -> Result<Vec<Recipe>> {
    if !state.config.recipe_detail_lookup || !recipes.iter().any(Recipe::is_summary) {
        return Ok(recipes);
    }

    let requested = recipes.len();
    let tasks: Vec<_> = recipes
        .into_iter()
        .map(|recipe| detail_task(state.upstream.clone(), state.config.mealdb_base_url.clone(), recipe))
        .collect();

    let enriched = collect_successes(tasks).await;
    if enriched.is_empty() && requested > 0 {
        return Err(AppError::UpstreamUnavailable(format!(
            "all {requested} recipe detail lookups failed"
        )));
    }

    Ok(enriched)
}

async fn detail_task(client: UpstreamClient, base_url: String, summary: Recipe) -> Result<Recipe> {
    if !summary.is_summary() {
        return Ok(summary);
    }

    let meal = mealdb::lookup(&client, &base_url, &summary.id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("recipe {} vanished", summary.id)))?;

    let mut detailed = normalize::recipe::normalize(&meal)
        .ok_or_else(|| AppError::UpstreamShape(format!("recipe {} has no name", summary.id)))?;
    if detailed.category.is_empty() {
        detailed.category = summary.category;
    }

    Ok(detailed)
}
