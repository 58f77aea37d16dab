use serde_json::{Map, Value};

use super::{UpstreamClient, UpstreamRequest};
use crate::error::{AppError, Result};

pub const SOURCE: &str = "themealdb";

/// One entry of the provider's `meals` array. Kept as a loose map because the
/// ingredients arrive as twenty numbered field pairs.
#[derive(Debug, Clone, PartialEq)]
pub struct RawMeal(pub Map<String, Value>);

impl RawMeal {
    pub fn field(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    pub fn id(&self) -> Option<&str> {
        self.field("idMeal").map(str::trim).filter(|s| !s.is_empty())
    }
}

fn endpoint(base_url: &str, name: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), name)
}

/// Free-text search. A search with no hits yields an empty list.
pub async fn search(client: &UpstreamClient, base_url: &str, term: &str) -> Result<Vec<RawMeal>> {
    let request = UpstreamRequest::get(endpoint(base_url, "search.php")).with_query("s", term);
    let body = client.get_json(request).await?;
    Ok(parse_meals(&body)?.unwrap_or_default())
}

/// Category filter. Results only carry id, name and thumbnail.
pub async fn filter_by_category(client: &UpstreamClient, base_url: &str, category: &str) -> Result<Vec<RawMeal>> {
    let request = UpstreamRequest::get(endpoint(base_url, "filter.php")).with_query("c", category);
    let body = client.get_json(request).await?;
    Ok(parse_meals(&body)?.unwrap_or_default())
}

pub async fn random(client: &UpstreamClient, base_url: &str) -> Result<RawMeal> {
    let request = UpstreamRequest::get(endpoint(base_url, "random.php"));
    let body = client.get_json(request).await?;
    parse_meals(&body)?
        .and_then(|meals| meals.into_iter().next())
        .ok_or_else(|| AppError::UpstreamShape("random meal response was empty".to_string()))
}

pub async fn lookup(client: &UpstreamClient, base_url: &str, id: &str) -> Result<Option<RawMeal>> {
    let request = UpstreamRequest::get(endpoint(base_url, "lookup.php")).with_query("i", id);
    let body = client.get_json(request).await?;
    Ok(parse_meals(&body)?.and_then(|meals| meals.into_iter().next()))
}

/// `Ok(None)` when the provider reports no matches (`"meals": null`).
pub fn parse_meals(body: &Value) -> Result<Option<Vec<RawMeal>>> {
    match body.get("meals") {
        Some(Value::Null) => Ok(None),
        Some(Value::Array(items)) => {
            let meals = items
                .iter()
                .filter_map(|item| item.as_object().cloned().map(RawMeal))
                .collect();
            Ok(Some(meals))
        }
        Some(_) => Err(AppError::UpstreamShape("`meals` is not an array".to_string())),
        None => Err(AppError::UpstreamShape("response has no `meals` field".to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn null_meals_means_no_results() {
        assert_eq!(parse_meals(&json!({"meals": null})).unwrap(), None);
    }

    #[test]
    fn array_entries_become_raw_meals() {
        let meals = parse_meals(&json!({"meals": [{"idMeal": "52772", "strMeal": "Teriyaki"}, "junk"]}))
            .unwrap()
            .unwrap();
        assert_eq!(meals.len(), 1);
        assert_eq!(meals[0].id(), Some("52772"));
        assert_eq!(meals[0].field("strMeal"), Some("Teriyaki"));
    }

    #[test]
    fn missing_or_mistyped_meals_is_a_shape_error() {
        assert!(matches!(parse_meals(&json!({})), Err(AppError::UpstreamShape(_))));
        assert!(matches!(parse_meals(&json!({"meals": "x"})), Err(AppError::UpstreamShape(_))));
    }

    #[test]
    fn endpoint_tolerates_trailing_slash() {
        assert_eq!(endpoint("http://db/api/", "random.php"), "http://db/api/random.php");
    }
}
