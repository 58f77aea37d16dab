use serde_json::Value;

use super::{non_blank, UpstreamClient, UpstreamRequest};
use crate::error::{AppError, Result};

pub const SOURCE: &str = "zenquotes";

/// A quote exactly as the provider sent it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawQuote {
    pub text: String,
    pub author: String,
}

pub fn random_request(base_url: &str) -> UpstreamRequest {
    UpstreamRequest::get(format!("{}/random", base_url.trim_end_matches('/')))
        .with_header("Accept", "application/json")
}

pub async fn fetch_random(client: &UpstreamClient, base_url: &str) -> Result<RawQuote> {
    let body = client.get_json(random_request(base_url)).await?;
    parse_random(&body)
}

/// The provider answers with a one-element array of `{q, a, ...}`.
pub fn parse_random(body: &Value) -> Result<RawQuote> {
    let first = body
        .as_array()
        .and_then(|items| items.first())
        .ok_or_else(|| AppError::UpstreamShape("expected a non-empty quote array".to_string()))?;

    match (non_blank(first, "q"), non_blank(first, "a")) {
        (Some(text), Some(author)) => Ok(RawQuote { text, author }),
        _ => Err(AppError::UpstreamShape("quote is missing text or author".to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn takes_first_element() {
        let body = json!([
            {"q": "Stay hungry.", "a": "Steve Jobs", "h": "<blockquote/>"},
            {"q": "ignored", "a": "ignored"}
        ]);
        let quote = parse_random(&body).unwrap();
        assert_eq!(quote.text, "Stay hungry.");
        assert_eq!(quote.author, "Steve Jobs");
    }

    #[test]
    fn rejects_unusable_payloads() {
        for body in [
            json!([]),
            json!({"q": "not an array", "a": "x"}),
            json!([{"q": "no author"}]),
            json!([{"q": "  ", "a": "Blank Text"}]),
            json!([{"q": null, "a": "Null Text"}]),
        ] {
            let err = parse_random(&body).unwrap_err();
            assert!(matches!(err, AppError::UpstreamShape(_)), "{body}");
        }
    }
}
