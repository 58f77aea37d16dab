use axum::Json;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::feeds::Feed;

pub const SOURCE_HEADER: &str = "x-feed-source";
pub const FALLBACK_HEADER: &str = "x-feed-fallback";

/// Feed payloads are always served with 200; provenance travels in headers.
pub fn feed<T: Serialize>(feed: Feed<T>) -> Response {
    let source = HeaderValue::from_str(&feed.source).unwrap_or_else(|_| HeaderValue::from_static("unknown"));
    let fallback = HeaderValue::from_static(if feed.fallback { "true" } else { "false" });

    (
        StatusCode::OK,
        [(SOURCE_HEADER, source), (FALLBACK_HEADER, fallback)],
        Json(feed.data),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provenance_headers_are_set() {
        let live = feed(Feed::live("zenquotes", "x"));
        assert_eq!(live.status(), StatusCode::OK);
        assert_eq!(live.headers()[SOURCE_HEADER], "zenquotes");
        assert_eq!(live.headers()[FALLBACK_HEADER], "false");

        let local = feed(Feed::fallback(vec![1, 2]));
        assert_eq!(local.headers()[SOURCE_HEADER], "local");
        assert_eq!(local.headers()[FALLBACK_HEADER], "true");
    }

    #[test]
    fn unencodable_source_is_reported_as_unknown() {
        let response = feed(Feed::live("bad\nsource", ()));
        assert_eq!(response.headers()[SOURCE_HEADER], "unknown");
    }
}
