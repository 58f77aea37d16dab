use crate::api::models::Quote;
use crate::upstream::zenquotes::{RawQuote, SOURCE};

/// `None` when the cleaned quote would have an empty text or author.
pub fn normalize(raw: RawQuote) -> Option<Quote> {
    let text = raw.text.trim().to_string();
    let author = clean_author(&raw.author);
    if text.is_empty() || author.is_empty() {
        return None;
    }

    Some(Quote {
        text,
        author,
        category: None,
        source: SOURCE.to_string(),
        fallback: false,
    })
}

/// The provider sometimes appends metadata after a comma.
pub fn clean_author(author: &str) -> String {
    author.split(',').next().unwrap_or_default().trim().to_string()
}
