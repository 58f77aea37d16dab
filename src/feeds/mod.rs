//! Per-feed orchestration: fetch, normalize, and degrade to the static
//! catalogs on any upstream failure.

use std::future::Future;

use tokio::task::JoinSet;

use crate::api::models::LOCAL_SOURCE;
use crate::error::Result;

pub mod quotes;
pub mod recipes;
pub mod weather;

/// A served payload plus where it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Feed<T> {
    pub data: T,
    pub source: String,
    pub fallback: bool,
}

impl<T> Feed<T> {
    pub fn live(source: &str, data: T) -> Self {
        Self {
            data,
            source: source.to_string(),
            fallback: false,
        }
    }

    pub fn fallback(data: T) -> Self {
        Self {
            data,
            source: LOCAL_SOURCE.to_string(),
            fallback: true,
        }
    }
}

/// Runs every task to completion and keeps the successes, in input order.
/// A failed or panicked task is logged and skipped; it never cancels the rest.
pub(crate) async fn collect_successes<T, F>(tasks: Vec<F>) -> Vec<T>
where
    F: Future<Output = Result<T>> + Send + 'static,
    T: Send + 'static,
{
    let mut set = JoinSet::new();
    for (index, task) in tasks.into_iter().enumerate() {
        set.spawn(async move { (index, task.await) });
    }

    let mut done = Vec::with_capacity(set.len());
    while let Some(joined) = set.join_next().await {
        match joined {
            Ok((index, Ok(value))) => done.push((index, value)),
            Ok((index, Err(err))) => tracing::warn!(index, error = %err, "fan-out item failed"),
            Err(err) => tracing::warn!(error = %err, "fan-out task did not complete"),
        }
    }

    done.sort_by_key(|(index, _)| *index);
    done.into_iter().map(|(_, value)| value).collect()
}
