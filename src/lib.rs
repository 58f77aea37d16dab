pub mod api;
pub mod config;
pub mod error;
pub mod fallback;
pub mod feeds;
pub mod normalize;
pub mod upstream;

use std::sync::Arc;
use config::Config;
use upstream::{Transport, UpstreamClient};

/// Application state shared across handlers
#[derive(Clone, Debug)]
pub struct AppState {
    pub config: Arc<Config>,
    pub upstream: UpstreamClient,
}

impl AppState {
    /// Talks to the real providers over HTTP.
    pub fn new(config: Config) -> Self {
        let upstream = UpstreamClient::reqwest(config.upstream_timeout);
        Self {
            config: Arc::new(config),
            upstream,
        }
    }

    pub fn with_transport(config: Config, transport: Arc<dyn Transport>) -> Self {
        let upstream = UpstreamClient::new(transport, config.upstream_timeout);
        Self {
            config: Arc::new(config),
            upstream,
        }
    }
}
