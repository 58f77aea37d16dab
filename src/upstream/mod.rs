//! Outbound calls to the third-party providers.
//!
//! Every call goes through [`UpstreamClient::get_json`], which applies one
//! uniform timeout and collapses transport failures, non-2xx statuses and
//! unparseable bodies into [`AppError::UpstreamUnavailable`]. Provider modules
//! then check the JSON for the fields their normalizer needs and report
//! anything missing as [`AppError::UpstreamShape`].

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use reqwest::{Client, ClientBuilder};
use reqwest::header::USER_AGENT as USER_AGENT_HEADER;
use serde_json::Value;

use crate::error::{AppError, Result};

pub mod mealdb;
pub mod openweather;
pub mod zenquotes;

const USER_AGENT: &str = "Daily-Routine-App/1.0";

// Shared client so connections are pooled across requests
static CLIENT: Lazy<Client> = Lazy::new(|| {
    ClientBuilder::new()
        .user_agent(USER_AGENT)
        .connect_timeout(Duration::from_secs(5))
        .pool_max_idle_per_host(10)
        .build()
        .expect("Failed to build HTTP client")
});

/// A single GET against a provider. Query values are percent-encoded by the
/// transport, never by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamRequest {
    pub url: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
}

impl UpstreamRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            query: Vec::new(),
            headers: Vec::new(),
        }
    }

    pub fn with_query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn query_value(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Path and query for logging. Credentials are masked.
    pub fn describe(&self) -> String {
        let query: Vec<String> = self
            .query
            .iter()
            .map(|(key, value)| {
                if key == "appid" {
                    format!("{key}=***")
                } else {
                    format!("{key}={value}")
                }
            })
            .collect();

        if query.is_empty() {
            self.url.clone()
        } else {
            format!("{}?{}", self.url, query.join("&"))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamResponse {
    pub status: u16,
    pub body: String,
}

impl UpstreamResponse {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// Seam between the feeds and the network.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: UpstreamRequest) -> Result<UpstreamResponse>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ReqwestTransport;

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, request: UpstreamRequest) -> Result<UpstreamResponse> {
        let outbound = build_request(&CLIENT, &request)?;
        let response = CLIENT.execute(outbound).await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        Ok(UpstreamResponse { status, body })
    }
}

/// Percent-encodes the query and stamps the user agent on the request itself.
fn build_request(client: &Client, request: &UpstreamRequest) -> reqwest::Result<reqwest::Request> {
    let mut builder = client
        .get(&request.url)
        .query(&request.query)
        .header(USER_AGENT_HEADER, USER_AGENT);
    for (name, value) in &request.headers {
        builder = builder.header(name.as_str(), value.as_str());
    }

    builder.build()
}

#[derive(Clone)]
pub struct UpstreamClient {
    transport: Arc<dyn Transport>,
    timeout: Duration,
}

impl fmt::Debug for UpstreamClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpstreamClient")
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl UpstreamClient {
    pub fn new(transport: Arc<dyn Transport>, timeout: Duration) -> Self {
        Self { transport, timeout }
    }

    pub fn reqwest(timeout: Duration) -> Self {
        Self::new(Arc::new(ReqwestTransport), timeout)
    }

    /// One attempt, bounded by the client timeout. No retries.
    pub async fn get_json(&self, request: UpstreamRequest) -> Result<Value> {
        let target = request.describe();
        tracing::debug!(%target, "fetching upstream");

        let response = tokio::time::timeout(self.timeout, self.transport.execute(request))
            .await
            .map_err(|_| {
                AppError::UpstreamUnavailable(format!("{target} timed out after {:?}", self.timeout))
            })??;

        if !response.is_success() {
            return Err(AppError::UpstreamUnavailable(format!(
                "{target} responded with status {}",
                response.status
            )));
        }

        serde_json::from_str(&response.body).map_err(|e| {
            AppError::UpstreamUnavailable(format!("{target} returned invalid JSON: {e}"))
        })
    }
}

/// Reads an optional string field, treating null and blank as absent.
pub(crate) fn non_blank(value: &Value, key: &str) -> Option<String> {
    value
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
