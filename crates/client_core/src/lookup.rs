//! Remote venue metadata lookup.

use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use shared::{
    error::LookupError,
    protocol::{LookupPayload, RemoteLookupResponse, API_KEY_PARAM, TITLE_PARAM},
};
use tracing::{debug, info, warn};
use url::Url;

pub const DEFAULT_LOOKUP_BASE_URL: &str = "https://www.omdbapi.com/";
pub const DEFAULT_LOOKUP_TIMEOUT: Duration = Duration::from_secs(10);

#[async_trait]
pub trait LookupClient: Send + Sync {
    /// Resolves every failure to a [`LookupError`]; an empty trimmed query
    /// never reaches the network.
    async fn lookup(&self, query: &str) -> Result<LookupPayload, LookupError>;
}

#[derive(Debug, Clone)]
pub struct LookupConfig {
    pub base_url: Url,
    pub api_key: Option<String>,
    pub timeout: Duration,
}

impl LookupConfig {
    pub fn new(base_url: Url, api_key: Option<String>) -> Self {
        Self {
            base_url,
            api_key,
            timeout: DEFAULT_LOOKUP_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

pub struct HttpLookupClient {
    http: Client,
    config: LookupConfig,
}

impl HttpLookupClient {
    pub fn new(config: LookupConfig) -> anyhow::Result<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .context("failed to build lookup http client")?;
        Ok(Self { http, config })
    }

    async fn fetch(&self, query: &str) -> Result<RemoteLookupResponse, reqwest::Error> {
        let mut request = self
            .http
            .get(self.config.base_url.clone())
            .query(&[(TITLE_PARAM, query)]);
        if let Some(api_key) = &self.config.api_key {
            request = request.query(&[(API_KEY_PARAM, api_key.as_str())]);
        }
        request.send().await?.error_for_status()?.json().await
    }
}

#[async_trait]
impl LookupClient for HttpLookupClient {
    async fn lookup(&self, query: &str) -> Result<LookupPayload, LookupError> {
        let query = query.trim();
        if query.is_empty() {
            debug!("rejecting empty lookup query without a request");
            return Err(LookupError::Invalid);
        }

        info!(%query, "issuing venue lookup");
        let body = self.fetch(query).await.map_err(|err| {
            warn!(%query, error = %err, timeout = err.is_timeout(), "venue lookup transport failure");
            LookupError::network(err.to_string())
        })?;

        if let Some(remote_error) = body.error.as_deref() {
            debug!(%query, %remote_error, "remote reported lookup failure");
        }
        body.into_outcome()
    }
}

#[cfg(test)]
#[path = "tests/lookup_tests.rs"]
mod tests;
