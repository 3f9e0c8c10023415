//! Search provider trait and the SerpApi client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::debug;

use crate::error::SearchError;

pub const DEFAULT_SEARCH_URL: &str = "https://serpapi.com/search";

/// One organic result.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchResult {
    pub title: Option<String>,
    pub link: Option<String>,
    pub snippet: Option<String>,
}

/// Trait for web search providers.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Runs `query` and returns at most `num` results.
    async fn search(&self, query: &str, num: usize) -> Result<Vec<SearchResult>, SearchError>;
}

#[derive(Debug, Clone)]
pub struct SerpApiConfig {
    pub url: String,
    pub api_key: String,
    /// Search engine parameter, `google` by default.
    pub engine: String,
    pub timeout: Duration,
}

/// SerpApi-style provider: `GET {url}?q=..&api_key=..&num=..&engine=..`.
pub struct SerpApiClient {
    client: Client,
    config: SerpApiConfig,
}

impl SerpApiClient {
    pub fn new(config: SerpApiConfig) -> Result<Self, SearchError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| SearchError::Request(e.to_string()))?;
        Ok(Self { client, config })
    }
}

#[derive(Debug, Deserialize)]
struct SerpApiResponse {
    #[serde(default)]
    organic_results: Vec<OrganicResult>,
}

#[derive(Debug, Deserialize)]
struct OrganicResult {
    title: Option<String>,
    link: Option<String>,
    snippet: Option<String>,
}

#[async_trait]
impl SearchProvider for SerpApiClient {
    async fn search(&self, query: &str, num: usize) -> Result<Vec<SearchResult>, SearchError> {
        let num_param = num.to_string();
        let response = self
            .client
            .get(&self.config.url)
            .query(&[
                ("q", query),
                ("api_key", self.config.api_key.as_str()),
                ("num", num_param.as_str()),
                ("engine", self.config.engine.as_str()),
            ])
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(SearchError::RateLimited);
        }
        if status != StatusCode::OK {
            return Err(SearchError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        let parsed: SerpApiResponse =
            serde_json::from_str(&body).map_err(|e| SearchError::Parse(e.to_string()))?;
        debug!(result_count = parsed.organic_results.len(), "search results received");

        Ok(parsed
            .organic_results
            .into_iter()
            .take(num)
            .map(|r| SearchResult {
                title: r.title,
                link: r.link,
                snippet: r.snippet,
            })
            .collect())
    }
}
