//! Search collaborator config. Loaded from env.

use anyhow::Result;
use std::env;
use std::time::Duration;
use web_search::{SerpApiConfig, DEFAULT_SEARCH_URL};

use super::{parsed_var, required_var};

/// No `Debug`: holds the API key.
#[derive(Clone)]
pub struct SearchConfig {
    /// SEARCH_API_KEY (required)
    pub api_key: String,
    /// SEARCH_API_URL
    pub api_url: String,
    /// SEARCH_TIMEOUT_SECS
    pub timeout_secs: u64,
}

impl SearchConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            api_key: required_var("SEARCH_API_KEY")?,
            api_url: env::var("SEARCH_API_URL").unwrap_or_else(|_| DEFAULT_SEARCH_URL.to_string()),
            timeout_secs: parsed_var("SEARCH_TIMEOUT_SECS", 5)?,
        })
    }

    pub fn validate(&self) -> Result<()> {
        if reqwest::Url::parse(&self.api_url).is_err() {
            anyhow::bail!("SEARCH_API_URL is not a valid URL: {}", self.api_url);
        }
        if self.timeout_secs == 0 {
            anyhow::bail!("SEARCH_TIMEOUT_SECS must be greater than 0");
        }
        Ok(())
    }

    pub fn client_config(&self) -> SerpApiConfig {
        SerpApiConfig {
            url: self.api_url.clone(),
            api_key: self.api_key.clone(),
            engine: "google".to_string(),
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }
}
