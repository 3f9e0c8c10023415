//! Completion collaborator config. Loaded from env.

use anyhow::Result;
use completion_client::{CompletionClientConfig, DEFAULT_API_URL, DEFAULT_MODEL};
use std::env;
use std::time::Duration;

use super::{parsed_var, required_var};

/// No `Debug`: holds the API key.
#[derive(Clone)]
pub struct LlmConfig {
    /// API_KEY (required)
    pub api_key: String,
    /// COMPLETION_API_URL, or OPENAI_BASE_URL + `/chat/completions`
    pub api_url: String,
    /// MODEL
    pub model: String,
    /// COMPLETION_TIMEOUT_SECS
    pub timeout_secs: u64,
    /// APP_REFERER, sent as `HTTP-Referer`
    pub referer: Option<String>,
    /// APP_TITLE, sent as `X-Title`
    pub title: Option<String>,
}

impl LlmConfig {
    pub fn from_env() -> Result<Self> {
        let api_key = required_var("API_KEY")?;
        let api_url = env::var("COMPLETION_API_URL")
            .ok()
            .or_else(|| {
                env::var("OPENAI_BASE_URL")
                    .ok()
                    .map(|base| format!("{}/chat/completions", base.trim_end_matches('/')))
            })
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let model = env::var("MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let timeout_secs = parsed_var("COMPLETION_TIMEOUT_SECS", 30)?;
        let referer = Some(
            env::var("APP_REFERER").unwrap_or_else(|_| "http://localhost:3000".to_string()),
        )
        .filter(|s| !s.trim().is_empty());
        let title = Some(env::var("APP_TITLE").unwrap_or_else(|_| "Rust Chatbot".to_string()))
            .filter(|s| !s.trim().is_empty());

        Ok(Self {
            api_key,
            api_url,
            model,
            timeout_secs,
            referer,
            title,
        })
    }

    pub fn validate(&self) -> Result<()> {
        if reqwest::Url::parse(&self.api_url).is_err() {
            anyhow::bail!("completion API URL is not a valid URL: {}", self.api_url);
        }
        if self.timeout_secs == 0 {
            anyhow::bail!("COMPLETION_TIMEOUT_SECS must be greater than 0");
        }
        Ok(())
    }

    pub fn client_config(&self) -> CompletionClientConfig {
        CompletionClientConfig {
            api_url: self.api_url.clone(),
            api_key: self.api_key.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
            referer: self.referer.clone(),
            title: self.title.clone(),
        }
    }
}
