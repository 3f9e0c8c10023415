//! HTTP client for the completion collaborator.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, StatusCode};
use tracing::{debug, error, info, instrument, warn};

use crate::error::CompletionError;
use crate::mask_token;
use crate::request::{CompletionRequest, CompletionResponse};

/// OpenRouter chat completions endpoint.
pub const DEFAULT_API_URL: &str = "https://openrouter.ai/api/v1/chat/completions";

/// Something that can turn a [`CompletionRequest`] into reply text.
///
/// The server depends on this trait so tests can swap in a stub.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Returns the first choice's content.
    async fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionError>;
}

/// Settings for [`CompletionClient`].
#[derive(Debug, Clone)]
pub struct CompletionClientConfig {
    /// Full `chat/completions` URL.
    pub api_url: String,
    pub api_key: String,
    pub timeout: Duration,
    /// Sent as `HTTP-Referer` (OpenRouter app attribution).
    pub referer: Option<String>,
    /// Sent as `X-Title`.
    pub title: Option<String>,
}

/// reqwest-based client for an OpenAI-compatible `chat/completions` endpoint.
///
/// One POST per call. No retries: a timeout or error is returned to the caller as-is.
#[derive(Clone)]
pub struct CompletionClient {
    client: Client,
    api_url: String,
    /// Masked form of the key, for logs.
    masked_key: String,
}

impl CompletionClient {
    /// Builds the client; the bearer credential and attribution headers are set as defaults.
    pub fn new(config: CompletionClientConfig) -> Result<Self, CompletionError> {
        let mut headers = HeaderMap::new();
        let bearer = HeaderValue::from_str(&format!("Bearer {}", config.api_key))
            .map_err(|e| CompletionError::Transport(format!("invalid API key header: {}", e)))?;
        headers.insert(AUTHORIZATION, bearer);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(referer) = &config.referer {
            if let Ok(v) = HeaderValue::from_str(referer) {
                headers.insert("HTTP-Referer", v);
            }
        }
        if let Some(title) = &config.title {
            if let Ok(v) = HeaderValue::from_str(title) {
                headers.insert("X-Title", v);
            }
        }

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(|e| CompletionError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            api_url: config.api_url,
            masked_key: mask_token(&config.api_key),
        })
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }
}

#[async_trait]
impl CompletionProvider for CompletionClient {
    /// Sends the request and returns the first choice's content.
    ///
    /// Status 429 maps to [`CompletionError::RateLimited`], 504 and client timeouts to
    /// [`CompletionError::Timeout`], any other non-2xx to [`CompletionError::Status`].
    #[instrument(skip(self, request), fields(model = %request.model))]
    async fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionError> {
        info!(
            url = %self.api_url,
            message_count = request.messages.len(),
            api_key = %self.masked_key,
            "step: completion request"
        );
        if let Ok(json) = serde_json::to_string(request) {
            debug!(request_json = %json, "completion request JSON");
        }

        let response = self
            .client
            .post(&self.api_url)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, timeout = e.is_timeout(), "completion request failed");
                CompletionError::from_reqwest(e)
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            error!(error = %e, status = status.as_u16(), "failed reading completion body");
            CompletionError::from_reqwest(e)
        })?;
        debug!(status = status.as_u16(), body = %body, "completion response");

        if status == StatusCode::TOO_MANY_REQUESTS {
            warn!(status = status.as_u16(), "completion API rate limited");
            return Err(CompletionError::RateLimited(body));
        }
        if status == StatusCode::GATEWAY_TIMEOUT {
            warn!(status = status.as_u16(), "completion API gateway timeout");
            return Err(CompletionError::Timeout(body));
        }
        if !status.is_success() {
            error!(status = status.as_u16(), body = %body, "completion API error");
            return Err(CompletionError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: CompletionResponse = serde_json::from_str(&body).map_err(|e| {
            error!(error = %e, "completion response is not valid JSON");
            CompletionError::MalformedBody(e.to_string())
        })?;

        if let Some(ref u) = parsed.usage {
            info!(
                prompt_tokens = u.prompt_tokens,
                completion_tokens = u.completion_tokens,
                total_tokens = u.total_tokens,
                "completion usage"
            );
        }

        let choice = parsed.choices.into_iter().next().ok_or_else(|| {
            error!("No response choices in API response");
            CompletionError::EmptyChoices
        })?;

        choice.message.content.ok_or_else(|| {
            error!("completion choice has no content");
            CompletionError::MalformedBody("choice message has no content".to_string())
        })
    }
}
