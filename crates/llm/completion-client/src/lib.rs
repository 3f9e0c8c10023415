//! # Completion client
//!
//! Talks to an OpenAI-compatible `chat/completions` endpoint (OpenRouter by default).
//!
//! - [`RequestBuilder`]: turns a [`prompt::ConversationWindow`] and the current user message into
//!   a [`CompletionRequest`] with fixed sampling parameters, prepending a keyword-selected
//!   instruction for this request only.
//! - [`CompletionClient`]: one POST per call, bounded by a timeout, no retries. Errors are
//!   classified in [`CompletionError`] so callers can tell rate limiting, timeouts and upstream
//!   failures apart.
//! - [`mask_token`]: masks credentials for logging.

mod client;
mod error;
mod request;

pub use client::{CompletionClient, CompletionClientConfig, CompletionProvider, DEFAULT_API_URL};
pub use error::CompletionError;
pub use request::{
    ChoiceMessage, CompletionChoice, CompletionRequest, CompletionResponse, CompletionUsage,
    RequestBuilder, SamplingParams, DEFAULT_MODEL,
};

/// Masks an API key/token for safe logging: shows first 7 chars + "***" + last 4 chars.
/// If length <= 11, returns "***" to avoid leaking any part of the key.
pub fn mask_token(token: &str) -> String {
    let len = token.len();
    if len <= 11 || !token.is_char_boundary(7) || !token.is_char_boundary(len - 4) {
        return "***".to_string();
    }
    format!("{}***{}", &token[..7], &token[len - 4..])
}
