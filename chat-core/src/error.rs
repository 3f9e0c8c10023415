//! Error types shared by the chatbot crates.
//!
//! [`ChatError`] is the single taxonomy the orchestrator reports with. Each kind maps to one
//! HTTP status via [`ChatError::status_code`]; [`ChatError::client_message`] is the bounded,
//! non-sensitive text returned to the browser while the full cause is logged server-side.

use thiserror::Error;

/// Longest upstream detail echoed back to a client.
pub const MAX_CLIENT_DETAIL_LEN: usize = 200;

/// Top-level error for a chat request (input, auth, upstream, storage, config, internal).
#[derive(Error, Debug)]
pub enum ChatError {
    #[error("Invalid input: {0}")]
    ClientInput(String),

    #[error("Unauthorized: {0}")]
    Auth(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Upstream rate limited: {0}")]
    UpstreamRateLimited(String),

    #[error("Upstream timed out: {0}")]
    UpstreamTimeout(String),

    #[error("Upstream error (status {status:?}): {detail}")]
    Upstream { status: Option<u16>, detail: String },

    #[error("Database error: {0}")]
    Database(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ChatError {
    /// HTTP status for this error kind.
    pub fn status_code(&self) -> u16 {
        match self {
            ChatError::ClientInput(_) => 400,
            ChatError::Auth(_) => 401,
            ChatError::Conflict(_) => 409,
            ChatError::UpstreamRateLimited(_) => 429,
            ChatError::UpstreamTimeout(_) => 504,
            ChatError::Upstream { .. }
            | ChatError::Database(_)
            | ChatError::Config(_)
            | ChatError::Internal(_) => 500,
        }
    }

    /// Message safe to return to the client.
    ///
    /// Input, auth and conflict messages are ours and returned as-is. Upstream detail is
    /// truncated to [`MAX_CLIENT_DETAIL_LEN`]. Database, config and internal causes are replaced
    /// by a generic sentence.
    pub fn client_message(&self) -> String {
        match self {
            ChatError::ClientInput(msg) | ChatError::Auth(msg) | ChatError::Conflict(msg) => {
                msg.clone()
            }
            ChatError::UpstreamRateLimited(_) => {
                "The assistant is receiving too many requests, please try again later".to_string()
            }
            ChatError::UpstreamTimeout(_) => "The assistant took too long to respond".to_string(),
            ChatError::Upstream { status, detail } => {
                let detail = truncate_detail(detail, MAX_CLIENT_DETAIL_LEN);
                match status {
                    Some(code) => format!("API Error: {} - {}", code, detail),
                    None => format!("Failed to communicate with API: {}", detail),
                }
            }
            ChatError::Database(_) | ChatError::Config(_) | ChatError::Internal(_) => {
                "An unexpected error occurred".to_string()
            }
        }
    }
}

/// Cuts `s` to at most `max_len` bytes on a char boundary, appending "..." when shortened.
pub fn truncate_detail(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        return s.to_string();
    }
    let mut end = max_len;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &s[..end])
}

/// Result type for chat operations; uses [`ChatError`].
pub type Result<T> = std::result::Result<T, ChatError>;
