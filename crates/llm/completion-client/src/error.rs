//! Completion call errors.

use chat_core::ChatError;
use thiserror::Error;

/// Why a completion call failed.
#[derive(Error, Debug)]
pub enum CompletionError {
    /// Upstream answered 429.
    #[error("rate limited by completion API: {0}")]
    RateLimited(String),

    /// Our timeout elapsed, or upstream answered 504.
    #[error("completion API timed out: {0}")]
    Timeout(String),

    /// Any other non-2xx status.
    #[error("completion API returned {status}: {body}")]
    Status { status: u16, body: String },

    /// Connection, TLS or other transport failure.
    #[error("failed to reach completion API: {0}")]
    Transport(String),

    /// 2xx with a body that is not the expected JSON.
    #[error("failed to parse completion response: {0}")]
    MalformedBody(String),

    /// 2xx JSON without any choices.
    #[error("No response choices in API response")]
    EmptyChoices,
}

impl CompletionError {
    pub(crate) fn from_reqwest(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            CompletionError::Timeout(e.to_string())
        } else if e.is_decode() {
            CompletionError::MalformedBody(e.to_string())
        } else {
            CompletionError::Transport(e.to_string())
        }
    }
}

impl From<CompletionError> for ChatError {
    fn from(e: CompletionError) -> Self {
        match e {
            CompletionError::RateLimited(detail) => ChatError::UpstreamRateLimited(detail),
            CompletionError::Timeout(detail) => ChatError::UpstreamTimeout(detail),
            CompletionError::Status { status, body } => ChatError::Upstream {
                status: Some(status),
                detail: body,
            },
            CompletionError::Transport(detail) => ChatError::Upstream {
                status: None,
                detail,
            },
            CompletionError::MalformedBody(detail) => ChatError::Upstream {
                status: None,
                detail: format!("Failed to parse API response: {}", detail),
            },
            CompletionError::EmptyChoices => ChatError::Upstream {
                status: None,
                detail: "No response choices in API response".to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_maps_to_chat_error_statuses() {
        let cases: Vec<(CompletionError, u16)> = vec![
            (CompletionError::RateLimited("slow down".into()), 429),
            (CompletionError::Timeout("30s".into()), 504),
            (
                CompletionError::Status {
                    status: 500,
                    body: "oops".into(),
                },
                500,
            ),
            (CompletionError::Transport("refused".into()), 500),
            (CompletionError::MalformedBody("eof".into()), 500),
            (CompletionError::EmptyChoices, 500),
        ];
        for (err, status) in cases {
            let chat: ChatError = err.into();
            assert_eq!(chat.status_code(), status);
        }
    }

    #[test]
    fn test_status_detail_reaches_client_message() {
        let chat: ChatError = CompletionError::Status {
            status: 503,
            body: "overloaded".into(),
        }
        .into();
        assert_eq!(chat.client_message(), "API Error: 503 - overloaded");
    }
}
