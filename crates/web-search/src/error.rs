//! Search errors. The augmenter logs and swallows all of them.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SearchError {
    #[error("search request timed out")]
    Timeout,

    #[error("search request failed: {0}")]
    Request(String),

    #[error("search API rate limit reached")]
    RateLimited,

    #[error("search failed with status {0}")]
    Status(u16),

    #[error("failed to parse search results: {0}")]
    Parse(String),
}

/// The request URL carries `api_key`, so it is stripped before the error is rendered.
impl From<reqwest::Error> for SearchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            SearchError::Timeout
        } else {
            SearchError::Request(e.without_url().to_string())
        }
    }
}
