//! Keyword-triggered search augmentation.

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::client::SearchProvider;
use crate::error::SearchError;

/// Lowercase substrings that make a query worth a search.
pub const SEARCH_KEYWORDS: &[&str] = &[
    "who", "what", "when", "where", "how", "why", "which", "current", "latest", "news", "weather",
    "price", "cost",
];

/// Result cap sent to the provider and snippet cap in the context string.
pub const MAX_SNIPPETS: usize = 3;

/// Prefix of every context string.
pub const CONTEXT_LABEL: &str = "Context from web search:\n";

/// True when the lowercased query contains any of [`SEARCH_KEYWORDS`].
pub fn should_search(query: &str) -> bool {
    let lower = query.to_lowercase();
    SEARCH_KEYWORDS.iter().any(|k| lower.contains(k))
}

/// Wraps a [`SearchProvider`] and turns its results into optional context.
#[derive(Clone)]
pub struct SearchAugmenter {
    provider: Arc<dyn SearchProvider>,
}

impl SearchAugmenter {
    pub fn new(provider: Arc<dyn SearchProvider>) -> Self {
        Self { provider }
    }

    /// Returns `Some(context)` when the query triggers a search and at least one non-empty
    /// snippet comes back. Never fails; provider errors are logged and dropped.
    pub async fn maybe_augment(&self, query: &str) -> Option<String> {
        if !should_search(query) {
            debug!("no search keyword in message, skipping web search");
            return None;
        }
        info!("Question might benefit from web search");

        let results = match self.provider.search(query, MAX_SNIPPETS).await {
            Ok(results) => results,
            Err(e) => {
                log_search_error(&e);
                return None;
            }
        };

        let snippets: Vec<&str> = results
            .iter()
            .take(MAX_SNIPPETS)
            .filter_map(|r| r.snippet.as_deref())
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect();

        if snippets.is_empty() {
            debug!("search returned no usable snippets");
            return None;
        }

        debug!(snippet_count = snippets.len(), "web search found relevant information");
        Some(format!("{}{}", CONTEXT_LABEL, snippets.join(" ")))
    }
}

fn log_search_error(e: &SearchError) {
    match e {
        SearchError::Timeout | SearchError::RateLimited => warn!(error = %e, "web search skipped"),
        _ => error!(error = %e, "web search failed"),
    }
}
