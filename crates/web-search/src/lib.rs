//! # Web search
//!
//! Optional search context for a chat message.
//!
//! - [`SearchProvider`]: trait over the search collaborator; [`SerpApiClient`] implements it for a
//!   SerpApi-style `GET ?q=&api_key=&num=&engine=` endpoint.
//! - [`SearchAugmenter`]: decides by keyword whether a query is worth a search and turns up to
//!   three snippets into one context string. Every failure degrades to `None`.

mod augmenter;
mod client;
mod error;

pub use augmenter::{
    should_search, SearchAugmenter, CONTEXT_LABEL, MAX_SNIPPETS, SEARCH_KEYWORDS,
};
pub use client::{SearchProvider, SearchResult, SerpApiClient, SerpApiConfig, DEFAULT_SEARCH_URL};
pub use error::SearchError;
