//! Tests for [`web_search::SearchAugmenter`] with a counting stub and with [`SerpApiClient`]
//! against a mockito server.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use mockito::Matcher;
use web_search::{
    SearchAugmenter, SearchError, SearchProvider, SearchResult, SerpApiClient, SerpApiConfig,
    CONTEXT_LABEL,
};

struct CountingProvider {
    calls: AtomicUsize,
    snippets: Vec<&'static str>,
}

impl CountingProvider {
    fn new(snippets: Vec<&'static str>) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            snippets,
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SearchProvider for CountingProvider {
    async fn search(&self, _query: &str, num: usize) -> Result<Vec<SearchResult>, SearchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .snippets
            .iter()
            .take(num)
            .map(|s| SearchResult {
                snippet: Some(s.to_string()),
                ..Default::default()
            })
            .collect())
    }
}

struct FailingProvider;

#[async_trait]
impl SearchProvider for FailingProvider {
    async fn search(&self, _query: &str, _num: usize) -> Result<Vec<SearchResult>, SearchError> {
        Err(SearchError::Timeout)
    }
}

/// **Test: No trigger keyword means no provider call.**
///
/// **Expected:** `None`, call count 0.
#[tokio::test]
async fn no_keyword_makes_no_call() {
    let provider = CountingProvider::new(vec!["a", "b", "c"]);
    let augmenter = SearchAugmenter::new(provider.clone());

    assert_eq!(augmenter.maybe_augment("tell me a joke").await, None);
    assert_eq!(provider.calls(), 0);
}

/// **Test: Trigger keyword with three snippets.**
///
/// **Expected:** label prefix, all three snippets joined by a space, one call.
#[tokio::test]
async fn keyword_joins_three_snippets() {
    let provider = CountingProvider::new(vec!["Sunny in Paris.", "High of 24C.", "Light wind."]);
    let augmenter = SearchAugmenter::new(provider.clone());

    let context = augmenter
        .maybe_augment("what is the weather in Paris")
        .await
        .unwrap();

    assert_eq!(
        context,
        format!("{}Sunny in Paris. High of 24C. Light wind.", CONTEXT_LABEL)
    );
    assert_eq!(provider.calls(), 1);
}

/// **Test: Provider errors degrade to no augmentation.**
#[tokio::test]
async fn provider_error_is_swallowed() {
    let augmenter = SearchAugmenter::new(Arc::new(FailingProvider));
    assert_eq!(augmenter.maybe_augment("latest news").await, None);
}

/// **Test: Empty or blank snippets produce no context.**
#[tokio::test]
async fn blank_snippets_produce_none() {
    let provider = CountingProvider::new(vec!["  ", ""]);
    let augmenter = SearchAugmenter::new(provider.clone());

    assert_eq!(augmenter.maybe_augment("who won").await, None);
    assert_eq!(provider.calls(), 1);
}

fn serpapi(url: String) -> SerpApiClient {
    SerpApiClient::new(SerpApiConfig {
        url: format!("{}/search", url),
        api_key: "search-key".to_string(),
        engine: "google".to_string(),
        timeout: Duration::from_secs(5),
    })
    .unwrap()
}

/// **Test: SerpApi client sends q/api_key/num/engine and reads organic_results snippets.**
#[tokio::test]
async fn serpapi_end_to_end() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/search")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("q".into(), "who is the president".into()),
            Matcher::UrlEncoded("api_key".into(), "search-key".into()),
            Matcher::UrlEncoded("num".into(), "3".into()),
            Matcher::UrlEncoded("engine".into(), "google".into()),
        ]))
        .match_header("accept", "application/json")
        .with_status(200)
        .with_body(
            r#"{"organic_results":[
                {"title":"One","snippet":"first snippet"},
                {"title":"Two"},
                {"title":"Three","snippet":" third snippet "},
                {"title":"Four","snippet":"fourth snippet"}
            ]}"#,
        )
        .expect(1)
        .create_async()
        .await;

    let augmenter = SearchAugmenter::new(Arc::new(serpapi(server.url())));
    let context = augmenter.maybe_augment("who is the president").await.unwrap();

    assert_eq!(context, format!("{}first snippet third snippet", CONTEXT_LABEL));
    mock.assert_async().await;
}

/// **Test: Non-200, 429 and malformed bodies from the search API all yield `None`.**
#[tokio::test]
async fn serpapi_failures_yield_none() {
    for (status, body) in [(500, "boom"), (429, "slow down"), (200, "not json")] {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/search")
            .match_query(Matcher::Any)
            .with_status(status)
            .with_body(body)
            .create_async()
            .await;

        let augmenter = SearchAugmenter::new(Arc::new(serpapi(server.url())));
        assert_eq!(augmenter.maybe_augment("current price of gold").await, None);
    }
}

/// **Test: The raw client classifies 429 as `RateLimited`.**
#[tokio::test]
async fn serpapi_classifies_rate_limit() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/search")
        .match_query(Matcher::Any)
        .with_status(429)
        .create_async()
        .await;

    let err = serpapi(server.url()).search("q", 3).await.unwrap_err();
    assert!(matches!(err, SearchError::RateLimited));
}

/// **Test: Transport errors never carry the search API key.**
///
/// **Setup:** Client pointed at a port nothing listens on.
/// **Expected:** `Request` error whose text and debug form omit the key.
#[tokio::test]
async fn serpapi_transport_error_hides_api_key() {
    let client = SerpApiClient::new(SerpApiConfig {
        url: "http://127.0.0.1:1/search".to_string(),
        api_key: "SECRETKEY0123456789".to_string(),
        engine: "google".to_string(),
        timeout: Duration::from_secs(5),
    })
    .unwrap();

    let err = client.search("who won", 3).await.unwrap_err();

    assert!(matches!(err, SearchError::Request(_)), "got {:?}", err);
    assert!(!err.to_string().contains("SECRETKEY0123456789"));
    assert!(!format!("{:?}", err).contains("SECRETKEY0123456789"));
}
