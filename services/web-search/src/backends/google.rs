//! Google Custom Search backend
//!
//! Implements the SearchBackend trait against the Custom Search JSON API.
//! See: https://developers.google.com/custom-search/v1/reference/rest/v1/cse/list

use async_trait::async_trait;
use reqwest::{Client, StatusCode};

use super::SearchBackend;
use crate::error::{Result, SearchError};
use crate::types::{SearchResult, SearchResults};

/// Live Custom Search endpoint
pub const GOOGLE_URI: &str = "https://www.googleapis.com/customsearch/v1";

/// Google Custom Search backend
#[derive(Debug, Clone)]
pub struct GoogleSearchBackend {
    client: Client,
    key: String,
    engine_id: String,
    endpoint: Option<String>,
}

impl GoogleSearchBackend {
    /// Create a backend with the given API key and search engine id (`cx`)
    pub fn new(key: impl Into<String>, engine_id: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            key: key.into(),
            engine_id: engine_id.into(),
            endpoint: None,
        }
    }

    /// Use a caller-supplied HTTP client, e.g. one with a timeout
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    /// Send requests to `endpoint` instead of the live API
    ///
    /// Only tests should need this, to point the backend at a local server.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    pub fn endpoint(&self) -> &str {
        self.endpoint.as_deref().unwrap_or(GOOGLE_URI)
    }

    fn build_query<'a>(&'a self, term: &'a str) -> Result<wire::SearchQuery<'a>> {
        let term = term.trim();
        if term.is_empty() {
            return Err(SearchError::NoSearchTerm);
        }

        Ok(wire::SearchQuery {
            key: &self.key,
            engine_id: &self.engine_id,
            query: term,
        })
    }
}

#[async_trait]
impl SearchBackend for GoogleSearchBackend {
    fn name(&self) -> &str {
        "google"
    }

    async fn search(&self, term: &str) -> Result<SearchResults> {
        let query = self.build_query(term)?;

        tracing::debug!(term = query.query, endpoint = self.endpoint(), "Searching");

        let response = self
            .client
            .get(self.endpoint())
            .query(&query.params())
            .send()
            .await?;

        let status = response.status();
        tracing::debug!(status = status.as_u16(), "Search response received");

        match status {
            StatusCode::OK => {
                let body = response.bytes().await?;
                let payload: wire::SearchResponse = serde_json::from_slice(&body)?;
                Ok(payload.into())
            }
            StatusCode::BAD_REQUEST => Err(SearchError::InvalidConfiguration),
            other => Err(SearchError::UnexpectedStatus(other.as_u16())),
        }
    }
}

/// Custom Search request and response shapes
///
/// Nothing here leaves this module except through the `From` conversion.
mod wire {
    use serde::{Deserialize, Deserializer};

    use crate::types::{SearchResult, SearchResults};

    pub const REQUEST_KEY: &str = "key";
    pub const REQUEST_ENGINE_ID: &str = "cx";
    pub const REQUEST_QUERY: &str = "q";

    /// A validated outbound request
    pub struct SearchQuery<'a> {
        pub key: &'a str,
        pub engine_id: &'a str,
        pub query: &'a str,
    }

    impl<'a> SearchQuery<'a> {
        pub fn params(&self) -> [(&'static str, &'a str); 3] {
            [
                (REQUEST_KEY, self.key),
                (REQUEST_ENGINE_ID, self.engine_id),
                (REQUEST_QUERY, self.query),
            ]
        }
    }

    #[derive(Debug, Default, Deserialize)]
    pub struct SearchResponse {
        #[serde(default, deserialize_with = "null_as_default")]
        pub items: Vec<Item>,
    }

    #[derive(Debug, Default, Deserialize)]
    pub struct Item {
        #[serde(default, deserialize_with = "null_as_default")]
        pub title: String,
        #[serde(default, deserialize_with = "null_as_default")]
        pub link: String,
        #[serde(default, deserialize_with = "null_as_default")]
        pub snippet: String,
    }

    /// Treat an explicit `null` the same as a missing field
    fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: Default + Deserialize<'de>,
    {
        Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
    }

    impl From<Item> for SearchResult {
        fn from(item: Item) -> Self {
            SearchResult {
                title: item.title,
                link: item.link,
                snippet: item.snippet,
            }
        }
    }

    impl From<SearchResponse> for SearchResults {
        fn from(response: SearchResponse) -> Self {
            response.items.into_iter().map(SearchResult::from).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        extract::{Query, State},
        http::StatusCode as HttpStatus,
        routing::get,
        Router,
    };
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    type Requests = Arc<Mutex<Vec<HashMap<String, String>>>>;

    /// Stand-in for the provider: replies with a fixed status and body and
    /// records the query parameters of every request it sees.
    async fn spawn_provider(status: u16, body: &'static str) -> (String, Requests) {
        let requests: Requests = Arc::default();

        let app = Router::new()
            .route(
                "/",
                get(
                    move |State(requests): State<Requests>,
                          Query(params): Query<HashMap<String, String>>| async move {
                        requests.lock().unwrap().push(params);
                        (HttpStatus::from_u16(status).unwrap(), body)
                    },
                ),
            )
            .with_state(requests.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (format!("http://{}/", addr), requests)
    }

    fn backend(endpoint: &str) -> GoogleSearchBackend {
        GoogleSearchBackend::new("bbb", "aaa").with_endpoint(endpoint)
    }

    #[test]
    fn test_default_endpoint() {
        let backend = GoogleSearchBackend::new("key", "cx");
        assert_eq!(backend.endpoint(), GOOGLE_URI);
        assert_eq!(backend.name(), "google");
    }

    #[test]
    fn test_build_query_trims_term() {
        let backend = GoogleSearchBackend::new("bbb", "aaa");
        let query = backend.build_query("  mysql \n").unwrap();
        assert_eq!(
            query.params(),
            [("key", "bbb"), ("cx", "aaa"), ("q", "mysql")]
        );
    }

    #[tokio::test]
    async fn test_empty_term_never_reaches_provider() {
        let (endpoint, requests) = spawn_provider(200, "{}").await;
        let backend = backend(&endpoint);

        for term in ["", " ", "\t\n  "] {
            let err = backend.search(term).await.unwrap_err();
            assert!(matches!(err, SearchError::NoSearchTerm));
        }

        assert!(requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_request_format() {
        let (endpoint, requests) = spawn_provider(200, "{}").await;

        let results = backend(&endpoint).search("mysql").await.unwrap();
        assert!(results.is_empty());

        let requests = requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0]["key"], "bbb");
        assert_eq!(requests[0]["cx"], "aaa");
        assert_eq!(requests[0]["q"], "mysql");
    }

    #[tokio::test]
    async fn test_request_term_is_trimmed_and_encoded() {
        let (endpoint, requests) = spawn_provider(200, "{}").await;

        backend(&endpoint).search("  rust & go?  ").await.unwrap();

        let requests = requests.lock().unwrap();
        assert_eq!(requests[0]["q"], "rust & go?");
        assert_eq!(requests[0].len(), 3);
    }

    #[tokio::test]
    async fn test_response_parsing() {
        let body = r#"
{
    "kind": "customsearch#search",
    "items": [
        {"title": "aaa", "link": "http://aaa.com/", "snippet": "snip aaa", "displayLink": "aaa.com"},
        {"title": "bbb", "link": "http://bbb.com/", "snippet": "snip bbb"},
        {"title": "ccc", "link": "http://ccc.com/", "snippet": "snip ccc"}
    ]
}"#;
        let (endpoint, _) = spawn_provider(200, body).await;

        let results = backend(&endpoint).search("apples").await.unwrap();

        let expected: SearchResults = [
            ("aaa", "http://aaa.com/", "snip aaa"),
            ("bbb", "http://bbb.com/", "snip bbb"),
            ("ccc", "http://ccc.com/", "snip ccc"),
        ]
        .into_iter()
        .map(|(title, link, snippet)| SearchResult {
            title: title.to_string(),
            link: link.to_string(),
            snippet: snippet.to_string(),
        })
        .collect();
        assert_eq!(results, expected);
    }

    #[tokio::test]
    async fn test_missing_item_fields_default_to_empty() {
        let body = r#"{"items":[{"title":"only title"}]}"#;
        let (endpoint, _) = spawn_provider(200, body).await;

        let results = backend(&endpoint).search("apples").await.unwrap();

        assert_eq!(
            results.results,
            vec![SearchResult {
                title: "only title".to_string(),
                link: String::new(),
                snippet: String::new(),
            }]
        );
    }

    #[tokio::test]
    async fn test_empty_payloads() {
        for body in ["{}", r#"{"items": []}"#] {
            let (endpoint, _) = spawn_provider(200, body).await;
            let results = backend(&endpoint).search("apples").await.unwrap();
            assert_eq!(results, SearchResults::default());
        }
    }

    #[tokio::test]
    async fn test_single_item_payload() {
        let body = r#"{"items":[{"title":"aaa","link":"http://aaa.com/","snippet":"snip aaa"}]}"#;
        let (endpoint, _) = spawn_provider(200, body).await;

        let results = backend(&endpoint).search("mysql").await.unwrap();

        assert_eq!(
            results.results,
            vec![SearchResult {
                title: "aaa".to_string(),
                link: "http://aaa.com/".to_string(),
                snippet: "snip aaa".to_string(),
            }]
        );
    }

    #[tokio::test]
    async fn test_null_items_is_empty() {
        let (endpoint, _) = spawn_provider(200, r#"{"items": null}"#).await;

        let results = backend(&endpoint).search("apples").await.unwrap();

        assert_eq!(results, SearchResults::default());
    }

    #[tokio::test]
    async fn test_null_item_fields_default_to_empty() {
        let body = r#"{"items":[{"title":"a","link":null,"snippet":null},{"title":null}]}"#;
        let (endpoint, _) = spawn_provider(200, body).await;

        let results = backend(&endpoint).search("apples").await.unwrap();

        assert_eq!(
            results.results,
            vec![
                SearchResult {
                    title: "a".to_string(),
                    ..Default::default()
                },
                SearchResult::default(),
            ]
        );
    }

    #[tokio::test]
    async fn test_caller_supplied_client() {
        let (endpoint, requests) = spawn_provider(200, "{}").await;
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(5))
            .build()
            .unwrap();

        let results = backend(&endpoint)
            .with_client(client)
            .search("mysql")
            .await
            .unwrap();

        assert!(results.is_empty());
        assert_eq!(requests.lock().unwrap()[0]["q"], "mysql");
    }

    #[tokio::test]
    async fn test_http_400_is_invalid_configuration() {
        for body in ["", r#"{"items":[{"title":"ignored"}]}"#] {
            let (endpoint, requests) = spawn_provider(400, body).await;

            let err = backend(&endpoint).search("ccc").await.unwrap_err();

            assert!(err.is_invalid_configuration());
            assert_eq!(requests.lock().unwrap().len(), 1);
        }
    }

    #[tokio::test]
    async fn test_unexpected_status() {
        for status in [500, 403, 429, 201] {
            let (endpoint, _) = spawn_provider(status, "{}").await;

            let err = backend(&endpoint).search("ccc").await.unwrap_err();

            assert!(
                matches!(err, SearchError::UnexpectedStatus(s) if s == status),
                "status {status} gave {err:?}"
            );
        }
    }

    #[tokio::test]
    async fn test_malformed_payload_is_decode_error() {
        let (endpoint, _) = spawn_provider(200, "<html>not json</html>").await;

        let err = backend(&endpoint).search("ccc").await.unwrap_err();

        assert!(matches!(err, SearchError::Decode(_)));
    }

    #[tokio::test]
    async fn test_connection_failure_is_transport_error() {
        // Bind then drop to get a port nothing is listening on
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = backend(&format!("http://{}/", addr))
            .search("ccc")
            .await
            .unwrap_err();

        assert!(matches!(err, SearchError::Transport(_)));
    }

    #[tokio::test]
    async fn test_concurrent_searches_are_independent() {
        let (endpoint, requests) = spawn_provider(200, "{}").await;
        let backend = Arc::new(backend(&endpoint));

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let backend = backend.clone();
                tokio::spawn(async move { backend.search(&format!("term {i}")).await })
            })
            .collect();

        for handle in handles {
            assert!(handle.await.unwrap().unwrap().is_empty());
        }

        let mut terms: Vec<String> = requests
            .lock()
            .unwrap()
            .iter()
            .map(|params| params["q"].clone())
            .collect();
        terms.sort();
        let mut expected: Vec<String> = (0..8).map(|i| format!("term {i}")).collect();
        expected.sort();
        assert_eq!(terms, expected);
    }
}
