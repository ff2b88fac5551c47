//! HTTP search endpoint client.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, warn};

use crate::state::{Category, SearchPage, SearchRequest};

/// Failure of a single search request.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// Transport failure: connect, timeout, or interrupted body.
    #[error("network error: {0}")]
    Network(String),
    /// Server answered with a non-success status.
    #[error("server returned HTTP {0}")]
    Status(u16),
    /// Body was not a valid search response.
    #[error("malformed search response: {0}")]
    Decode(String),
}

/// Backend able to answer paginated search requests.
///
/// Implementations must not assume earlier pages were fetched; every page is independent.
#[async_trait]
pub trait SearchApi: Send + Sync {
    /// Fetch one page of results for `request`.
    async fn search(&self, request: &SearchRequest) -> Result<SearchPage, SearchError>;
}

/// JSON body sent to the search endpoint.
#[derive(Serialize)]
struct WireRequest<'a> {
    /// Raw query text.
    query: &'a str,
    /// Collection to search.
    category: Category,
    /// One-based page.
    page: u32,
    /// Page size.
    limit: u32,
}

impl<'a> From<&'a SearchRequest> for WireRequest<'a> {
    fn from(request: &'a SearchRequest) -> Self {
        Self {
            query: &request.query.text,
            category: request.query.category,
            page: request.page,
            limit: request.limit,
        }
    }
}

/// [`SearchApi`] backed by `POST <url>` with a JSON body.
#[derive(Clone, Debug)]
pub struct HttpSearchApi {
    /// Pooled client.
    client: reqwest::Client,
    /// Full endpoint URL.
    url: String,
}

impl HttpSearchApi {
    /// What: Build a client for `url` with the given request timeout.
    ///
    /// # Errors
    /// - `SearchError::Network` when the HTTP client cannot be constructed (e.g. TLS backend failure).
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, SearchError> {
        let client = reqwest::Client::builder()
            .connect_timeout(timeout)
            .timeout(timeout)
            .user_agent(format!("typeahead/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| SearchError::Network(format!("failed to create HTTP client: {e}")))?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    /// Endpoint this client posts to.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl SearchApi for HttpSearchApi {
    async fn search(&self, request: &SearchRequest) -> Result<SearchPage, SearchError> {
        debug!(
            url = %self.url,
            query = %request.query.text,
            category = %request.query.category,
            page = request.page,
            sequence = request.sequence,
            "[Search] POST"
        );
        let response = self
            .client
            .post(&self.url)
            .json(&WireRequest::from(request))
            .send()
            .await
            .map_err(|e| SearchError::Network(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), sequence = request.sequence, "[Search] Non-success status");
            return Err(SearchError::Status(status.as_u16()));
        }
        let body = response
            .text()
            .await
            .map_err(|e| SearchError::Network(e.to_string()))?;
        decode_page(&body)
    }
}

/// What: Decode a response body into a [`SearchPage`].
///
/// # Errors
/// - `SearchError::Decode` when the body is not JSON or `results`/`total` have the wrong shape.
pub fn decode_page(body: &str) -> Result<SearchPage, SearchError> {
    serde_json::from_str(body).map_err(|e| SearchError::Decode(e.to_string()))
}
