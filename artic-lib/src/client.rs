//! Main ArticClient

use std::sync::Arc;
use std::time::Duration;

use log::debug;
use reqwest::Client;
use url::Url;

use crate::api::query::Page;
use crate::api::query::PageIndex;
use crate::api::query::PageQuery;
use crate::error::ApiError;
use crate::error::Error;
use crate::model::ArtworksResponse;

/// Client for the paginated artworks endpoint.
///
/// This client is cheap to clone (uses `Arc` internally) and can be moved
/// into spawned fetch tasks.
///
/// # Example
///
/// ```ignore
/// use artic_lib::ArticClient;
/// use artic_lib::api::query::PageIndex;
///
/// let client = ArticClient::builder()
///     .endpoint("https://api.artic.edu/api/v1/artworks")
///     .build()?;
///
/// let page = client.fetch_page(PageIndex::new(0)).await?;
/// ```
#[derive(Clone)]
pub struct ArticClient {
    inner: Arc<ArticClientInner>,
}

struct ArticClientInner {
    endpoint: Url,
    query: PageQuery,
    http_client: Client,
    timeout: Option<Duration>,
}

impl ArticClient {
    /// The public Art Institute of Chicago artworks listing.
    pub const DEFAULT_ENDPOINT: &'static str = "https://api.artic.edu/api/v1/artworks";

    /// Creates a client for [`ArticClient::DEFAULT_ENDPOINT`] with default settings.
    pub fn new() -> Result<Self, ApiError> {
        Self::builder().endpoint(Self::DEFAULT_ENDPOINT).build()
    }

    /// Creates a new builder for constructing a client.
    pub fn builder() -> ArticClientBuilder<Missing> {
        ArticClientBuilder::new()
    }

    /// Returns the endpoint pages are requested from.
    pub fn endpoint(&self) -> &Url {
        &self.inner.endpoint
    }

    /// Returns the URL requested for a zero-based page index.
    pub fn page_url(&self, index: PageIndex) -> Url {
        self.inner.query.url(&self.inner.endpoint, index)
    }

    /// Fetches one page of artworks.
    ///
    /// The zero-based `index` is sent as the one-based `page` parameter.
    /// Network errors, non-2xx responses and bodies without a `data` array
    /// all fail the call; nothing is retried.
    pub async fn fetch_page(&self, index: PageIndex) -> Result<Page, Error> {
        let url = self.page_url(index);
        debug!("GET {}", url);

        let mut request = self.inner.http_client.get(url);
        if let Some(timeout) = self.inner.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await.map_err(|e| self.send_error(e))?;
        let status = response.status();
        let body = response.text().await.map_err(|e| self.send_error(e))?;

        if !status.is_success() {
            let message = if body.is_empty() {
                status.canonical_reason().unwrap_or_default().to_string()
            } else {
                body
            };
            return Err(ApiError::http(status.as_u16(), message).into());
        }

        let parsed: ArtworksResponse = serde_json::from_str(&body)
            .map_err(|e| ApiError::parse_with_body(e.to_string(), body.clone()))?;

        if let Some(pagination) = &parsed.pagination {
            debug!(
                "page {} of {:?} ({} rows, limit {:?}, total {:?})",
                index.page_number(),
                pagination.total_pages,
                parsed.data.len(),
                pagination.limit,
                pagination.total
            );
        }

        let total = parsed.total();
        let page = Page::new(index, parsed.data);
        Ok(match total {
            Some(total) => page.with_total_count(total),
            None => page,
        })
    }

    fn send_error(&self, error: reqwest::Error) -> ApiError {
        match self.inner.timeout {
            Some(timeout) if error.is_timeout() => ApiError::Timeout(timeout),
            _ => ApiError::Network(error),
        }
    }
}

impl std::fmt::Debug for ArticClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArticClient")
            .field("endpoint", &self.inner.endpoint.as_str())
            .field("query", &self.inner.query)
            .field("timeout", &self.inner.timeout)
            .finish()
    }
}

// =============================================================================
// Typestate Builder
// =============================================================================

/// Marker type for missing required builder fields.
pub struct Missing;

/// Marker type for set builder fields.
pub struct Set<T>(T);

/// Builder for constructing an [`ArticClient`].
///
/// The endpoint is required and checked at compile time; its syntax is
/// checked by [`ArticClientBuilder::build`].
///
/// # Example
///
/// ```ignore
/// let client = ArticClient::builder()
///     .endpoint("https://api.artic.edu/api/v1/artworks")
///     .fields(["title", "date_start", "date_end"])
///     .timeout(Duration::from_secs(10))
///     .build()?;
/// ```
pub struct ArticClientBuilder<Endpoint> {
    endpoint: Endpoint,
    query: PageQuery,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    http_client: Option<Client>,
}

impl ArticClientBuilder<Missing> {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            endpoint: Missing,
            query: PageQuery::default(),
            timeout: None,
            connect_timeout: None,
            http_client: None,
        }
    }

    /// Sets the endpoint URL.
    pub fn endpoint(self, endpoint: impl Into<String>) -> ArticClientBuilder<Set<String>> {
        ArticClientBuilder {
            endpoint: Set(endpoint.into()),
            query: self.query,
            timeout: self.timeout,
            connect_timeout: self.connect_timeout,
            http_client: self.http_client,
        }
    }
}

impl Default for ArticClientBuilder<Missing> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> ArticClientBuilder<E> {
    /// Sends `fields` with every request.
    pub fn fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.query.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the request timeout.
    ///
    /// Unset by default: a hung request simply never resolves.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the connection timeout.
    ///
    /// This is applied when building the HTTP client.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Sets a custom HTTP client.
    ///
    /// If not set, a default client will be created.
    pub fn http_client(mut self, client: Client) -> Self {
        self.http_client = Some(client);
        self
    }
}

impl ArticClientBuilder<Set<String>> {
    /// Builds the [`ArticClient`].
    pub fn build(self) -> Result<ArticClient, ApiError> {
        let endpoint =
            Url::parse(&self.endpoint.0).map_err(|e| ApiError::InvalidUrl(format!("{}: {}", self.endpoint.0, e)))?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(ApiError::InvalidUrl(format!(
                "{}: unsupported scheme",
                self.endpoint.0
            )));
        }

        let http_client = match self.http_client {
            Some(client) => client,
            None => {
                let mut builder = Client::builder();
                if let Some(timeout) = self.connect_timeout {
                    builder = builder.connect_timeout(timeout);
                }
                builder.build()?
            }
        };

        Ok(ArticClient {
            inner: Arc::new(ArticClientInner {
                endpoint,
                query: self.query,
                http_client,
                timeout: self.timeout,
            }),
        })
    }
}
