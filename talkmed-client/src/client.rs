//! HTTP client for the TalkMED search endpoint

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info, instrument, warn};

use crate::config::{ClientConfig, SEARCH_ENDPOINT};
use crate::error::{Result, TalkMedError};
use crate::query::SearchQuery;
use crate::responses::SearchResponse;

/// Source of raw search responses
///
/// [`TalkMedClient`] is the production implementation; the orchestrator only depends on
/// this trait so that it can be driven by an in-memory provider.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Run one search and return the provider's envelope as-is
    ///
    /// The envelope's own status code is not interpreted here; see
    /// [`normalize`](crate::normalize).
    async fn search(&self, query: &SearchQuery) -> Result<SearchResponse>;
}

/// Where the client sends its requests
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiInfo {
    pub base_url: String,
    pub endpoint: String,
}

/// Client for the TalkMED search API
#[derive(Clone)]
pub struct TalkMedClient {
    client: Client,
    base_url: String,
}

impl TalkMedClient {
    /// Create a client with default configuration
    ///
    /// # Example
    ///
    /// ```no_run
    /// use talkmed_client::{ContentType, SearchProvider, SearchQuery, TalkMedClient};
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let client = TalkMedClient::new()?;
    ///     let query = SearchQuery::new("diabetes", ContentType::Course, 1)?;
    ///     let response = client.search(&query).await?;
    ///     println!("status code: {}", response.code);
    ///     Ok(())
    /// }
    /// ```
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::new())
    }

    /// Create a client with custom configuration
    ///
    /// # Errors
    ///
    /// * `TalkMedError::Transport` - If the underlying HTTP client cannot be built
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.effective_user_agent())
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: config.effective_base_url().to_string(),
        })
    }

    pub fn api_info(&self) -> ApiInfo {
        ApiInfo {
            base_url: self.base_url.clone(),
            endpoint: SEARCH_ENDPOINT.to_string(),
        }
    }

    /// Probe the endpoint with a throwaway search
    ///
    /// Returns `false` instead of an error so callers can report reachability directly.
    pub async fn test_connection(&self) -> bool {
        let probe = match SearchQuery::new("test", Default::default(), 1) {
            Ok(query) => query,
            Err(_) => return false,
        };
        match self.search(&probe).await {
            Ok(response) if response.is_success() => true,
            Ok(response) => {
                warn!(code = response.code, "Connection test returned an error code");
                false
            }
            Err(e) => {
                warn!(error = %e, "Connection test failed");
                false
            }
        }
    }

    fn build_url(&self, query: &SearchQuery) -> String {
        let params: Vec<String> = query
            .to_params()
            .into_iter()
            .map(|(key, value)| format!("{}={}", key, urlencoding::encode(&value)))
            .collect();
        format!("{}{}?{}", self.base_url, SEARCH_ENDPOINT, params.join("&"))
    }
}

#[async_trait]
impl SearchProvider for TalkMedClient {
    #[instrument(skip(self), fields(keyword = %query.keyword(), content_type = %query.content_type(), page = query.page()))]
    async fn search(&self, query: &SearchQuery) -> Result<SearchResponse> {
        let url = self.build_url(query);
        info!("Searching TalkMED");
        debug!(url = %url, "Making search API request");

        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "Search request failed");
            return Err(TalkMedError::Provider {
                status: status.as_u16(),
                message: status
                    .canonical_reason()
                    .unwrap_or("Unknown error")
                    .to_string(),
            });
        }

        let body = response.text().await?;
        let parsed: SearchResponse = serde_json::from_str(&body)?;
        debug!(code = parsed.code, "Received search response");
        Ok(parsed)
    }
}
