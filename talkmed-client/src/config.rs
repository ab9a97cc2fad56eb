//! Client configuration for the TalkMED search API

use std::time::Duration;

/// Production host of the TalkMED API portal
pub const DEFAULT_BASE_URL: &str = "https://apiportal.talkmed.com";

/// Path of the search endpoint, relative to the base URL
pub const SEARCH_ENDPOINT: &str = "/v1/pc/search";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Configuration for [`TalkMedClient`](crate::TalkMedClient)
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use talkmed_client::ClientConfig;
///
/// let config = ClientConfig::new()
///     .with_base_url("http://localhost:8080")
///     .with_timeout(Duration::from_secs(5));
///
/// assert_eq!(config.effective_base_url(), "http://localhost:8080");
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Overrides [`DEFAULT_BASE_URL`] (used by tests and staging deployments)
    pub base_url: Option<String>,
    /// Timeout applied to the whole request
    pub timeout: Duration,
    /// Overrides the default `TalkMED-Search-CLI/<version>` user agent
    pub user_agent: Option<String>,
}

impl ClientConfig {
    pub fn new() -> Self {
        Self {
            base_url: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: None,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Base URL without a trailing slash
    pub fn effective_base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .unwrap_or(DEFAULT_BASE_URL)
            .trim_end_matches('/')
    }

    pub fn effective_user_agent(&self) -> String {
        self.user_agent
            .clone()
            .unwrap_or_else(|| format!("TalkMED-Search-CLI/{}", env!("CARGO_PKG_VERSION")))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new()
    }
}
