//! Search orchestration
//!
//! Both entry points share [`SearchOrchestrator::search`], which validates the options,
//! calls the provider and normalizes the answer. They differ only in what they do with
//! the outcome:
//!
//! * [`SearchOrchestrator::perform_search`] writes human-readable output and optionally
//!   starts an [`InteractiveSession`]. Failures are reported and returned so that the
//!   binary can pick the exit code.
//! * [`SearchOrchestrator::perform_search_for_mcp`] writes nothing and always returns a
//!   [`StructuredResult`] envelope, so a long-lived server survives any single query.

use std::io::Write;

use serde::Serialize;
use tokio::io::AsyncBufRead;
use tracing::{debug, info, instrument, warn};

use crate::client::SearchProvider;
use crate::error::Result;
use crate::format::{render_failure, render_no_results, render_search_banner, render_summary};
use crate::query::{ContentType, SearchQuery, coerce_page};
use crate::session::InteractiveSession;
use crate::summary::{ResultSummary, normalize};

/// Options as received from a caller, before coercion
#[derive(Debug, Clone, Default)]
pub struct SearchOptions {
    /// `all`, `course` or `live`; anything else falls back to `all`
    pub content_type: Option<String>,
    /// Positive integer; anything else falls back to 1
    pub page: Option<String>,
    pub interactive: bool,
}

impl SearchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn with_page(mut self, page: impl ToString) -> Self {
        self.page = Some(page.to_string());
        self
    }

    pub fn interactive(mut self, interactive: bool) -> Self {
        self.interactive = interactive;
        self
    }

    fn effective_content_type(&self) -> ContentType {
        self.content_type
            .as_deref()
            .map(ContentType::coerce)
            .unwrap_or_default()
    }

    fn effective_page(&self) -> u32 {
        self.page.as_deref().map(coerce_page).unwrap_or(1)
    }
}

/// Payload of a successful programmatic search
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResultData {
    /// Page that was asked for; the summary's own page is always 1
    pub requested_page: u32,
    #[serde(flatten)]
    pub summary: ResultSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// `{success, data}` / `{success: false, error}` envelope returned to MCP clients
#[derive(Debug, Clone, Serialize)]
pub struct StructuredResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<SearchResultData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl StructuredResult {
    pub fn ok(data: SearchResultData) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
        }
    }

    pub fn to_json_pretty(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|e| {
            format!("{{\n  \"success\": false,\n  \"error\": \"serialization failed: {e}\"\n}}")
        })
    }
}

/// Coordinates one search from raw options to rendered output
pub struct SearchOrchestrator<P> {
    provider: P,
}

impl<P: SearchProvider> SearchOrchestrator<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Coerce the options into a [`SearchQuery`]
    ///
    /// # Errors
    ///
    /// * `TalkMedError::Validation` - If the keyword is empty
    pub fn build_query(keyword: &str, options: &SearchOptions) -> Result<SearchQuery> {
        SearchQuery::new(
            keyword,
            options.effective_content_type(),
            options.effective_page(),
        )
    }

    /// Call the provider and normalize its answer; never writes output
    #[instrument(skip(self), fields(keyword = %query.keyword()))]
    pub async fn search(&self, query: &SearchQuery) -> Result<ResultSummary> {
        let response = self.provider.search(query).await?;
        let summary = normalize(response, query.keyword(), query.content_type())?;
        info!(
            courses = summary.courses().len(),
            lives = summary.lives().len(),
            has_more = summary.pagination().has_more,
            "Search completed"
        );
        Ok(summary)
    }

    /// Command-line flow: banner, search, rendering and the optional interactive loop
    ///
    /// `input` is only read when `options.interactive` is set and there are results.
    /// Search failures are written to `err` with troubleshooting hints and then returned.
    pub async fn perform_search<R, W, E>(
        &self,
        keyword: &str,
        options: &SearchOptions,
        input: R,
        out: &mut W,
        err: &mut E,
    ) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
        E: Write,
    {
        let outcome = match Self::build_query(keyword, options) {
            Ok(query) => {
                out.write_all(render_search_banner(&query).as_bytes())?;
                out.flush()?;
                self.search(&query).await
            }
            Err(e) => Err(e),
        };

        let summary = match outcome {
            Ok(summary) => summary,
            Err(e) => {
                debug!(error = %e, "Search failed");
                err.write_all(render_failure(&e).as_bytes())?;
                return Err(e);
            }
        };

        if summary.is_empty() {
            out.write_all(render_no_results(summary.keyword(), summary.search_type()).as_bytes())?;
            return Ok(());
        }

        out.write_all(render_summary(&summary).as_bytes())?;

        if options.interactive {
            InteractiveSession::new(&summary).run(input, out).await?;
        }
        Ok(())
    }

    /// Programmatic flow for the MCP server: no output, no exit, always an envelope
    pub async fn perform_search_for_mcp(
        &self,
        keyword: &str,
        options: &SearchOptions,
    ) -> StructuredResult {
        let query = match Self::build_query(keyword, options) {
            Ok(query) => query,
            Err(e) => return StructuredResult::failure(e.to_string()),
        };

        match self.search(&query).await {
            Ok(summary) => {
                let message = summary
                    .is_empty()
                    .then(|| format!("No results found for \"{}\"", summary.keyword()));
                StructuredResult::ok(SearchResultData {
                    requested_page: query.page(),
                    summary,
                    message,
                })
            }
            Err(e) => {
                warn!(error = %e, "Search failed");
                StructuredResult::failure(e.to_string())
            }
        }
    }
}
