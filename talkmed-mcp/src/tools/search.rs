//! Search tool for TalkMED MCP server

use rmcp::{handler::server::wrapper::Parameters, model::*, schemars};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use talkmed_client::{SearchOptions, StructuredResult};
use tracing::info;

/// Search request parameters
///
/// Arguments are taken leniently: numbers and strings are accepted for every field, and
/// values that cannot be used are coerced by the orchestrator instead of failing the call.
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SearchMedicalContentRequest {
    #[serde(deserialize_with = "lenient_keyword")]
    #[schemars(description = "Search keyword (e.g., 'diabetes', 'heart failure')")]
    pub keyword: String,

    #[serde(rename = "type", default, deserialize_with = "lenient_text")]
    #[schemars(
        description = "Content type: 'all' (courses and live sessions), 'course' or 'live'. Unknown values search all. Default: 'all'",
        extend("enum" = ["all", "course", "live"], "default" = "all")
    )]
    pub content_type: Option<String>,

    #[serde(default, deserialize_with = "lenient_text")]
    #[schemars(
        with = "Option<i64>",
        description = "Result page, starting at 1. Values below 1 or not a number are treated as 1. Default: 1",
        extend("minimum" = 1, "default" = 1)
    )]
    pub page: Option<String>,
}

impl SearchMedicalContentRequest {
    fn to_options(&self) -> SearchOptions {
        let mut options = SearchOptions::new();
        if let Some(ref content_type) = self.content_type {
            options = options.with_content_type(content_type.as_str());
        }
        if let Some(ref page) = self.page {
            options = options.with_page(page);
        }
        options
    }
}

/// Scalars in their string form; `null` becomes `None`
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => None,
        Some(Value::String(text)) => Some(text),
        Some(other) => Some(other.to_string()),
    })
}

/// Strings and numbers are kept; anything else becomes empty and fails validation later
fn lenient_keyword<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => text,
        Value::Number(number) => number.to_string(),
        _ => String::new(),
    })
}

/// Search TalkMED courses and live sessions
pub async fn search_medical_content(
    server: &super::TalkMedServer,
    Parameters(params): Parameters<SearchMedicalContentRequest>,
) -> Result<CallToolResult, ErrorData> {
    info!(
        keyword = %params.keyword,
        content_type = ?params.content_type,
        page = ?params.page,
        "Searching medical content"
    );

    let result = server
        .orchestrator
        .perform_search_for_mcp(&params.keyword, &params.to_options())
        .await;

    Ok(to_tool_result(&result))
}

/// Wrap the envelope as tool output, flagged as an error when the search failed
fn to_tool_result(result: &StructuredResult) -> CallToolResult {
    let content = vec![Content::text(result.to_json_pretty())];
    if result.success {
        CallToolResult::success(content)
    } else {
        CallToolResult::error(content)
    }
}
