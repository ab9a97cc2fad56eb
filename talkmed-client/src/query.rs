//! Search query value and option coercion

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{Result, TalkMedError};

/// Content-type filter accepted by the search endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    #[default]
    All,
    Course,
    Live,
}

impl ContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::All => "all",
            ContentType::Course => "course",
            ContentType::Live => "live",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ContentType::All => "All",
            ContentType::Course => "Courses",
            ContentType::Live => "Live sessions",
        }
    }

    /// Parse a user-supplied type, falling back to [`ContentType::All`] with a warning
    pub fn coerce(raw: &str) -> Self {
        match raw.parse() {
            Ok(content_type) => content_type,
            Err(_) => {
                warn!(value = %raw, "Invalid content type, using 'all'");
                ContentType::All
            }
        }
    }
}

impl FromStr for ContentType {
    type Err = TalkMedError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "all" => Ok(ContentType::All),
            "course" => Ok(ContentType::Course),
            "live" => Ok(ContentType::Live),
            other => Err(TalkMedError::Validation(format!(
                "unknown content type '{other}' (expected all, course or live)"
            ))),
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse a user-supplied page number; anything non-numeric or below 1 becomes 1
pub fn coerce_page(raw: &str) -> u32 {
    match raw.trim().parse::<i64>() {
        Ok(page) if page >= 1 => u32::try_from(page).unwrap_or(u32::MAX),
        _ => {
            warn!(value = %raw, "Invalid page number, using 1");
            1
        }
    }
}

/// A single validated search request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    keyword: String,
    content_type: ContentType,
    page: u32,
}

impl SearchQuery {
    /// Build a query; the keyword is trimmed and must not be empty, the page is clamped to 1
    pub fn new(keyword: &str, content_type: ContentType, page: u32) -> Result<Self> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return Err(TalkMedError::Validation(
                "keyword must not be empty".to_string(),
            ));
        }
        Ok(Self {
            keyword: keyword.to_string(),
            content_type,
            page: page.max(1),
        })
    }

    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    pub fn content_type(&self) -> ContentType {
        self.content_type
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    /// Query-string parameters sent to the provider
    ///
    /// `type` is only sent for a narrowing filter and `page` only beyond the first page.
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![("word", self.keyword.clone())];
        if self.content_type != ContentType::All {
            params.push(("type", self.content_type.as_str().to_string()));
        }
        if self.page > 1 {
            params.push(("page", self.page.to_string()));
        }
        params
    }
}
