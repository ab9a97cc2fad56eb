//! Normalized search results
//!
//! [`normalize`] turns a raw [`SearchResponse`] into a [`ResultSummary`], the immutable
//! snapshot that the formatter, the interactive session and the MCP envelope all read from.

use serde::Serialize;
use tracing::debug;

use crate::error::{Result, TalkMedError};
use crate::query::ContentType;
use crate::responses::{RawCourse, RawLive, SearchResponse};

/// Whether a course is sold or given away
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceKind {
    Free,
    Paid,
}

impl PriceKind {
    /// Provider encoding: `price_type == 0` means free
    pub fn from_code(code: i64) -> Self {
        if code == 0 {
            PriceKind::Free
        } else {
            PriceKind::Paid
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Price {
    pub amount: f64,
    pub original_amount: f64,
    pub kind: PriceKind,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: i64,
    pub title: String,
    pub price: Price,
    pub learner_count: u64,
    pub course_count: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveSession {
    pub id: i64,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    pub description: String,
    pub start_at: String,
    pub end_at: String,
    pub status: i64,
    pub status_label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// One search hit, borrowed from a [`ResultSummary`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResultItem<'a> {
    Course(&'a Course),
    Live(&'a LiveSession),
}

impl<'a> ResultItem<'a> {
    pub fn id(&self) -> i64 {
        match self {
            ResultItem::Course(course) => course.id,
            ResultItem::Live(live) => live.id,
        }
    }

    pub fn title(&self) -> &'a str {
        match self {
            ResultItem::Course(course) => &course.title,
            ResultItem::Live(live) => &live.title,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    /// Always 1: the provider does not report which page it served
    pub current_page: u32,
    /// Taken from the course collection only; lives carry no such flag
    pub has_more: bool,
    pub total_displayed: usize,
}

/// Immutable snapshot of one search
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultSummary {
    keyword: String,
    search_type: ContentType,
    pagination: Pagination,
    courses: Vec<Course>,
    lives: Vec<LiveSession>,
}

impl ResultSummary {
    pub fn new(
        keyword: impl Into<String>,
        search_type: ContentType,
        has_more: bool,
        courses: Vec<Course>,
        lives: Vec<LiveSession>,
    ) -> Self {
        let pagination = Pagination {
            current_page: 1,
            has_more,
            total_displayed: courses.len() + lives.len(),
        };
        Self {
            keyword: keyword.into(),
            search_type,
            pagination,
            courses,
            lives,
        }
    }

    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    pub fn search_type(&self) -> ContentType {
        self.search_type
    }

    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    pub fn lives(&self) -> &[LiveSession] {
        &self.lives
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty() && self.lives.is_empty()
    }

    /// Resolve an id against courses first, then lives
    ///
    /// Ids are only unique per collection, so a course shadows a live session with the same id.
    pub fn find(&self, id: i64) -> Option<ResultItem<'_>> {
        self.courses
            .iter()
            .find(|course| course.id == id)
            .map(ResultItem::Course)
            .or_else(|| {
                self.lives
                    .iter()
                    .find(|live| live.id == id)
                    .map(ResultItem::Live)
            })
    }
}

/// Build a [`ResultSummary`] from a provider response
///
/// # Errors
///
/// * `TalkMedError::MalformedResponse` - If the response carries a non-zero status code
pub fn normalize(
    response: SearchResponse,
    keyword: &str,
    requested_type: ContentType,
) -> Result<ResultSummary> {
    if !response.is_success() {
        let detail = response
            .message
            .as_deref()
            .filter(|m| !m.is_empty())
            .map(|m| format!(": {m}"))
            .unwrap_or_default();
        return Err(TalkMedError::MalformedResponse(format!(
            "provider returned status code {}{}",
            response.code, detail
        )));
    }

    let (courses, has_more) = match response.data.course {
        Some(collection) => (
            collection.items.into_iter().map(Course::from).collect(),
            collection.has_more,
        ),
        None => (Vec::new(), false),
    };
    let lives: Vec<LiveSession> = response
        .data
        .live
        .map(|collection| collection.items.into_iter().map(LiveSession::from).collect())
        .unwrap_or_default();

    debug!(
        keyword,
        courses = courses.len(),
        lives = lives.len(),
        has_more,
        "Normalized search response"
    );

    Ok(ResultSummary::new(
        keyword,
        requested_type,
        has_more,
        courses,
        lives,
    ))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn count(value: f64) -> u64 {
    if value.is_finite() && value > 0.0 {
        value as u64
    } else {
        0
    }
}

impl From<RawCourse> for Course {
    fn from(raw: RawCourse) -> Self {
        Self {
            id: raw.id,
            title: raw.title,
            price: Price {
                amount: raw.price,
                original_amount: raw.original_price,
                kind: PriceKind::from_code(raw.price_type as i64),
            },
            learner_count: count(raw.learn_count_show),
            course_count: count(raw.course_count),
            tag: non_empty(raw.tag_name),
        }
    }
}

impl From<RawLive> for LiveSession {
    fn from(raw: RawLive) -> Self {
        Self {
            id: raw.id,
            title: raw.title,
            subtitle: non_empty(raw.sub_title),
            description: raw.des.unwrap_or_default(),
            start_at: raw.start_at,
            end_at: raw.end_at,
            status: raw.live_status as i64,
            status_label: raw.live_status_text.unwrap_or_default(),
            tag: non_empty(raw.tag),
            url: non_empty(raw.url),
        }
    }
}
