//! Plain-text rendering of search results
//!
//! Every function here is pure: it takes borrowed data and returns a `String`.
//! Nothing in this module fails; fields that are missing or unparsable are skipped
//! or shown verbatim.

use std::fmt::Write;
use std::io::IsTerminal;

use chrono::{DateTime, NaiveDateTime};
use crossterm::style::Stylize;

use crate::error::TalkMedError;
use crate::query::{ContentType, SearchQuery};
use crate::summary::{Course, LiveSession, PriceKind, ResultItem, ResultSummary};

/// Maximum number of characters of a live description shown in the result list
pub const DESCRIPTION_PREVIEW_CHARS: usize = 100;

const WIDE_RULE: usize = 80;
const NARROW_RULE: usize = 60;

const TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
];

fn rule(c: char, width: usize) -> String {
    c.to_string().repeat(width)
}

/// Render the full result listing shown right after a search
pub fn render_summary(summary: &ResultSummary) -> String {
    let mut out = String::new();
    let pagination = summary.pagination();

    let _ = writeln!(out, "{}", rule('═', WIDE_RULE));
    let _ = writeln!(out, "Search results: \"{}\"", summary.keyword());
    let _ = writeln!(
        out,
        "Type: {} | Page: {}",
        summary.search_type().display_name(),
        pagination.current_page
    );
    let _ = writeln!(out, "{}", rule('═', WIDE_RULE));
    out.push('\n');

    if !summary.courses().is_empty() {
        out.push_str(&render_course_block(summary.courses()));
    }
    if !summary.lives().is_empty() {
        out.push_str(&render_live_block(summary.lives()));
    }

    let _ = writeln!(out, "{}", rule('─', WIDE_RULE));
    let _ = writeln!(out, "Total: {} results", pagination.total_displayed);
    if pagination.has_more {
        let _ = writeln!(out, "More results available, use --page to see the next page");
    }
    let _ = writeln!(out, "{}", rule('═', WIDE_RULE));
    out
}

fn render_course_block(courses: &[Course]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Courses ({} results)", courses.len());
    let _ = writeln!(out, "{}", rule('─', NARROW_RULE));

    for (index, course) in courses.iter().enumerate() {
        let _ = writeln!(out, "{}. {}", index + 1, course.title);
        let _ = writeln!(
            out,
            "   Price: {}",
            format_price(
                course.price.amount,
                course.price.original_amount,
                course.price.kind
            )
        );
        let _ = writeln!(
            out,
            "   Learners: {} | Courses: {}",
            course.learner_count, course.course_count
        );
        if let Some(ref tag) = course.tag {
            let _ = writeln!(out, "   Tag: {tag}");
        }
        let _ = writeln!(out, "   ID: {}", course.id);
        out.push('\n');
    }
    out
}

fn render_live_block(lives: &[LiveSession]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Live sessions ({} results)", lives.len());
    let _ = writeln!(out, "{}", rule('─', NARROW_RULE));

    for (index, live) in lives.iter().enumerate() {
        let _ = writeln!(out, "{}. {}", index + 1, live.title);
        if let Some(ref subtitle) = live.subtitle {
            let _ = writeln!(out, "   {subtitle}");
        }
        if !live.description.trim().is_empty() {
            let _ = writeln!(
                out,
                "   {}",
                truncate_chars(&live.description, DESCRIPTION_PREVIEW_CHARS)
            );
        }
        if !(live.start_at.is_empty() && live.end_at.is_empty()) {
            let _ = writeln!(
                out,
                "   Time: {}",
                format_time_range(&live.start_at, &live.end_at)
            );
        }
        if !live.status_label.is_empty() {
            let _ = writeln!(out, "   Status: {}", live.status_label);
        }
        if let Some(ref tag) = live.tag {
            let _ = writeln!(out, "   Tag: {tag}");
        }
        let _ = writeln!(out, "   ID: {}", live.id);
        out.push('\n');
    }
    out
}

/// Render the long-form view of a single item
pub fn render_detail(item: ResultItem<'_>) -> String {
    let (kind, description, status, url) = match item {
        ResultItem::Course(course) => (
            "Course",
            format!(
                "Price: {} | Learners: {} | Courses: {}",
                format_price(
                    course.price.amount,
                    course.price.original_amount,
                    course.price.kind
                ),
                course.learner_count,
                course.course_count
            ),
            Some(course.tag.clone().unwrap_or_else(|| "No tag".to_string())),
            None,
        ),
        ResultItem::Live(live) => {
            let description = if !live.description.trim().is_empty() {
                live.description.clone()
            } else if let Some(ref subtitle) = live.subtitle {
                subtitle.clone()
            } else {
                "No description".to_string()
            };
            let status = Some(live.status_label.clone()).filter(|s| !s.is_empty());
            ("Live session", description, status, live.url.clone())
        }
    };

    let mut out = String::new();
    let _ = writeln!(out, "{}", rule('═', WIDE_RULE));
    let _ = writeln!(out, "Details");
    let _ = writeln!(out, "{}", rule('═', WIDE_RULE));
    out.push('\n');
    let _ = writeln!(out, "Title: {}", item.title());
    let _ = writeln!(out, "Type: {kind}");
    let _ = writeln!(out, "ID: {}", item.id());
    let _ = writeln!(out, "Description: {description}");
    if let Some(status) = status {
        let _ = writeln!(out, "Status: {status}");
    }
    if let Some(url) = url {
        let _ = writeln!(out, "Link: {url}");
    }
    out.push('\n');
    let _ = writeln!(out, "{}", rule('═', WIDE_RULE));
    out
}

/// Format a course price
///
/// Free courses (by kind or by a zero price) render as `Free`. The original price is
/// appended, struck through, only when it is higher than the current price. The strike
/// is only drawn when stdout is a terminal and `NO_COLOR` is unset.
pub fn format_price(price: f64, original_price: f64, kind: PriceKind) -> String {
    format_price_styled(price, original_price, kind, styling_enabled())
}

/// [`format_price`] with explicit control over ANSI styling
pub fn format_price_styled(
    price: f64,
    original_price: f64,
    kind: PriceKind,
    styled: bool,
) -> String {
    if kind == PriceKind::Free || price == 0.0 {
        return "Free".to_string();
    }

    let mut rendered = format!("¥{price}");
    if original_price > price {
        let original = format!("¥{original_price}");
        rendered.push(' ');
        if styled {
            rendered.push_str(&original.crossed_out().to_string());
        } else {
            rendered.push_str(&original);
        }
    }
    rendered
}

fn styling_enabled() -> bool {
    std::env::var_os("NO_COLOR").is_none() && std::io::stdout().is_terminal()
}

/// Format a live session's schedule as `start ~ end`
///
/// If either timestamp cannot be parsed both raw values are returned joined by ` ~ `.
pub fn format_time_range(start: &str, end: &str) -> String {
    match (parse_timestamp(start), parse_timestamp(end)) {
        (Some(start), Some(end)) => format!(
            "{} ~ {}",
            start.format("%Y/%m/%d %H:%M"),
            end.format("%Y/%m/%d %H:%M")
        ),
        _ => format!("{start} ~ {end}"),
    }
}

fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.naive_local());
    }
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
}

/// Shorten `text` to at most `max` characters, appending `...` when cut
pub fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((byte_index, _)) => format!("{}...", &text[..byte_index]),
        None => text.to_string(),
    }
}

/// Banner printed before the request is sent
pub fn render_search_banner(query: &SearchQuery) -> String {
    format!(
        "\nSearch keyword: \"{}\"\nSearch type: {}\nPage: {}\n",
        query.keyword(),
        query.content_type().display_name(),
        query.page()
    )
}

/// Notice shown when the provider returned nothing
pub fn render_no_results(keyword: &str, content_type: ContentType) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "No results found for \"{keyword}\"");
    out.push('\n');
    let _ = writeln!(out, "Suggestions:");
    let _ = writeln!(out, "  - Try a different keyword");
    let _ = writeln!(out, "  - Check the spelling of the keyword");
    let _ = writeln!(out, "  - Use a more general search term");
    if content_type != ContentType::All {
        let _ = writeln!(out, "  - Search all content types (--type all)");
    }
    out
}

/// Diagnostics printed when the initial search fails
pub fn render_failure(error: &TalkMedError) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Search failed");
    out.push('\n');
    let _ = writeln!(out, "Error ({}): {error}", error.kind());
    out.push('\n');
    let _ = writeln!(out, "Troubleshooting:");
    let _ = writeln!(out, "  - Check your network connection");
    let _ = writeln!(out, "  - Make sure the TalkMED service is available");
    let _ = writeln!(out, "  - Try again later");
    out
}
