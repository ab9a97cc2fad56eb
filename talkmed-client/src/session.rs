//! Interactive exploration of one fixed result set
//!
//! The session never mutates the [`ResultSummary`] it borrows; every command renders its
//! own view from the same snapshot, so the only state carried between commands is
//! whether the loop is still running.

use std::fmt::Write as _;
use std::io::Write;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::debug;

use crate::error::{Result, TalkMedError};
use crate::format::{format_price, render_detail};
use crate::summary::ResultSummary;

pub const PROMPT: &str = "Enter a command (help for options): ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Running,
    Terminated,
}

/// One parsed line of user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    List,
    /// Raw id argument, if one was given
    Detail(Option<String>),
    Courses,
    Lives,
    Stats,
    Exit,
    Empty,
    Unknown(String),
}

impl Command {
    /// Parse a line; the command word is case-insensitive and extra words are arguments
    pub fn parse(line: &str) -> Self {
        let mut tokens = line.split_whitespace();
        let Some(word) = tokens.next() else {
            return Command::Empty;
        };

        match word.to_lowercase().as_str() {
            "help" | "h" => Command::Help,
            "list" | "l" => Command::List,
            "detail" | "d" => Command::Detail(tokens.next().map(str::to_string)),
            "course" | "c" => Command::Courses,
            "live" | "v" => Command::Lives,
            "stats" | "s" => Command::Stats,
            "exit" | "quit" | "q" => Command::Exit,
            _ => Command::Unknown(word.to_string()),
        }
    }
}

/// REPL over a borrowed [`ResultSummary`]
pub struct InteractiveSession<'a> {
    summary: &'a ResultSummary,
    state: SessionState,
}

impl<'a> InteractiveSession<'a> {
    pub fn new(summary: &'a ResultSummary) -> Self {
        Self {
            summary,
            state: SessionState::Running,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Prompt, read and dispatch lines until an exit command or end of input
    ///
    /// # Errors
    ///
    /// * `TalkMedError::Io` - If reading input or writing the prompt fails. Failures while
    ///   executing a command, including lines that are not valid UTF-8, are reported to
    ///   `out` and do not end the loop.
    pub async fn run<R, W>(&mut self, mut input: R, out: &mut W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        writeln!(out, "\nInteractive mode enabled")?;
        writeln!(out, "Type \"help\" to list the available commands\n")?;

        let mut buf = Vec::new();
        while self.state == SessionState::Running {
            write!(out, "{PROMPT}")?;
            out.flush()?;

            buf.clear();
            if input.read_until(b'\n', &mut buf).await? == 0 {
                debug!("Input closed, leaving interactive mode");
                writeln!(out)?;
                self.state = SessionState::Terminated;
                break;
            }
            // Undecodable bytes become U+FFFD and fall through to the unknown-command path
            let line = String::from_utf8_lossy(&buf);
            self.handle_line(&line, out);
        }
        Ok(())
    }

    /// Dispatch a single line and return the resulting state
    ///
    /// This is the error boundary of the loop: whatever a command fails with is written to
    /// `out` and the session keeps running.
    pub fn handle_line<W: Write>(&mut self, line: &str, out: &mut W) -> SessionState {
        let command = Command::parse(line);
        debug!(?command, "Dispatching interactive command");

        match self.execute(command, out) {
            Ok(next) => self.state = next,
            Err(e) => {
                debug!(error = %e, "Interactive command failed");
                let _ = writeln!(out, "Command failed: {e}");
            }
        }
        self.state
    }

    fn execute<W: Write>(&self, command: Command, out: &mut W) -> Result<SessionState> {
        let summary = self.summary;
        match command {
            Command::Help => out.write_all(render_help().as_bytes())?,
            Command::List => out.write_all(render_list(summary).as_bytes())?,
            Command::Detail(None) => {
                writeln!(out, "Please provide the ID of the item to show")?;
                writeln!(out, "Usage: detail <id>")?;
            }
            Command::Detail(Some(raw)) => {
                let id = parse_id(&raw)?;
                match summary.find(id) {
                    Some(item) => out.write_all(render_detail(item).as_bytes())?,
                    None => writeln!(out, "No item found with ID {id}")?,
                }
            }
            Command::Courses => out.write_all(render_courses(summary).as_bytes())?,
            Command::Lives => out.write_all(render_lives(summary).as_bytes())?,
            Command::Stats => out.write_all(render_stats(summary).as_bytes())?,
            Command::Exit => {
                writeln!(out, "Leaving interactive mode")?;
                return Ok(SessionState::Terminated);
            }
            Command::Empty => {}
            Command::Unknown(word) => {
                writeln!(out, "Unknown command: {word}")?;
                writeln!(out, "Type \"help\" to list the available commands")?;
            }
        }
        Ok(SessionState::Running)
    }
}

fn parse_id(raw: &str) -> Result<i64> {
    raw.parse::<i64>().map_err(|_| {
        TalkMedError::Validation(format!("invalid ID '{raw}', please provide a number"))
    })
}

fn render_help() -> String {
    let mut out = String::from("\nAvailable commands:\n");
    for (usage, description) in [
        ("help, h", "Show this help"),
        ("list, l", "List all results"),
        ("detail <id>, d", "Show details for the item with this ID"),
        ("course, c", "Show course results only"),
        ("live, v", "Show live session results only"),
        ("stats, s", "Show search statistics"),
        ("exit, quit, q", "Leave interactive mode"),
    ] {
        let _ = writeln!(out, "  {usage:<16}- {description}");
    }
    out.push('\n');
    out
}

fn render_list(summary: &ResultSummary) -> String {
    let mut out = String::from("\nSearch results:\n");
    if !summary.courses().is_empty() {
        out.push_str("\nCourses:\n");
        for (index, course) in summary.courses().iter().enumerate() {
            let _ = writeln!(out, "  {}. [{}] {}", index + 1, course.id, course.title);
        }
    }
    if !summary.lives().is_empty() {
        out.push_str("\nLive sessions:\n");
        for (index, live) in summary.lives().iter().enumerate() {
            let _ = writeln!(out, "  {}. [{}] {}", index + 1, live.id, live.title);
        }
    }
    out.push('\n');
    out
}

fn render_courses(summary: &ResultSummary) -> String {
    if summary.courses().is_empty() {
        return "\nNo course results\n".to_string();
    }
    let mut out = String::from("\nCourse results:\n");
    for (index, course) in summary.courses().iter().enumerate() {
        let _ = writeln!(out, "{}. [{}] {}", index + 1, course.id, course.title);
        let _ = writeln!(
            out,
            "   Price: {}",
            format_price(
                course.price.amount,
                course.price.original_amount,
                course.price.kind
            )
        );
        let _ = writeln!(out, "   Learners: {}", course.learner_count);
        out.push('\n');
    }
    out
}

fn render_lives(summary: &ResultSummary) -> String {
    if summary.lives().is_empty() {
        return "\nNo live session results\n".to_string();
    }
    let mut out = String::from("\nLive session results:\n");
    for (index, live) in summary.lives().iter().enumerate() {
        let _ = writeln!(out, "{}. [{}] {}", index + 1, live.id, live.title);
        let _ = writeln!(out, "   Status: {}", live.status_label);
        if let Some(ref subtitle) = live.subtitle {
            let _ = writeln!(out, "   {subtitle}");
        }
        out.push('\n');
    }
    out
}

fn render_stats(summary: &ResultSummary) -> String {
    let pagination = summary.pagination();
    let mut out = String::from("\nSearch statistics:\n");
    let _ = writeln!(out, "Keyword: {}", summary.keyword());
    let _ = writeln!(out, "Search type: {}", summary.search_type());
    let _ = writeln!(out, "Current page: {}", pagination.current_page);
    let _ = writeln!(out, "Courses: {}", summary.courses().len());
    let _ = writeln!(out, "Live sessions: {}", summary.lives().len());
    let _ = writeln!(out, "Total results: {}", pagination.total_displayed);
    let _ = writeln!(
        out,
        "More available: {}",
        if pagination.has_more { "yes" } else { "no" }
    );
    out.push('\n');
    out
}
