//! Integration tests for the interactive command loop
//!
//! Each test feeds a scripted stdin to `InteractiveSession::run` and inspects the
//! transcript written to an in-memory buffer.

use talkmed_client::{
    ContentType, Course, InteractiveSession, LiveSession, Price, PriceKind, ResultSummary,
    SessionState,
};

fn sample_summary() -> ResultSummary {
    let courses = vec![
        Course {
            id: 1,
            title: "Hypertension essentials".to_string(),
            price: Price {
                amount: 0.0,
                original_amount: 0.0,
                kind: PriceKind::Free,
            },
            learner_count: 320,
            course_count: 5,
            tag: None,
        },
        Course {
            id: 2,
            title: "Advanced ECG reading".to_string(),
            price: Price {
                amount: 199.0,
                original_amount: 299.0,
                kind: PriceKind::Paid,
            },
            learner_count: 87,
            course_count: 12,
            tag: Some("Bestseller".to_string()),
        },
    ];
    let lives = vec![
        LiveSession {
            id: 2,
            title: "Shadowed live".to_string(),
            subtitle: None,
            description: String::new(),
            start_at: "2024-06-01 20:00:00".to_string(),
            end_at: "2024-06-01 21:00:00".to_string(),
            status: 0,
            status_label: "Ended".to_string(),
            tag: None,
            url: None,
        },
        LiveSession {
            id: 9,
            title: "Heart failure grand rounds".to_string(),
            subtitle: Some("Monthly case review".to_string()),
            description: "Cases from the cardiology ward".to_string(),
            start_at: "2024-06-10 19:00:00".to_string(),
            end_at: "2024-06-10 20:30:00".to_string(),
            status: 1,
            status_label: "Upcoming".to_string(),
            tag: Some("CME".to_string()),
            url: Some("https://live.example/9".to_string()),
        },
    ];
    ResultSummary::new("heart", ContentType::All, false, courses, lives)
}

async fn transcript(summary: &ResultSummary, script: &str) -> (SessionState, String) {
    let mut session = InteractiveSession::new(summary);
    let mut out = Vec::new();
    session.run(script.as_bytes(), &mut out).await.unwrap();
    (session.state(), String::from_utf8(out).unwrap())
}

#[tokio::test]
async fn test_invalid_detail_then_exit() {
    let summary = sample_summary();
    let mut session = InteractiveSession::new(&summary);
    let mut out = Vec::new();

    let state = session.handle_line("detail abc", &mut out);
    assert_eq!(state, SessionState::Running);
    let text = String::from_utf8(out.clone()).unwrap();
    assert!(text.contains("invalid ID 'abc'"));

    let state = session.handle_line("exit", &mut out);
    assert_eq!(state, SessionState::Terminated);
}

#[tokio::test]
async fn test_scripted_session_terminates_cleanly() {
    let summary = sample_summary();
    let (state, out) = transcript(&summary, "detail abc\nexit\nlist\n").await;

    assert_eq!(state, SessionState::Terminated);
    assert!(out.contains("Interactive mode enabled"));
    assert!(out.contains("invalid ID 'abc'"));
    assert!(out.contains("Leaving interactive mode"));
    // Nothing after exit is processed
    assert!(!out.contains("Search results:"));
}

#[tokio::test]
async fn test_list_is_idempotent() {
    let summary = sample_summary();
    let mut session = InteractiveSession::new(&summary);

    let mut first = Vec::new();
    session.handle_line("list", &mut first);
    let mut second = Vec::new();
    session.handle_line("l", &mut second);

    assert_eq!(first, second);
    let text = String::from_utf8(first).unwrap();
    assert!(text.contains("1. [1] Hypertension essentials"));
    assert!(text.contains("2. [2] Advanced ECG reading"));
    assert!(text.contains("1. [2] Shadowed live"));
    assert!(text.contains("2. [9] Heart failure grand rounds"));
}

#[tokio::test]
async fn test_detail_prefers_course_on_id_collision() {
    let summary = sample_summary();
    let (_, out) = transcript(&summary, "detail 2\nq\n").await;

    assert!(out.contains("Title: Advanced ECG reading"));
    assert!(out.contains("Type: Course"));
    assert!(out.contains("Status: Bestseller"));
    assert!(!out.contains("Title: Shadowed live"));
}

#[tokio::test]
async fn test_detail_live_and_not_found() {
    let summary = sample_summary();
    let (state, out) = transcript(&summary, "D 9\ndetail 404\ndetail\nquit\n").await;

    assert_eq!(state, SessionState::Terminated);
    assert!(out.contains("Title: Heart failure grand rounds"));
    assert!(out.contains("Description: Cases from the cardiology ward"));
    assert!(out.contains("Link: https://live.example/9"));
    assert!(out.contains("No item found with ID 404"));
    assert!(out.contains("Usage: detail <id>"));
}

#[tokio::test]
async fn test_filtered_views_and_stats() {
    let summary = sample_summary();
    let (_, out) = transcript(&summary, "COURSE\nv\nstats\nexit\n").await;

    assert!(out.contains("Course results:"));
    assert!(out.contains("Price: Free"));
    assert!(out.contains("Live session results:"));
    assert!(out.contains("Status: Upcoming"));
    assert!(out.contains("Monthly case review"));
    assert!(out.contains("Keyword: heart"));
    assert!(out.contains("Search type: all"));
    assert!(out.contains("Courses: 2"));
    assert!(out.contains("Live sessions: 2"));
    assert!(out.contains("Total results: 4"));
    assert!(out.contains("More available: no"));
}

#[tokio::test]
async fn test_empty_collection_notices() {
    let summary = ResultSummary::new("none", ContentType::Course, false, vec![], vec![]);
    let (_, out) = transcript(&summary, "c\nlive\nexit\n").await;

    assert!(out.contains("No course results"));
    assert!(out.contains("No live session results"));
}

#[tokio::test]
async fn test_unknown_and_blank_lines_keep_running() {
    let summary = sample_summary();
    let (state, out) = transcript(&summary, "\n   \nfoo bar\nhelp\nexit\n").await;

    assert_eq!(state, SessionState::Terminated);
    assert!(out.contains("Unknown command: foo"));
    assert!(out.contains("Available commands:"));
}

#[tokio::test]
async fn test_end_of_input_terminates() {
    let summary = sample_summary();
    let (state, out) = transcript(&summary, "list\n").await;

    assert_eq!(state, SessionState::Terminated);
    assert!(out.contains("Search results:"));
    assert!(!out.contains("Leaving interactive mode"));
}

#[tokio::test]
async fn test_invalid_utf8_line_keeps_running() {
    let summary = sample_summary();
    let mut session = InteractiveSession::new(&summary);
    let mut out = Vec::new();

    session
        .run(&b"\xff\xfe bad\nlist\nexit\n"[..], &mut out)
        .await
        .unwrap();

    assert_eq!(session.state(), SessionState::Terminated);
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("Unknown command:"));
    assert!(text.contains("Search results:"));
    assert!(text.contains("Leaving interactive mode"));
}
