//! Integration tests for the HTTP search client and the orchestrator
//!
//! These tests run the real `TalkMedClient` against a wiremock server and verify
//! request parameters, response normalization and how each failure surfaces.

use std::time::Duration;

use talkmed_client::{
    ClientConfig, ContentType, SearchOptions, SearchOrchestrator, SearchProvider, SearchQuery,
    TalkMedClient, TalkMedError,
};
use tracing_test::traced_test;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Helper: create a client pointing to the mock server
fn create_test_client(base_url: &str) -> TalkMedClient {
    let config = ClientConfig::new()
        .with_base_url(base_url)
        .with_timeout(Duration::from_secs(2))
        .with_user_agent("talkmed-test");
    TalkMedClient::with_config(config).unwrap()
}

/// Helper: search response with the given numbers of courses and lives
fn search_json(courses: usize, lives: usize, has_more: bool) -> String {
    let course_items: Vec<String> = (0..courses)
        .map(|i| {
            format!(
                r#"{{"id": {}, "title": "Course {}", "price_type": 1, "price": 49, "original_price": 99, "learn_count_show": {}, "course_count": 4, "tag_name": ""}}"#,
                100 + i,
                i + 1,
                i * 10
            )
        })
        .collect();
    let live_items: Vec<String> = (0..lives)
        .map(|i| {
            format!(
                r#"{{"id": {}, "title": "Live {}", "sub_title": null, "des": "Session {}", "url": "https://live.example/{}", "start_at": "2024-05-01 09:00:00", "end_at": "2024-05-01 11:00:00", "live_status": 1, "live_status_text": "Upcoming", "tag": "CME"}}"#,
                200 + i,
                i + 1,
                i + 1,
                200 + i
            )
        })
        .collect();
    format!(
        r#"{{"code": 0, "data": {{"course": {{"title": "Courses", "has_more": {}, "items": [{}]}}, "live": {{"title": "Live", "items": [{}]}}}}}}"#,
        has_more,
        course_items.join(","),
        live_items.join(",")
    )
}

// ================================================================================================
// Request parameters
// ================================================================================================

#[tokio::test]
#[traced_test]
async fn test_default_query_sends_only_word() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/pc/search"))
        .and(query_param("word", "diabetes"))
        .respond_with(ResponseTemplate::new(200).set_body_string(search_json(2, 0, true)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server.uri());
    let query = SearchQuery::new("diabetes", ContentType::All, 1).unwrap();
    let response = client.search(&query).await.unwrap();

    assert!(response.is_success());
    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].url.query(), Some("word=diabetes"));
    assert_eq!(
        requests[0]
            .headers
            .get("user-agent")
            .and_then(|v| v.to_str().ok()),
        Some("talkmed-test")
    );
}

#[tokio::test]
async fn test_filter_and_page_are_sent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/pc/search"))
        .and(query_param("word", "心脏病"))
        .and(query_param("type", "live"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_string(search_json(0, 1, false)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server.uri());
    let query = SearchQuery::new("心脏病", ContentType::Live, 2).unwrap();
    let response = client.search(&query).await.unwrap();

    assert_eq!(response.data.live.map(|l| l.items.len()), Some(1));
}

// ================================================================================================
// Orchestration against the HTTP client
// ================================================================================================

#[tokio::test]
async fn test_orchestrator_normalizes_http_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(search_json(2, 1, false)))
        .mount(&mock_server)
        .await;

    let orchestrator = SearchOrchestrator::new(create_test_client(&mock_server.uri()));
    let query = SearchQuery::new("surgery", ContentType::All, 1).unwrap();
    let summary = orchestrator.search(&query).await.unwrap();

    assert_eq!(summary.courses().len(), 2);
    assert_eq!(summary.lives().len(), 1);
    assert_eq!(summary.pagination().total_displayed, 3);
    assert!(!summary.pagination().has_more);
    assert_eq!(summary.courses()[0].tag, None);
    assert_eq!(summary.lives()[0].tag.as_deref(), Some("CME"));
}

#[tokio::test]
async fn test_cli_flow_renders_results() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(search_json(1, 1, true)))
        .mount(&mock_server)
        .await;

    let orchestrator = SearchOrchestrator::new(create_test_client(&mock_server.uri()));
    let mut out = Vec::new();
    let mut err = Vec::new();
    orchestrator
        .perform_search(
            "surgery",
            &SearchOptions::new(),
            &b""[..],
            &mut out,
            &mut err,
        )
        .await
        .unwrap();

    let out = String::from_utf8(out).unwrap();
    assert!(out.contains("Courses (1 results)"));
    assert!(out.contains("Live sessions (1 results)"));
    assert!(out.contains("Time: 2024/05/01 09:00 ~ 2024/05/01 11:00"));
    assert!(out.contains("Total: 2 results"));
    assert!(err.is_empty());
}

// ================================================================================================
// Failures
// ================================================================================================

#[tokio::test]
async fn test_non_zero_code_is_malformed_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"{"code": 40001, "message": "invalid word", "data": null}"#),
        )
        .mount(&mock_server)
        .await;

    let orchestrator = SearchOrchestrator::new(create_test_client(&mock_server.uri()));
    let query = SearchQuery::new("x", ContentType::All, 1).unwrap();
    let err = orchestrator.search(&query).await.unwrap_err();

    assert!(matches!(err, TalkMedError::MalformedResponse(_)));
    assert!(err.to_string().contains("40001"));
    assert!(err.to_string().contains("invalid word"));
}

#[tokio::test]
async fn test_http_error_status_is_provider_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(502))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server.uri());
    let query = SearchQuery::new("x", ContentType::All, 1).unwrap();
    let err = client.search(&query).await.unwrap_err();

    assert!(matches!(err, TalkMedError::Provider { status: 502, .. }));
}

#[tokio::test]
async fn test_invalid_json_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server.uri());
    let query = SearchQuery::new("x", ContentType::All, 1).unwrap();
    let err = client.search(&query).await.unwrap_err();

    assert!(matches!(err, TalkMedError::Json(_)));
    assert!(err.is_provider_failure());
}

#[tokio::test]
async fn test_timeout_is_transport_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(search_json(1, 0, false))
                .set_delay(Duration::from_millis(1500)),
        )
        .mount(&mock_server)
        .await;

    let config = ClientConfig::new()
        .with_base_url(mock_server.uri())
        .with_timeout(Duration::from_millis(200));
    let client = TalkMedClient::with_config(config).unwrap();
    let query = SearchQuery::new("slow", ContentType::All, 1).unwrap();
    let err = client.search(&query).await.unwrap_err();

    assert!(err.is_transport());
    assert_eq!(err.kind(), "Request timeout");
    assert!(err.to_string().contains("timed out"));
}

#[tokio::test]
async fn test_mcp_flow_never_fails_on_provider_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let orchestrator = SearchOrchestrator::new(create_test_client(&mock_server.uri()));
    let result = orchestrator
        .perform_search_for_mcp("diabetes", &SearchOptions::new().with_content_type("course"))
        .await;

    assert!(!result.success);
    assert!(result.error.unwrap().contains("500"));
}

#[tokio::test]
async fn test_connection_check() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param("word", "test"))
        .respond_with(ResponseTemplate::new(200).set_body_string(search_json(0, 0, false)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server.uri());
    assert!(client.test_connection().await);
}

#[tokio::test]
async fn test_connection_check_reports_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server.uri());
    assert!(!client.test_connection().await);
}
