//! Integration tests for the openverse-mcp server
//!
//! The mock-server tests exercise the HTTP adapter against a local
//! wiremock instance and run everywhere. The live tests run against the
//! real Openverse API and require network access.
//!
//! # Running tests
//!
//! ```bash
//! # Mock-server tests only (default)
//! cargo test --test integration
//!
//! # Include live tests against api.openverse.org
//! cargo test --test integration -- --ignored
//! ```

use serde_json::{json, Value};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use openverse_mcp::config::ApiConfig;
use openverse_mcp::essay::{collect_essay_images, ImageStyle};
use openverse_mcp::{ImageApi, OpenverseClient, OpenverseError};

fn client_for(base_url: &str) -> OpenverseClient {
    OpenverseClient::new(&ApiConfig {
        base_url: base_url.to_string(),
        ..ApiConfig::default()
    })
}

// ============================================================================
// MOCK-SERVER TESTS
// ============================================================================

#[tokio::test]
async fn adapter_sends_query_params_and_identifying_header() {
    let server = MockServer::start().await;
    let body = json!({ "result_count": 1, "results": [{ "id": "abc" }] });

    Mock::given(method("GET"))
        .and(path("/images/"))
        .and(query_param("q", "glacier"))
        .and(query_param("page_size", "20"))
        .and(header("user-agent", "MCP-Openverse/1.0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body.clone()))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server.uri());
    let result = client
        .get_json(
            "/images/",
            &[("q", "glacier".to_string()), ("page_size", "20".to_string())],
        )
        .await
        .unwrap();

    assert_eq!(result, body);
}

#[tokio::test]
async fn adapter_returns_body_untouched() {
    let server = MockServer::start().await;
    // Shape the crate never models; it must pass through as-is
    let body = json!({
        "results": [{ "id": "abc", "unexpected": { "deep": [1, 2, 3] } }],
        "warnings": ["partial index"]
    });

    Mock::given(method("GET"))
        .and(path("/images/abc/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body.clone()))
        .mount(&server)
        .await;

    let client = client_for(&server.uri());
    let result = client.get_json("/images/abc/", &[]).await.unwrap();
    assert_eq!(result, body);
}

#[tokio::test]
async fn non_success_status_is_an_upstream_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/images/missing/"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = client_for(&server.uri());
    let err = client.get_json("/images/missing/", &[]).await.unwrap_err();

    match err {
        OpenverseError::Upstream { status, reason } => {
            assert_eq!(status, 404);
            assert_eq!(reason, "Not Found");
        }
        other => panic!("expected Upstream error, got: {other}"),
    }
}

#[tokio::test]
async fn unreachable_host_is_a_transport_error() {
    // Nothing listens here
    let client = client_for("http://127.0.0.1:1");
    let err = client.get_json("/images/stats/", &[]).await.unwrap_err();
    assert!(matches!(err, OpenverseError::Transport(_)));
}

#[tokio::test]
async fn malformed_body_is_a_transport_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/images/stats/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let client = client_for(&server.uri());
    let err = client.get_json("/images/stats/", &[]).await.unwrap_err();
    assert!(matches!(err, OpenverseError::Transport(_)));
}

#[tokio::test]
async fn essay_aggregation_over_real_http_round_trips() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/images/"))
        .and(query_param("q", "Climate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [
                { "id": "f1", "url": "https://i.example/f1.jpg", "creator": "Ada" },
                { "id": "f2", "url": "https://i.example/f2.jpg" }
            ]
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/images/"))
        .and(query_param("q", "ice Climate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{ "id": "c1", "url": "https://i.example/c1.jpg" }]
        })))
        .mount(&server)
        .await;

    let client = client_for(&server.uri());
    let set = collect_essay_images(
        &client,
        "Climate",
        &["ice".to_string()],
        ImageStyle::Any,
        10,
    )
    .await;

    assert_eq!(set.featured_images.len(), 2);
    assert_eq!(set.featured_images[0].creator, "Ada");
    assert_eq!(set.featured_images[1].creator, "Unknown");
    assert_eq!(set.images_by_concept.len(), 1);
    assert_eq!(set.total_images, 3);
}

#[tokio::test]
async fn essay_aggregation_swallows_http_500() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/images/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = client_for(&server.uri());
    let set = collect_essay_images(
        &client,
        "Climate",
        &["ice".to_string()],
        ImageStyle::Any,
        10,
    )
    .await;

    assert_eq!(set.total_images, 0);
    assert!(set.featured_images.is_empty());
    assert!(set.images_by_concept.is_empty());
}

// ============================================================================
// LIVE TESTS (require network access to api.openverse.org)
// ============================================================================

fn live_client() -> OpenverseClient {
    OpenverseClient::new(&ApiConfig::default())
}

#[tokio::test]
#[ignore = "integration test - requires network access to api.openverse.org"]
async fn live_search_images() {
    let client = live_client();
    let body = client
        .get_json(
            "/images/",
            &[
                ("q", "nature".to_string()),
                ("page_size", "3".to_string()),
                ("mature", "false".to_string()),
            ],
        )
        .await
        .expect("live search failed");

    let results = body
        .get("results")
        .and_then(Value::as_array)
        .expect("response missing results array");
    assert!(results.len() <= 3);
    println!("Images returned: {}", results.len());
}

#[tokio::test]
#[ignore = "integration test - requires network access to api.openverse.org"]
async fn live_image_stats() {
    let client = live_client();
    let body = client
        .get_json("/images/stats/", &[])
        .await
        .expect("live stats failed");

    let sources = body.as_array().expect("stats response is not an array");
    assert!(!sources.is_empty());
    println!("Providers: {}", sources.len());
}

#[tokio::test]
#[ignore = "integration test - requires network access to api.openverse.org"]
async fn live_essay_aggregation_respects_totals() {
    let client = live_client();
    let set = collect_essay_images(
        &client,
        "renewable energy",
        &["solar".to_string(), "wind".to_string()],
        ImageStyle::Photo,
        6,
    )
    .await;

    let bucket_total: usize = set.images_by_concept.iter().map(|(_, v)| v.len()).sum();
    assert_eq!(set.total_images, set.featured_images.len() + bucket_total);
    assert!(set.featured_images.len() <= 3);
    println!("Total images: {}", set.total_images);
}
