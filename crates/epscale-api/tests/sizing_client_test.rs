#![allow(clippy::unwrap_used)]
// Integration tests for `SizingClient` using wiremock.

use serde_json::json;
use wiremock::matchers::{header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

use epscale_api::{Error, SizingClient, TransportConfig};
use epscale_core::{Inventory, TrafficMultiplier, estimate};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, SizingClient) {
    let server = MockServer::start().await;
    let token: secrecy::SecretString = "test-id-token".to_owned().into();
    let client = SizingClient::from_token(&server.uri(), &token, &TransportConfig::default())
        .unwrap();
    (server, client)
}

fn usage_record(email: &str) -> serde_json::Value {
    json!({
        "email": email,
        "timestamp": "2025-11-02T09:30:00Z",
        "company": "Acme Water",
        "title": "OT Engineer",
        "inputTokens": 812,
        "outputTokens": 441,
        "cost": 0.0123,
        "totalEps": 154.0,
        "deviceCount": 41
    })
}

fn stats_block() -> serde_json::Value {
    json!({
        "totalCost": 1.25,
        "totalInputTokens": 90_000,
        "totalOutputTokens": 41_000,
        "recordCount": 73
    })
}

// ── Analyze tests ───────────────────────────────────────────────────

#[tokio::test]
async fn test_analyze_success() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/analyze"))
        .and(header("authorization", "test-id-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "summary": "Moderate ingestion footprint for a mid-size OT site.",
            "riskAssessment": "PLC visibility is thin with syslog only.",
            "storageStrategy": "Keep 30 days hot, 12 months cold.",
            "keyRecommendations": [
                "Enable NetFlow on the core switches",
                "Forward historian application logs"
            ]
        })))
        .mount(&server)
        .await;

    let inventory = Inventory::default();
    let results = estimate(&inventory.categories, TrafficMultiplier::default());
    let analysis = client.analyze(&inventory.categories, &results).await.unwrap();

    assert!(analysis.summary.contains("Moderate"));
    assert_eq!(analysis.key_recommendations.len(), 2);
}

#[tokio::test]
async fn test_analyze_session_expired() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/analyze"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let inventory = Inventory::default();
    let results = inventory.estimate();
    let result = client.analyze(&inventory.categories, &results).await;

    assert!(
        matches!(result, Err(Error::SessionExpired)),
        "expected SessionExpired, got: {result:?}"
    );
}

#[tokio::test]
async fn test_analyze_error_body() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/analyze"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({ "error": "model unavailable" })),
        )
        .mount(&server)
        .await;

    let inventory = Inventory::default();
    let results = inventory.estimate();
    let result = client.analyze(&inventory.categories, &results).await;

    match result {
        Err(Error::Api { status, message }) => {
            assert_eq!(status, 500);
            assert!(message.contains("model unavailable"));
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}

// ── Usage log tests ─────────────────────────────────────────────────

#[tokio::test]
async fn test_usage_page_query_params() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/admin/usage"))
        .and(query_param("limit", "25"))
        .and(query_param("lastKey", "cursor-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [usage_record("a@example.com")],
            "stats": stats_block(),
            "lastEvaluatedKey": null
        })))
        .mount(&server)
        .await;

    let page = client.usage_page(25, Some("cursor-1")).await.unwrap();

    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].email, "a@example.com");
    assert_eq!(page.items[0].input_tokens, 812);
    assert_eq!(page.stats.record_count, 73);
    assert!(page.last_evaluated_key.is_none());
}

#[tokio::test]
async fn test_usage_all_follows_continuation_keys() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/admin/usage"))
        .and(query_param_is_missing("lastKey"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [usage_record("a@example.com")],
            "stats": stats_block(),
            "lastEvaluatedKey": "cursor-2"
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/admin/usage"))
        .and(query_param("lastKey", "cursor-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [usage_record("b@example.com")],
            "stats": stats_block(),
            "lastEvaluatedKey": null
        })))
        .mount(&server)
        .await;

    let (records, stats) = client.usage_all(1).await.unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].email, "a@example.com");
    assert_eq!(records[1].email, "b@example.com");
    assert_eq!(stats.record_count, 73);
}

#[tokio::test]
async fn test_usage_admin_required() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/admin/usage"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let result = client.usage_page(50, None).await;

    assert!(
        matches!(result, Err(Error::AdminRequired)),
        "expected AdminRequired, got: {result:?}"
    );
}
