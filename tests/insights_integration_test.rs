use dotreview::config::toml_config::InsightsConfig;
use dotreview::core::insights::{build_provider, GeminiInsights, FALLBACK_MESSAGE};
use dotreview::domain::ports::InsightProvider;
use dotreview::{Nutrient, Product};
use httpmock::prelude::*;

const GENERATE_PATH: &str = "/models/gemini-pro:generateContent";

fn config_for(server: &MockServer, max_retries: u32) -> InsightsConfig {
    InsightsConfig {
        enabled: Some(true),
        endpoint: Some(server.base_url()),
        model: Some("gemini-pro".to_string()),
        api_key: Some("test-key".to_string()),
        timeout_seconds: Some(5),
        max_retries: Some(max_retries),
        retry_delay_ms: Some(0),
    }
}

fn oat_bar() -> Product {
    Product::new("Oat Bar")
        .with(Nutrient::EnergyKcal, 210.0)
        .with(Nutrient::Protein, 4.0)
}

#[tokio::test]
async fn test_generates_insights_from_api() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST)
            .path(GENERATE_PATH)
            .query_param("key", "test-key")
            .body_contains("Product: Oat Bar")
            .body_contains("Recommendations for Improvement");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({
                "candidates": [
                    {"content": {"parts": [{"text": "1. Overall Nutritional Profile\n"}, {"text": "Moderate energy."}]}}
                ]
            }));
    });

    let client = GeminiInsights::new(&config_for(&server, 2), "test-key".to_string()).unwrap();
    let text = client.generate(&oat_bar()).await;

    api_mock.assert();
    assert_eq!(text, "1. Overall Nutritional Profile\nModerate energy.");
}

#[tokio::test]
async fn test_server_error_retries_then_falls_back() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST).path(GENERATE_PATH);
        then.status(500);
    });

    let client = GeminiInsights::new(&config_for(&server, 2), "test-key".to_string()).unwrap();
    let text = client.generate(&oat_bar()).await;

    // 一次請求 + 兩次重試
    api_mock.assert_hits(3);
    assert_eq!(text, FALLBACK_MESSAGE);
}

#[tokio::test]
async fn test_empty_candidates_is_failure() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST).path(GENERATE_PATH);
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({"candidates": []}));
    });

    let client = GeminiInsights::new(&config_for(&server, 0), "test-key".to_string()).unwrap();
    assert!(client.try_generate(&oat_bar()).await.is_err());
    assert_eq!(client.generate(&oat_bar()).await, FALLBACK_MESSAGE);

    api_mock.assert_hits(2);
}

#[tokio::test]
async fn test_auth_failure_falls_back() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST).path(GENERATE_PATH);
        then.status(403)
            .json_body(serde_json::json!({"error": {"message": "API key not valid"}}));
    });

    let provider = build_provider(&config_for(&server, 1));
    let text = provider.generate(&oat_bar()).await;

    api_mock.assert_hits(2);
    assert_eq!(text, FALLBACK_MESSAGE);
}

#[tokio::test]
async fn test_disabled_provider_makes_no_requests() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST).path(GENERATE_PATH);
        then.status(200);
    });

    let mut config = config_for(&server, 2);
    config.enabled = Some(false);
    let provider = build_provider(&config);

    assert_eq!(provider.generate(&oat_bar()).await, FALLBACK_MESSAGE);
    api_mock.assert_hits(0);
}
