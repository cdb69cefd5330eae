//! Analyze-only API integration tests.
//!
//! Run with: `cargo test -p fauna-api --test analyze_test`

mod helpers;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use helpers::fixtures::{create_minimal_png, NOT_AN_ANIMAL_REPLY};
use helpers::{api_path, setup_test_app, setup_test_app_with, ScriptedGateway};
use serde_json::{json, Value};

fn png_data_url() -> String {
    format!("data:image/png;base64,{}", STANDARD.encode(create_minimal_png()))
}

#[tokio::test]
async fn test_analyze_data_url_returns_analysis_without_persisting() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post(&api_path("/analyze"))
        .add_header("Authorization", app.bearer("owner-1"))
        .json(&json!({ "imageData": png_data_url() }))
        .await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["status"], "accepted");
    assert_eq!(body["analysis"]["species"], "Dog");
    assert_eq!(body["analysis"]["country"], "Canada");

    assert_eq!(app.gateway.calls(), 1);
    assert_eq!(app.blob_count(), 0);
    let feed: Value = app.client().get(&api_path("/feed")).await.json();
    assert_eq!(feed["count"], 0);
}

#[tokio::test]
async fn test_analyze_bare_base64_with_mime_type() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post(&api_path("/analyze"))
        .add_header("Authorization", app.bearer("owner-1"))
        .json(&json!({
            "imageData": STANDARD.encode(create_minimal_png()),
            "mimeType": "image/jpeg"
        }))
        .await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["status"], "accepted");
}

#[tokio::test]
async fn test_analyze_rejection() {
    let app = setup_test_app_with(ScriptedGateway::always(NOT_AN_ANIMAL_REPLY)).await;

    let response = app
        .client()
        .post(&api_path("/analyze"))
        .add_header("Authorization", app.bearer("owner-1"))
        .json(&json!({ "imageData": png_data_url() }))
        .await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["status"], "rejected");
    assert_eq!(body["reason"], "not an animal");
}

#[tokio::test]
async fn test_analyze_rejects_bad_input_before_inference() {
    let app = setup_test_app().await;
    let gif = format!("data:image/gif;base64,{}", STANDARD.encode(b"GIF89a"));

    for payload in [
        json!({ "imageData": "" }),
        json!({ "imageData": "data:image/png;base64,%%%not-base64%%%" }),
        json!({ "imageData": gif }),
        json!({ "mimeType": "image/png" }),
    ] {
        let response = app
            .client()
            .post(&api_path("/analyze"))
            .add_header("Authorization", app.bearer("owner-1"))
            .json(&payload)
            .await;

        assert_eq!(response.status_code(), 400, "payload={}", payload);
        let body: Value = response.json();
        assert_eq!(body["code"], "INVALID_INPUT");
    }

    assert_eq!(app.gateway.calls(), 0);
}

#[tokio::test]
async fn test_analyze_requires_bearer_token() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post(&api_path("/analyze"))
        .json(&json!({ "imageData": png_data_url() }))
        .await;

    assert_eq!(response.status_code(), 401);
    assert_eq!(app.gateway.calls(), 0);
}
