//! Owner history API integration tests.
//!
//! Run with: `cargo test -p fauna-api --test history_test`

mod helpers;

use helpers::fixtures::{create_minimal_png, CAT_REPLY, DOG_REPLY};
use helpers::{api_path, setup_test_app, setup_test_app_with, ScriptedGateway};
use serde_json::{json, Value};

#[tokio::test]
async fn test_history_lists_only_own_uploads_newest_first() {
    let gateway = ScriptedGateway::new(
        vec![
            Ok(CAT_REPLY.to_string()),
            Ok(DOG_REPLY.to_string()),
            Ok(DOG_REPLY.to_string()),
        ],
        DOG_REPLY,
    );
    let app = setup_test_app_with(gateway).await;
    app.upload("alice", create_minimal_png(), "a1.png", "image/png")
        .await;
    app.upload("alice", create_minimal_png(), "a2.png", "image/png")
        .await;
    app.upload("bob", create_minimal_png(), "b1.png", "image/png")
        .await;

    let response = app
        .client()
        .get(&api_path("/me/uploads"))
        .add_header("Authorization", app.bearer("alice"))
        .await;

    assert_eq!(response.status_code(), 200);
    let history: Value = response.json();
    assert_eq!(history["total_uploads"], 2);
    let uploads = history["uploads"].as_array().unwrap();
    assert!(uploads.iter().all(|r| r["ownerId"] == "alice"));
    let first = uploads[0]["timestamp"].as_str().unwrap();
    let second = uploads[1]["timestamp"].as_str().unwrap();
    assert!(first >= second);
}

#[tokio::test]
async fn test_history_requires_bearer_token() {
    let app = setup_test_app().await;

    let response = app.client().get(&api_path("/me/uploads")).await;

    assert_eq!(response.status_code(), 401);
}

#[tokio::test]
async fn test_delete_removes_from_both_stores_and_is_idempotent() {
    let app = setup_test_app().await;
    let upload: Value = app
        .upload("alice", create_minimal_png(), "rex.png", "image/png")
        .await
        .json();
    let record = upload["record"].clone();

    let response = app
        .client()
        .delete(&api_path("/me/uploads"))
        .add_header("Authorization", app.bearer("alice"))
        .json(&record)
        .await;

    assert_eq!(response.status_code(), 200);
    let summary: Value = response.json();
    assert_eq!(
        summary,
        json!({"owner_records_removed": 1, "catalog_entries_removed": 1})
    );

    let feed: Value = app.client().get(&api_path("/feed")).await.json();
    assert_eq!(feed["count"], 0);
    let history: Value = app
        .client()
        .get(&api_path("/me/uploads"))
        .add_header("Authorization", app.bearer("alice"))
        .await
        .json();
    assert_eq!(history["total_uploads"], 0);

    let again = app
        .client()
        .delete(&api_path("/me/uploads"))
        .add_header("Authorization", app.bearer("alice"))
        .json(&record)
        .await;
    assert_eq!(again.status_code(), 200);
    let summary: Value = again.json();
    assert_eq!(
        summary,
        json!({"owner_records_removed": 0, "catalog_entries_removed": 0})
    );
}

#[tokio::test]
async fn test_cannot_delete_another_owners_record() {
    let app = setup_test_app().await;
    let upload: Value = app
        .upload("alice", create_minimal_png(), "rex.png", "image/png")
        .await
        .json();
    let record = upload["record"].clone();

    let response = app
        .client()
        .delete(&api_path("/me/uploads"))
        .add_header("Authorization", app.bearer("mallory"))
        .json(&record)
        .await;

    assert_eq!(response.status_code(), 200);
    let summary: Value = response.json();
    assert_eq!(summary["owner_records_removed"], 0);
    assert_eq!(summary["catalog_entries_removed"], 0);

    let feed: Value = app.client().get(&api_path("/feed")).await.json();
    assert_eq!(feed["count"], 1);
}

#[tokio::test]
async fn test_delete_needs_exact_record() {
    let app = setup_test_app().await;
    let upload: Value = app
        .upload("alice", create_minimal_png(), "rex.png", "image/png")
        .await
        .json();
    let mut record = upload["record"].clone();
    record["analysis"]["species"] = json!("Wolf");

    let summary: Value = app
        .client()
        .delete(&api_path("/me/uploads"))
        .add_header("Authorization", app.bearer("alice"))
        .json(&record)
        .await
        .json();

    // The owner set matches whole records; the catalog matches owner and image URL
    assert_eq!(summary["owner_records_removed"], 0);
    assert_eq!(summary["catalog_entries_removed"], 1);
}

#[tokio::test]
async fn test_delete_with_invalid_body_is_400() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .delete(&api_path("/me/uploads"))
        .add_header("Authorization", app.bearer("alice"))
        .json(&json!({"imageUrl": 42}))
        .await;

    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["code"], "INVALID_INPUT");
}
