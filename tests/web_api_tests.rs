//! HTTP API tests driven through the router without binding a socket.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use pet_triage::web::server::{api_routes, AppState, MAX_REQUEST_BODY_SIZE};
use pet_triage::ReferenceStore;
use tower::ServiceExt;

fn app() -> Router {
    let store = ReferenceStore::load_embedded().unwrap();
    api_routes(Arc::new(AppState { store }))
}

async fn post_json(body: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/api/evaluate")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = app().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), MAX_REQUEST_BODY_SIZE)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn get_json(uri: &str) -> serde_json::Value {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_evaluate_ranked_results() {
    let (status, json) =
        post_json(r#"{"species":"dog","symptoms":["呕吐","食欲不振","腹胀"]}"#).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["outcome"], "ranked_results");
    assert_eq!(json["results"][0]["condition_name"], "消化不良");
    assert_eq!(json["results"][0]["directive"], "monitor_at_home");
    assert_eq!(
        json["results"][0]["matched_symptoms"],
        serde_json::json!(["呕吐", "食欲不振", "腹胀"])
    );
    assert_eq!(json["preparation"]["materials"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn test_evaluate_emergency() {
    let (status, json) =
        post_json(r#"{"species":"猫","symptoms":[],"emergency_flags":["昏迷/抽搐"]}"#).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["outcome"], "emergency");
    assert_eq!(json["flags"][0], "seizure_or_unconscious");
    assert!(json.get("results").is_none());
}

#[tokio::test]
async fn test_evaluate_emergency_ignores_invalid_labels() {
    let (status, json) = post_json(
        r#"{"species":"cat","symptoms":["", "呕吐"],"emergency_flags":["昏迷/抽搐"]}"#,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["outcome"], "emergency");

    let too_many: Vec<String> = (0..100).map(|i| format!("症状{i}")).collect();
    let body = serde_json::json!({
        "species": "rabbit",
        "symptoms": too_many,
        "emergency_flags": ["breathing_distress"],
    });
    let (status, json) = post_json(&body.to_string()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["outcome"], "emergency");
    assert_eq!(json["flags"][0], "breathing_distress");
}

#[tokio::test]
async fn test_evaluate_insufficient_input() {
    let (status, json) = post_json(r#"{"species":"cat"}"#).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["outcome"], "insufficient_input");
}

#[tokio::test]
async fn test_evaluate_no_reference_data() {
    let (status, json) = post_json(r#"{"species":"兔子","symptoms":["呕吐"]}"#).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["outcome"], "no_reference_data");
    assert_eq!(json["species"], "rabbit");
}

#[tokio::test]
async fn test_evaluate_no_match() {
    let (status, json) = post_json(r#"{"species":"dog","symptoms":["打喷嚏"]}"#).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["outcome"], "no_match");
}

#[tokio::test]
async fn test_evaluate_rejects_unknown_species() {
    let (status, json) = post_json(r#"{"species":"ferret","symptoms":["呕吐"]}"#).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error_type"], "invalid_request");
    assert!(json["details"].is_null());
}

#[tokio::test]
async fn test_evaluate_rejects_empty_label() {
    let (status, json) = post_json(r#"{"species":"dog","symptoms":["呕吐",""]}"#).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error_type"], "invalid_symptoms");
}

#[tokio::test]
async fn test_reference_endpoint() {
    let json = get_json("/api/reference").await;

    assert_eq!(json["count"], 8);
    assert_eq!(json["species"][0]["species"], "dog");
    assert_eq!(json["species"][1]["label"], "猫");
    assert_eq!(json["species"][1]["conditions"][3]["name"], "尿路感染");
}

#[tokio::test]
async fn test_vocabulary_endpoint() {
    let json = get_json("/api/vocabulary").await;

    assert_eq!(json["symptoms"].as_array().unwrap().len(), 15);
    assert_eq!(json["emergency_flags"].as_array().unwrap().len(), 3);

    let species = json["species"].as_array().unwrap();
    assert_eq!(species.len(), 5);
    assert_eq!(species[0]["supported"], true);
    assert_eq!(species[2]["id"], "rabbit");
    assert_eq!(species[2]["supported"], false);
}
