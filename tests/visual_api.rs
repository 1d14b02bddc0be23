//! HTTP-level tests for the visuals endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, mock_db, post_json};
use infinity_server::entities::visual;
use serde_json::json;
use uuid::Uuid;

fn now() -> chrono::DateTime<chrono::FixedOffset> {
    chrono::Utc::now().with_timezone(&chrono::FixedOffset::east_opt(0).unwrap())
}

fn visual_row(prompt: &str) -> visual::Model {
    visual::Model {
        id: Uuid::new_v4(),
        prompt: prompt.to_string(),
        aspect_ratio: "16:9".to_string(),
        image_data: "data:image/png;base64,AAAA".to_string(),
        created_at: now(),
    }
}

#[tokio::test]
async fn listing_returns_stored_visuals() {
    let db = mock_db()
        .append_query_results([vec![visual_row("a bridge at night"), visual_row("a harbor")]])
        .into_connection();
    let app = build_test_app(db);

    let response = common::get(app, "/api/visuals").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let records = body.as_array().expect("listing should be an array");
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["prompt"], "a bridge at night");
    assert_eq!(records[0]["aspectRatio"], "16:9");
}

#[tokio::test]
async fn listing_store_failure_is_a_server_error() {
    let db = mock_db().into_connection();
    let app = build_test_app(db);

    let response = common::get(app, "/api/visuals").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = body_json(response).await;
    assert_eq!(body["message"], "Failed to fetch visuals");
}

#[tokio::test]
async fn missing_image_data_is_rejected_without_a_write() {
    let db = mock_db().into_connection();
    let app = build_test_app(db.clone());

    let response = post_json(
        app,
        "/api/visuals",
        json!({ "prompt": "a bridge at night", "aspectRatio": "16:9" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["message"], "Missing required visual data");
    assert!(db.into_transaction_log().is_empty());
}

#[tokio::test]
async fn valid_visual_is_persisted_with_timestamp() {
    let db = mock_db()
        .append_query_results([vec![visual_row("a bridge at night")]])
        .into_connection();
    let app = build_test_app(db);

    let response = post_json(
        app,
        "/api/visuals",
        json!({
            "prompt": "a bridge at night",
            "aspectRatio": "16:9",
            "imageData": "data:image/png;base64,AAAA"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    assert_eq!(body["prompt"], "a bridge at night");
    assert_eq!(body["aspectRatio"], "16:9");
    assert_eq!(body["imageData"], "data:image/png;base64,AAAA");
    assert!(body["createdAt"].is_string());
}

#[tokio::test]
async fn aspect_ratio_outside_the_fixed_set_is_rejected() {
    let db = mock_db().into_connection();
    let app = build_test_app(db.clone());

    let response = post_json(
        app,
        "/api/visuals",
        json!({
            "prompt": "a bridge at night",
            "aspectRatio": "2:1",
            "imageData": "data:image/png;base64,AAAA"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(db.into_transaction_log().is_empty());
}

#[tokio::test]
async fn studio_requires_a_prompt() {
    let db = mock_db().into_connection();
    let app = build_test_app(db);

    let response = post_json(app, "/api/studio/visual", json!({ "isPro": true })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["message"], "Missing required fields");
}
