//! HTTP-level tests for the inquiry submission endpoint.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, mock_db, post_json};
use infinity_server::entities::inquiry;
use serde_json::json;
use uuid::Uuid;

fn now() -> chrono::DateTime<chrono::FixedOffset> {
    chrono::Utc::now().with_timezone(&chrono::FixedOffset::east_opt(0).unwrap())
}

fn inquiry_row(status: &str, generated_strategy: Option<&str>) -> inquiry::Model {
    inquiry::Model {
        id: Uuid::new_v4(),
        name: "Jane".to_string(),
        email: "jane@example.com".to_string(),
        company: Some("Acme".to_string()),
        industry: None,
        project_description: "build a platform".to_string(),
        generated_strategy: generated_strategy.map(|s| s.to_string()),
        status: status.to_string(),
        created_at: now(),
    }
}

#[tokio::test]
async fn missing_required_fields_is_rejected_without_a_write() {
    let db = mock_db().into_connection();
    let app = build_test_app(db.clone());

    let response = post_json(
        app,
        "/api/contact",
        json!({ "name": "Jane", "email": "jane@example.com" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["message"], "Missing required fields");

    // Nothing must reach the store on a validation failure
    assert!(db.into_transaction_log().is_empty());
}

#[tokio::test]
async fn malformed_email_is_rejected_server_side() {
    let db = mock_db().into_connection();
    let app = build_test_app(db.clone());

    let response = post_json(
        app,
        "/api/contact",
        json!({
            "name": "Jane",
            "email": "not-an-email",
            "projectDescription": "build a platform"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["message"], "Please provide a valid email address");
    assert!(db.into_transaction_log().is_empty());
}

#[tokio::test]
async fn valid_submission_creates_one_record() {
    let db = mock_db()
        .append_query_results([vec![inquiry_row("new", None)]])
        .into_connection();
    let app = build_test_app(db.clone());

    let response = post_json(
        app,
        "/api/contact",
        json!({
            "name": "Jane",
            "email": "jane@example.com",
            "company": "Acme",
            "projectDescription": "build a platform"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    assert_eq!(body["name"], "Jane");
    assert_eq!(body["status"], "new");
    assert_eq!(body["projectDescription"], "build a platform");
    assert!(body["createdAt"].is_string());

    assert_eq!(db.into_transaction_log().len(), 1);
}

#[tokio::test]
async fn submission_with_strategy_is_promoted() {
    let db = mock_db()
        .append_query_results([vec![inquiry_row(
            "strategy_generated",
            Some("1. STRATEGIC VISION ..."),
        )]])
        .into_connection();
    let app = build_test_app(db);

    let response = post_json(
        app,
        "/api/contact",
        json!({
            "name": "Jane",
            "email": "jane@example.com",
            "projectDescription": "build a platform",
            "generatedStrategy": "1. STRATEGIC VISION ..."
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    assert_eq!(body["status"], "strategy_generated");
    assert_eq!(body["generatedStrategy"], "1. STRATEGIC VISION ...");
}

#[tokio::test]
async fn repeated_submissions_are_not_deduplicated() {
    let db = mock_db()
        .append_query_results([
            vec![inquiry_row("new", None)],
            vec![inquiry_row("new", None)],
        ])
        .into_connection();
    let app = build_test_app(db.clone());

    let payload = json!({
        "name": "Jane",
        "email": "jane@example.com",
        "projectDescription": "build a platform"
    });

    let first = post_json(app.clone(), "/api/contact", payload.clone()).await;
    let second = post_json(app, "/api/contact", payload).await;
    assert_eq!(first.status(), StatusCode::CREATED);
    assert_eq!(second.status(), StatusCode::CREATED);

    assert_eq!(db.into_transaction_log().len(), 2);
}

#[tokio::test]
async fn store_failure_surfaces_as_server_error() {
    // An exhausted mock fails every statement, standing in for an
    // unreachable store
    let db = mock_db().into_connection();
    let app = build_test_app(db);

    let response = post_json(
        app,
        "/api/contact",
        json!({
            "name": "Jane",
            "email": "jane@example.com",
            "projectDescription": "build a platform"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = body_json(response).await;
    assert_eq!(body["message"], "Internal Server Error");
}
