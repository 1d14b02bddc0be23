use axum::{
    extract::{Extension, Json},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
use serde_json::json;
use uuid::Uuid;

use crate::entities::inquiry;

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitInquiryRequest {
    #[serde(default)]
    name: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    company: Option<String>,
    #[serde(default)]
    industry: Option<String>,
    #[serde(default)]
    project_description: String,
    #[serde(default)]
    generated_strategy: Option<String>,
}

/// Email shape check: no whitespace, non-empty local part, domain with a
/// dot. Enforced server-side since client-side validation is bypassable.
pub(crate) fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty() && domain.contains('.') && domain.split('.').all(|part| !part.is_empty())
}

/// New inquiries start as `new`; attaching a non-empty strategy at creation
/// promotes them immediately.
pub(crate) fn status_for(generated_strategy: Option<&str>) -> &'static str {
    if generated_strategy.is_some_and(|s| !s.is_empty()) {
        inquiry::STATUS_STRATEGY_GENERATED
    } else {
        inquiry::STATUS_NEW
    }
}

pub async fn submit_inquiry(
    Extension(db): Extension<DatabaseConnection>,
    Json(payload): Json<SubmitInquiryRequest>,
) -> Response {
    if payload.name.trim().is_empty()
        || payload.email.trim().is_empty()
        || payload.project_description.trim().is_empty()
    {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "message": "Missing required fields" })),
        )
            .into_response();
    }
    if !is_valid_email(&payload.email) {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "message": "Please provide a valid email address" })),
        )
            .into_response();
    }

    let status = status_for(payload.generated_strategy.as_deref());

    let now = chrono::Utc::now().with_timezone(&chrono::FixedOffset::east_opt(0).unwrap());
    let new_inquiry = inquiry::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(payload.name),
        email: Set(payload.email),
        company: Set(payload.company),
        industry: Set(payload.industry),
        project_description: Set(payload.project_description),
        generated_strategy: Set(payload.generated_strategy),
        status: Set(status.to_string()),
        created_at: Set(now),
    };

    match new_inquiry.insert(&db).await {
        Ok(record) => {
            crate::metrics::increment_inquiries();
            (StatusCode::CREATED, Json(record)).into_response()
        }
        Err(e) => {
            tracing::error!("Contact API error: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "message": "Internal Server Error", "error": e.to_string() })),
            )
                .into_response()
        }
    }
}
