use axum::{
    extract::{Extension, Json},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use serde_json::json;
use uuid::Uuid;

use crate::entities::inquiry;
use crate::gemini::GeminiClient;

/// Strategy samples are stored as anonymous inquiries, matching what the
/// advisor's background sync writes.
#[derive(serde::Deserialize)]
pub struct StrategySampleRequest {
    industry: Option<String>,
    goals: Option<String>,
    strategy: Option<String>,
}

pub async fn persist_strategy_sample(
    Extension(db): Extension<DatabaseConnection>,
    Json(payload): Json<StrategySampleRequest>,
) -> Response {
    let now = chrono::Utc::now().with_timezone(&chrono::FixedOffset::east_opt(0).unwrap());
    let entry = inquiry::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set("AI Advisor User".to_string()),
        email: Set("advisor@infinity.internal".to_string()),
        company: Set(None),
        industry: Set(payload.industry),
        project_description: Set(payload.goals.unwrap_or_default()),
        generated_strategy: Set(payload.strategy),
        status: Set(inquiry::STATUS_STRATEGY_GENERATED.to_string()),
        created_at: Set(now),
    };

    match entry.insert(&db).await {
        Ok(record) => (StatusCode::CREATED, Json(record)).into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "message": e.to_string() })),
        )
            .into_response(),
    }
}

/// Listing projection: the newest 5 generated strategies.
fn recent_strategies() -> sea_orm::Select<inquiry::Entity> {
    inquiry::Entity::find()
        .filter(inquiry::Column::Status.eq(inquiry::STATUS_STRATEGY_GENERATED))
        .order_by_desc(inquiry::Column::CreatedAt)
        .limit(5)
}

pub async fn list_recent_strategies(Extension(db): Extension<DatabaseConnection>) -> Response {
    match recent_strategies().all(&db).await {
        Ok(records) => (StatusCode::OK, Json(records)).into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "message": e.to_string() })),
        )
            .into_response(),
    }
}

#[derive(serde::Deserialize)]
pub struct DraftStrategyRequest {
    #[serde(default)]
    industry: String,
    #[serde(default)]
    goals: String,
}

/// Advisor endpoint. Always answers 200 with a strategy text: upstream
/// failures are absorbed by the adapter's fallback sentence.
pub async fn draft_strategy(
    Extension(db): Extension<DatabaseConnection>,
    Extension(gemini): Extension<GeminiClient>,
    Json(payload): Json<DraftStrategyRequest>,
) -> Response {
    if payload.industry.trim().is_empty() || payload.goals.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "message": "Missing required fields" })),
        )
            .into_response();
    }

    let strategy = gemini
        .generate_strategy(&db, &payload.industry, &payload.goals)
        .await;
    (StatusCode::OK, Json(json!({ "strategy": strategy }))).into_response()
}
