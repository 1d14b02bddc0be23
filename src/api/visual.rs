use axum::{
    extract::{Extension, Json},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, QuerySelect, Set,
};
use serde_json::json;
use uuid::Uuid;

use crate::entities::visual;
use crate::gemini::{AspectRatio, GeminiClient, GeminiError, VisualRequest};

/// Listing projection: the newest 12 visuals, never paginated further.
fn recent_visuals() -> sea_orm::Select<visual::Entity> {
    visual::Entity::find()
        .order_by_desc(visual::Column::CreatedAt)
        .limit(12)
}

pub async fn list_visuals(Extension(db): Extension<DatabaseConnection>) -> Response {
    match recent_visuals().all(&db).await {
        Ok(records) => (StatusCode::OK, Json(records)).into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "message": "Failed to fetch visuals", "error": e.to_string() })),
        )
            .into_response(),
    }
}

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistVisualRequest {
    #[serde(default)]
    prompt: String,
    #[serde(default)]
    aspect_ratio: AspectRatio,
    #[serde(default)]
    image_data: String,
}

pub async fn persist_visual(
    Extension(db): Extension<DatabaseConnection>,
    Json(payload): Json<PersistVisualRequest>,
) -> Response {
    if payload.prompt.trim().is_empty() || payload.image_data.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "message": "Missing required visual data" })),
        )
            .into_response();
    }

    let now = chrono::Utc::now().with_timezone(&chrono::FixedOffset::east_opt(0).unwrap());
    let new_visual = visual::ActiveModel {
        id: Set(Uuid::new_v4()),
        prompt: Set(payload.prompt),
        aspect_ratio: Set(payload.aspect_ratio.as_str().to_string()),
        image_data: Set(payload.image_data),
        created_at: Set(now),
    };

    match new_visual.insert(&db).await {
        Ok(record) => {
            crate::metrics::increment_visuals();
            (StatusCode::CREATED, Json(record)).into_response()
        }
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "message": "Internal Server Error", "error": e.to_string() })),
        )
            .into_response(),
    }
}

/// Studio endpoint. Propagates the adapter's typed failure so the client
/// can branch between re-authentication and a generic retry.
pub async fn synthesize_visual(
    Extension(gemini): Extension<GeminiClient>,
    Json(payload): Json<VisualRequest>,
) -> Response {
    if payload.prompt.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "message": "Missing required fields" })),
        )
            .into_response();
    }

    match gemini.generate_visual(&payload).await {
        Ok(image_data) => (StatusCode::OK, Json(json!({ "imageData": image_data }))).into_response(),
        Err(GeminiError::KeyResetRequired) => (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "message": "KEY_RESET_REQUIRED" })),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("AI visual generator failure: {}", e);
            (
                StatusCode::BAD_GATEWAY,
                Json(json!({ "message": e.to_string() })),
            )
                .into_response()
        }
    }
}
