use axum::{
    extract::{Extension, Multipart},
    http::StatusCode,
    Json,
};
use google_cloud_storage::client::Client as GcsClient;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, Set,
};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::entities::{setting, video_asset};
use crate::storage;

/// Final tier of the background-video resolution chain. Single definition;
/// the handlers and tests both reference it.
pub const PUBLIC_FALLBACK_VIDEO_URL: &str = "https://assets.mixkit.co/videos/preview/mixkit-abstract-technology-connection-lines-in-the-air-40019-large.mp4";

pub const MAX_VIDEO_BYTES: usize = 15 * 1024 * 1024;

/// Resolves the active background video URL: settings override first, then
/// the newest active asset, then the CDN literal. Store errors fall through
/// to the next tier, so this endpoint always answers 200 with a usable URL.
pub async fn resolve_video_url(Extension(db): Extension<DatabaseConnection>) -> Json<Value> {
    if let Ok(Some(config)) = setting::Entity::find().one(&db).await {
        if !config.background_video_url.is_empty() {
            return Json(json!({ "url": config.background_video_url }));
        }
    }

    if let Ok(Some(asset)) = video_asset::Entity::find()
        .filter(video_asset::Column::IsActive.eq(true))
        .order_by_desc(video_asset::Column::CreatedAt)
        .one(&db)
        .await
    {
        if !asset.url.is_empty() {
            return Json(json!({ "url": asset.url }));
        }
    }

    Json(json!({ "url": PUBLIC_FALLBACK_VIDEO_URL }))
}

type UploadError = (StatusCode, Json<Value>);

fn upload_err(status: StatusCode, message: impl Into<String>) -> UploadError {
    (status, Json(json!({ "error": message.into() })))
}

/// Accepts one multipart `video` field, uploads it to the media store,
/// activates it in the asset registry and syncs the settings override.
///
/// The deactivate-all/insert-active pair is deliberately not transactional:
/// a crash in between leaves zero active assets, and the resolution chain
/// falls through to its next tier.
pub async fn upload_video(
    Extension(db): Extension<DatabaseConnection>,
    Extension(gcs): Extension<GcsClient>,
    mut multipart: Multipart,
) -> Result<Json<Value>, UploadError> {
    let bucket = std::env::var("GCS_BUCKET_NAME").map_err(|_| {
        upload_err(
            StatusCode::INTERNAL_SERVER_ERROR,
            "GCS_BUCKET_NAME not set",
        )
    })?;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| upload_err(StatusCode::BAD_REQUEST, e.to_string()))?
    {
        if field.name() != Some("video") {
            continue;
        }

        let file_name = field.file_name().unwrap_or("background.mp4").to_string();
        let declared_type = field.content_type().map(|s| s.to_string());
        let data = field
            .bytes()
            .await
            .map_err(|e| upload_err(StatusCode::BAD_REQUEST, e.to_string()))?;

        if data.is_empty() {
            return Err(upload_err(
                StatusCode::BAD_REQUEST,
                "No valid video file provided",
            ));
        }
        if data.len() > MAX_VIDEO_BYTES {
            return Err(upload_err(
                StatusCode::BAD_REQUEST,
                "Video too large (max 15MB)",
            ));
        }

        let content_type = declared_type
            .unwrap_or_else(|| mime_guess::from_path(&file_name).first_or_octet_stream().to_string());
        let is_video = content_type
            .parse::<mime::Mime>()
            .map(|m| m.type_() == mime::VIDEO)
            .unwrap_or(false);
        if !is_video {
            return Err(upload_err(
                StatusCode::BAD_REQUEST,
                "Invalid file type. Please upload an MP4 video.",
            ));
        }

        let file_size = data.len() as i64;
        let uploaded = storage::upload_background_video(&gcs, &bucket, &file_name, &content_type, data)
            .await
            .map_err(|e| {
                tracing::error!("Media store upload failed: {}", e);
                upload_err(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Upload failed: {}", e),
                )
            })?;

        // Deactivate every prior asset before inserting the new active one
        video_asset::Entity::update_many()
            .col_expr(video_asset::Column::IsActive, Expr::value(false))
            .filter(video_asset::Column::IsActive.eq(true))
            .exec(&db)
            .await
            .map_err(|e| {
                upload_err(StatusCode::INTERNAL_SERVER_ERROR, format!("DB Error: {}", e))
            })?;

        let now = chrono::Utc::now().with_timezone(&chrono::FixedOffset::east_opt(0).unwrap());
        let new_asset = video_asset::ActiveModel {
            id: Set(Uuid::new_v4()),
            url: Set(uploaded.url.clone()),
            public_id: Set(uploaded.object_name.clone()),
            file_name: Set(Some(file_name)),
            file_size: Set(Some(file_size)),
            mime_type: Set(content_type),
            is_active: Set(true),
            created_at: Set(now),
        };
        let saved_asset = new_asset.insert(&db).await.map_err(|e| {
            upload_err(StatusCode::INTERNAL_SERVER_ERROR, format!("DB Error: {}", e))
        })?;

        crate::metrics::increment_video_assets();

        // Sync the settings override so the new background propagates on
        // the next resolution read
        let existing = setting::Entity::find().one(&db).await.map_err(|e| {
            upload_err(StatusCode::INTERNAL_SERVER_ERROR, format!("DB Error: {}", e))
        })?;
        match existing {
            Some(config) => {
                let mut active = config.into_active_model();
                active.background_video_url = Set(uploaded.url.clone());
                active.updated_at = Set(now);
                active.update(&db).await.map_err(|e| {
                    upload_err(StatusCode::INTERNAL_SERVER_ERROR, format!("DB Error: {}", e))
                })?;
            }
            None => {
                let config = setting::ActiveModel {
                    id: Set(Uuid::new_v4()),
                    background_video_url: Set(uploaded.url.clone()),
                    updated_at: Set(now),
                };
                config.insert(&db).await.map_err(|e| {
                    upload_err(StatusCode::INTERNAL_SERVER_ERROR, format!("DB Error: {}", e))
                })?;
            }
        }

        return Ok(Json(json!({
            "url": uploaded.url,
            "message": "Experience background updated successfully",
            "assetId": saved_asset.id
        })));
    }

    Err(upload_err(
        StatusCode::BAD_REQUEST,
        "No valid video file provided",
    ))
}
