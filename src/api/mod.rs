use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Extension, Router,
};
use google_cloud_storage::client::Client as GcsClient;
use sea_orm::DatabaseConnection;

use crate::gemini::GeminiClient;

pub mod inquiry;
pub mod strategy;
pub mod video;
pub mod visual;

async fn health_check() -> &'static str {
    "OK"
}

/// Builds the application router with its shared clients injected. The
/// binary layers telemetry, metrics and CORS on top; tests drive this
/// router directly.
pub fn router(db: DatabaseConnection, gemini: GeminiClient, gcs: GcsClient) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/contact", post(inquiry::submit_inquiry))
        .route(
            "/api/strategies",
            get(strategy::list_recent_strategies).post(strategy::persist_strategy_sample),
        )
        .route(
            "/api/visuals",
            get(visual::list_visuals).post(visual::persist_visual),
        )
        .route("/api/video-url", get(video::resolve_video_url))
        .route("/api/upload-video", post(video::upload_video))
        .route("/api/advisor/strategy", post(strategy::draft_strategy))
        .route("/api/studio/visual", post(visual::synthesize_visual))
        .layer(Extension(db))
        .layer(Extension(gemini))
        .layer(Extension(gcs))
        // Generous cap so the 15MB upload rule is enforced by the handler
        // with a readable message rather than a bare 413
        .layer(DefaultBodyLimit::max(64 * 1024 * 1024))
}
