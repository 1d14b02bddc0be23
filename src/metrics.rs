use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait};

use crate::entities::{inquiry, video_asset, visual};

/// Seeds the domain gauges from current row counts so dashboards start at
/// the truth instead of zero after a restart.
pub async fn init_metrics(db: &DatabaseConnection) {
    let inquiry_count = inquiry::Entity::find().count(db).await.unwrap_or(0);
    metrics::gauge!("infinity_inquiries_total").set(inquiry_count as f64);

    let visual_count = visual::Entity::find().count(db).await.unwrap_or(0);
    metrics::gauge!("infinity_visuals_total").set(visual_count as f64);

    let asset_count = video_asset::Entity::find().count(db).await.unwrap_or(0);
    metrics::gauge!("infinity_video_assets_total").set(asset_count as f64);

    tracing::info!(
        "Initialized metrics: Inquiries={}, Visuals={}, VideoAssets={}",
        inquiry_count,
        visual_count,
        asset_count
    );
}

pub fn increment_inquiries() {
    metrics::gauge!("infinity_inquiries_total").increment(1.0);
}

pub fn increment_visuals() {
    metrics::gauge!("infinity_visuals_total").increment(1.0);
}

pub fn increment_video_assets() {
    metrics::gauge!("infinity_video_assets_total").increment(1.0);
}
