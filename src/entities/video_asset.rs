use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Registry entry for one uploaded background video. Invariant: at most one
/// row has `is_active = true`, maintained by unsetting the flag on every row
/// before inserting the new active one.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "video_assets")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    #[serde(skip_deserializing)]
    pub id: Uuid,
    pub url: String,
    // Object name inside the media store, kept for later cleanup
    pub public_id: String,
    pub file_name: Option<String>,
    pub file_size: Option<i64>,
    pub mime_type: String,
    pub is_active: bool,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
