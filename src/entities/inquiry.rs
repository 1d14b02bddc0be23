use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Inquiry lifecycle states. `strategy_generated` is set automatically when
/// a strategy text is attached at creation time.
pub const STATUS_NEW: &str = "new";
pub const STATUS_CONTACTED: &str = "contacted";
pub const STATUS_RESOLVED: &str = "resolved";
pub const STATUS_STRATEGY_GENERATED: &str = "strategy_generated";

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "inquiries")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    #[serde(skip_deserializing)]
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub company: Option<String>,
    pub industry: Option<String>,
    #[sea_orm(column_type = "Text")]
    pub project_description: String,
    // Markdown/text output from the advisor, attached at creation only
    #[sea_orm(column_type = "Text", nullable)]
    pub generated_strategy: Option<String>,
    pub status: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
