use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // The strategies listing filters on status and sorts newest-first
        manager
            .create_index(
                Index::create()
                    .name("idx_inquiries_status_created_at")
                    .table(Inquiries::Table)
                    .col(Inquiries::Status)
                    .col(Inquiries::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_visuals_created_at")
                    .table(Visuals::Table)
                    .col(Visuals::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_video_assets_is_active")
                    .table(VideoAssets::Table)
                    .col(VideoAssets::IsActive)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_video_assets_is_active")
                    .table(VideoAssets::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_visuals_created_at")
                    .table(Visuals::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_inquiries_status_created_at")
                    .table(Inquiries::Table)
                    .to_owned(),
            )
            .await
    }
}

#[derive(DeriveIden)]
enum Inquiries {
    Table,
    Status,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Visuals {
    Table,
    CreatedAt,
}

#[derive(DeriveIden)]
enum VideoAssets {
    Table,
    IsActive,
}
