use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Settings: singleton override for the active background video
        manager
            .create_table(
                Table::create()
                    .table(Settings::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Settings::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(Settings::BackgroundVideoUrl)
                            .string()
                            .not_null()
                            .default("/videos/bg-optimized.mp4"),
                    )
                    .col(
                        ColumnDef::new(Settings::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Video assets: one row per upload, at most one active
        manager
            .create_table(
                Table::create()
                    .table(VideoAssets::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(VideoAssets::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(VideoAssets::Url).string().not_null())
                    .col(ColumnDef::new(VideoAssets::PublicId).string().not_null())
                    .col(ColumnDef::new(VideoAssets::FileName).string())
                    .col(ColumnDef::new(VideoAssets::FileSize).big_integer())
                    .col(
                        ColumnDef::new(VideoAssets::MimeType)
                            .string()
                            .not_null()
                            .default("video/mp4"),
                    )
                    .col(
                        ColumnDef::new(VideoAssets::IsActive)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(VideoAssets::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(VideoAssets::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Settings::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Settings {
    Table,
    Id,
    BackgroundVideoUrl,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum VideoAssets {
    Table,
    Id,
    Url,
    PublicId,
    FileName,
    FileSize,
    MimeType,
    IsActive,
    CreatedAt,
}
