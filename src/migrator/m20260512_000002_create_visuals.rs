use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Visuals::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Visuals::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Visuals::Prompt).text().not_null())
                    .col(
                        ColumnDef::new(Visuals::AspectRatio)
                            .string()
                            .not_null()
                            .default("16:9"),
                    )
                    // Base64 data URIs run large, so this goes in a text column
                    .col(ColumnDef::new(Visuals::ImageData).text().not_null())
                    .col(
                        ColumnDef::new(Visuals::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Visuals::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Visuals {
    Table,
    Id,
    Prompt,
    AspectRatio,
    ImageData,
    CreatedAt,
}
