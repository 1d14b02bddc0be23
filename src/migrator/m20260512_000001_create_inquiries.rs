use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Inquiries::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Inquiries::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Inquiries::Name).string().not_null())
                    .col(ColumnDef::new(Inquiries::Email).string().not_null())
                    .col(ColumnDef::new(Inquiries::Company).string())
                    .col(ColumnDef::new(Inquiries::Industry).string())
                    .col(ColumnDef::new(Inquiries::ProjectDescription).text().not_null())
                    .col(ColumnDef::new(Inquiries::GeneratedStrategy).text())
                    .col(
                        ColumnDef::new(Inquiries::Status)
                            .string()
                            .not_null()
                            .default("new"),
                    )
                    .col(
                        ColumnDef::new(Inquiries::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Inquiries::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Inquiries {
    Table,
    Id,
    Name,
    Email,
    Company,
    Industry,
    ProjectDescription,
    GeneratedStrategy,
    Status,
    CreatedAt,
}
