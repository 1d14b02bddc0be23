use sea_orm_migration::prelude::*;

mod m20260512_000001_create_inquiries;
mod m20260512_000002_create_visuals;
mod m20260518_000001_create_video_tables;
mod m20260526_000001_add_listing_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260512_000001_create_inquiries::Migration),
            Box::new(m20260512_000002_create_visuals::Migration),
            Box::new(m20260518_000001_create_video_tables::Migration),
            Box::new(m20260526_000001_add_listing_indexes::Migration),
        ]
    }
}
