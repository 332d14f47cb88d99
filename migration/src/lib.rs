pub use sea_orm_migration::prelude::*;

mod m20251004_000001_create_gifts;
mod m20251011_000001_add_gift_galleries;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20251004_000001_create_gifts::Migration),
            Box::new(m20251011_000001_add_gift_galleries::Migration),
        ]
    }
}
