use sea_orm_migration::prelude::*;

#[derive(DeriveIden)]
enum Gifts {
    Table,
    ImageUrls,
    PurchaseLinks,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // extra photos and shop links; NULL when the admin left them blank
        manager
            .alter_table(
                Table::alter()
                    .table(Gifts::Table)
                    .add_column_if_not_exists(ColumnDef::new(Gifts::ImageUrls).json_binary().null())
                    .add_column_if_not_exists(
                        ColumnDef::new(Gifts::PurchaseLinks).json_binary().null(),
                    )
                    .to_owned(),
            )
            .await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .alter_table(
                Table::alter()
                    .table(Gifts::Table)
                    .drop_column(Gifts::ImageUrls)
                    .drop_column(Gifts::PurchaseLinks)
                    .to_owned(),
            )
            .await?;
        Ok(())
    }
}
