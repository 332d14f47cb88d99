use sea_orm_migration::prelude::*;

#[derive(DeriveIden)]
enum Gifts {
    Table,
    Id,
    Name,
    Description,
    ImageUrl,
    PurchaseLink,
    IsShared,
    ClaimedBy,
    CreatedAt,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Gifts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Gifts::Id)
                            .string_len(36)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Gifts::Name).text().not_null())
                    .col(ColumnDef::new(Gifts::Description).text().not_null())
                    .col(ColumnDef::new(Gifts::ImageUrl).text().not_null())
                    .col(
                        ColumnDef::new(Gifts::PurchaseLink)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Gifts::IsShared)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Gifts::ClaimedBy)
                            .json_binary()
                            .not_null()
                            .default(Expr::cust("'[]'::jsonb")),
                    )
                    .col(ColumnDef::new(Gifts::CreatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_gifts_created_at")
                    .table(Gifts::Table)
                    .col(Gifts::CreatedAt)
                    .to_owned(),
            )
            .await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().if_exists().table(Gifts::Table).to_owned())
            .await?;
        Ok(())
    }
}
