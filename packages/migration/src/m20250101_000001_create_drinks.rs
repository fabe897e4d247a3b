use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
pub(crate) enum Drinks {
    Table,
    Id,
    Title,
    Recipe,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Drinks::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Drinks::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    // JSON-encoded text; an absent title is stored as `null`
                    .col(ColumnDef::new(Drinks::Title).string_len(80).not_null())
                    .col(ColumnDef::new(Drinks::Recipe).text().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-drinks-title")
                    .table(Drinks::Table)
                    .col(Drinks::Title)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Drinks::Table).if_exists().to_owned())
            .await
    }
}
