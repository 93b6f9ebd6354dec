use sea_orm_migration::{prelude::*, schema::*};

use crate::iden::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // One row per named value: the encoded lookup table and the setup flag.
        let table = table_auto(ExchangeSlot::Table)
            .col(pk_auto(ExchangeSlot::Id))
            .col(string_uniq(ExchangeSlot::Name))
            .col(text(ExchangeSlot::Value))
            .to_owned();
        manager.create_table(table).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ExchangeSlot::Table).to_owned())
            .await?;

        Ok(())
    }
}
