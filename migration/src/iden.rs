use sea_orm_migration::prelude::*;

// Define table names
#[derive(DeriveIden)]
pub enum ExchangeSlot {
    Table,
    Id,
    Name,
    Value,
}
