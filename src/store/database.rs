use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait,
    QueryFilter, TransactionTrait,
};
use tracing::{debug, info, warn};

use super::{DATA_KEY, ExchangeStore, SETUP_KEY, StoredExchange};
use crate::entities::{exchange_slot, prelude::*};
use crate::error::ExchangeResult;

const SETUP_COMPLETE: &str = "true";

/// Slot kept in the `exchange_slot` table, one row per key.
#[derive(Debug, Clone)]
pub struct DbStore {
    db: DatabaseConnection,
}

impl DbStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ExchangeStore for DbStore {
    async fn load(&self) -> ExchangeResult<Option<StoredExchange>> {
        let rows = ExchangeSlot::find()
            .filter(exchange_slot::Column::Name.is_in([DATA_KEY, SETUP_KEY]))
            .all(&self.db)
            .await?;

        let data = rows.iter().find(|row| row.name == DATA_KEY);
        let complete = rows
            .iter()
            .any(|row| row.name == SETUP_KEY && row.value == SETUP_COMPLETE);

        match (data, complete) {
            (Some(row), true) => Ok(Some(StoredExchange {
                encoded: row.value.clone(),
                finalized_at: row.updated_at,
            })),
            (None, false) => Ok(None),
            _ => {
                warn!("exchange slot is only partly written, treating it as not set up");
                Ok(None)
            }
        }
    }

    async fn finalize(&self, encoded: &str) -> ExchangeResult<()> {
        let now = Utc::now().naive_utc();
        let txn = self.db.begin().await?;

        // Dropping `txn` on an early return rolls everything back.
        ExchangeSlot::delete_many()
            .filter(exchange_slot::Column::Name.is_in([DATA_KEY, SETUP_KEY]))
            .exec(&txn)
            .await?;

        for (name, value) in [(DATA_KEY, encoded), (SETUP_KEY, SETUP_COMPLETE)] {
            let row = exchange_slot::ActiveModel {
                name: Set(name.to_string()),
                value: Set(value.to_string()),
                created_at: Set(now),
                updated_at: Set(now),
                ..Default::default()
            };
            debug!("Writing exchange slot {}", name);
            row.insert(&txn).await?;
        }

        txn.commit().await?;
        info!("Exchange finalized");
        Ok(())
    }

    async fn reset(&self) -> ExchangeResult<()> {
        let txn = self.db.begin().await?;
        let deleted = ExchangeSlot::delete_many()
            .filter(exchange_slot::Column::Name.is_in([DATA_KEY, SETUP_KEY]))
            .exec(&txn)
            .await?;
        txn.commit().await?;
        info!("Exchange reset, {} slot row(s) removed", deleted.rows_affected);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::connect_in_memory;

    async fn store() -> DbStore {
        DbStore::new(connect_in_memory().await.unwrap())
    }

    #[tokio::test]
    async fn empty_slot_is_not_set_up() {
        let store = store().await;
        assert_eq!(store.load().await.unwrap(), None);
        assert!(!store.is_setup_complete().await.unwrap());
    }

    #[tokio::test]
    async fn finalize_then_reset() {
        let store = store().await;
        store.finalize("ZW5jb2RlZA==").await.unwrap();

        let stored = store.load().await.unwrap().unwrap();
        assert_eq!(stored.encoded, "ZW5jb2RlZA==");
        assert!(store.is_setup_complete().await.unwrap());

        store.reset().await.unwrap();
        assert_eq!(store.load().await.unwrap(), None);
    }

    #[tokio::test]
    async fn finalize_replaces_previous_payload() {
        let store = store().await;
        store.finalize("first").await.unwrap();
        store.finalize("second").await.unwrap();
        assert_eq!(store.load().await.unwrap().unwrap().encoded, "second");
    }

    #[tokio::test]
    async fn data_without_flag_reads_as_not_set_up() {
        let store = store().await;
        let now = Utc::now().naive_utc();
        exchange_slot::ActiveModel {
            name: Set(DATA_KEY.to_string()),
            value: Set("orphan".to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&store.db)
        .await
        .unwrap();

        assert_eq!(store.load().await.unwrap(), None);
    }
}
