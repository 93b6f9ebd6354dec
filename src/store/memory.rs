use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::{ExchangeStore, StoredExchange};
use crate::error::ExchangeResult;

/// Process-local slot, for tests and embedders without a database.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slot: RwLock<Option<StoredExchange>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ExchangeStore for MemoryStore {
    async fn load(&self) -> ExchangeResult<Option<StoredExchange>> {
        Ok(self.slot.read().await.clone())
    }

    async fn finalize(&self, encoded: &str) -> ExchangeResult<()> {
        *self.slot.write().await = Some(StoredExchange {
            encoded: encoded.to_string(),
            finalized_at: Utc::now().naive_utc(),
        });
        Ok(())
    }

    async fn reset(&self) -> ExchangeResult<()> {
        *self.slot.write().await = None;
        Ok(())
    }
}
