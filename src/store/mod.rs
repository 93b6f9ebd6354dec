use async_trait::async_trait;
use chrono::NaiveDateTime;

use crate::error::ExchangeResult;

mod database;
mod memory;

pub use database::DbStore;
pub use memory::MemoryStore;

/// Key holding the encoded lookup table.
pub const DATA_KEY: &str = "secretSantaData";
/// Key holding the "setup complete" flag.
pub const SETUP_KEY: &str = "secretSantaSetup";

/// A finalized exchange as it sits in the local slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredExchange {
    pub encoded: String,
    pub finalized_at: NaiveDateTime,
}

/// The single named slot behind an exchange.
///
/// `finalize` writes the encoded table and the setup flag together and
/// `reset` clears both; no caller can observe one without the other.
#[async_trait]
pub trait ExchangeStore: Send + Sync {
    /// `None` when nothing has been set up, which is not an error.
    async fn load(&self) -> ExchangeResult<Option<StoredExchange>>;

    async fn finalize(&self, encoded: &str) -> ExchangeResult<()>;

    async fn reset(&self) -> ExchangeResult<()>;

    async fn is_setup_complete(&self) -> ExchangeResult<bool> {
        Ok(self.load().await?.is_some())
    }
}
