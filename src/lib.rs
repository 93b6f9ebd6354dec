pub mod codec;
pub mod config;
pub mod database;
pub mod entities;
pub mod error;
pub mod exchange;
pub mod router;
pub mod routes;
pub mod sheet;
pub mod snapshot;
pub mod source;
pub mod store;

pub use error::{CodecError, ExchangeError, ExchangeResult};
pub use exchange::{LookupTable, SecretCodeEntry};
