//! Key-value store abstraction for Corkboard.
//!
//! All persistent state lives in a flat string-keyed store. This module
//! defines the operations the board layer needs from it and the backends
//! that provide them:
//!
//! - [`MemoryStore`]: in-process map, for tests and throwaway runs
//! - [`SqliteStore`]: a single `kv` table through sqlx (feature `sqlite`)
//! - [`RedisStore`]: a Redis server (feature `redis`)
//!
//! The store carries no knowledge of key layout; see `board::keys`.

mod memory;
#[cfg(feature = "redis")]
mod redis_store;
#[cfg(feature = "sqlite")]
mod schema;
#[cfg(feature = "sqlite")]
mod sqlite;

pub use memory::MemoryStore;
#[cfg(feature = "redis")]
pub use redis_store::RedisStore;
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteStore;

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::config::{StoreBackend, StoreConfig};
use crate::{CorkboardError, Result};

/// Operations against a flat string-keyed store.
///
/// Implementations must be safe to share between request handlers.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Short backend name for logs.
    fn backend_name(&self) -> &'static str;

    /// Atomically increment the counter at `counter` and return the new value.
    ///
    /// A counter that does not exist yet starts from 0, so the first call
    /// returns 1. Never returns the same value twice for a given counter.
    async fn allocate_id(&self, counter: &str) -> Result<i64>;

    /// Set `key` to `value`, replacing any previous value.
    async fn put(&self, key: &str, value: &str) -> Result<()>;

    /// Set several keys at once.
    ///
    /// Backends apply the batch atomically where they can; the default
    /// implementation writes the entries one by one.
    async fn put_all(&self, entries: &[(String, String)]) -> Result<()> {
        for (key, value) in entries {
            self.put(key, value).await?;
        }
        Ok(())
    }

    /// Get the value stored at `key`.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// List every key starting with `prefix`, in no particular order.
    async fn scan(&self, prefix: &str) -> Result<Vec<String>>;
}

/// Store handle shared across the application.
pub type SharedStore = Arc<dyn KeyValueStore>;

/// Open the store selected by the configuration.
pub async fn open(config: &StoreConfig) -> Result<SharedStore> {
    info!("Opening {} store", config.backend.as_str());

    match config.backend {
        StoreBackend::Memory => Ok(Arc::new(MemoryStore::new())),
        StoreBackend::Sqlite => open_sqlite(config).await,
        StoreBackend::Redis => open_redis(config).await,
    }
}

#[cfg(feature = "sqlite")]
async fn open_sqlite(config: &StoreConfig) -> Result<SharedStore> {
    Ok(Arc::new(SqliteStore::open(&config.path).await?))
}

#[cfg(not(feature = "sqlite"))]
async fn open_sqlite(_config: &StoreConfig) -> Result<SharedStore> {
    Err(CorkboardError::Config(
        "sqlite backend requires the `sqlite` feature".to_string(),
    ))
}

#[cfg(feature = "redis")]
async fn open_redis(config: &StoreConfig) -> Result<SharedStore> {
    Ok(Arc::new(RedisStore::connect(&config.redis_url).await?))
}

#[cfg(not(feature = "redis"))]
async fn open_redis(_config: &StoreConfig) -> Result<SharedStore> {
    Err(CorkboardError::Config(
        "redis backend requires the `redis` feature".to_string(),
    ))
}

/// Parse a stored counter value.
pub(crate) fn parse_counter(counter: &str, raw: &str) -> Result<i64> {
    raw.parse::<i64>().map_err(|_| {
        CorkboardError::Store(format!(
            "counter {counter} holds a non-integer value: {raw:?}"
        ))
    })
}
