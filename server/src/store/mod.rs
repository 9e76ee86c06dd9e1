// forkful_server/src/store/mod.rs

//! Key-value persistence behind the gateway.
//!
//! Records are JSON values under string keys (see [`keys`]). Writes are full
//! overwrites or insert-if-absent; there are no multi-key transactions.

pub mod keys;
pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

pub use keys::KeyClock;
pub use memory::MemoryStore;
pub use postgres::PgStore;

#[derive(Debug, Error)]
pub enum StoreError {
  #[error("Database error: {0}")]
  Sqlx(#[from] sqlx::Error),

  #[error("Record could not be (de)serialized: {0}")]
  Serde(#[from] serde_json::Error),
}

#[async_trait]
pub trait KvStore: Send + Sync {
  /// Upsert; an existing value is replaced.
  async fn set(&self, key: &str, value: Value) -> Result<(), StoreError>;

  /// Inserts only if `key` is unused. Returns `false` and leaves the stored
  /// value alone when the key already exists.
  async fn set_if_absent(&self, key: &str, value: Value) -> Result<bool, StoreError>;

  async fn get(&self, key: &str) -> Result<Option<Value>, StoreError>;

  /// Every value whose key starts with `prefix`, in key order.
  async fn get_by_prefix(&self, prefix: &str) -> Result<Vec<Value>, StoreError>;

  /// Removes a key. Missing keys are not an error.
  async fn delete(&self, key: &str) -> Result<(), StoreError>;
}

pub async fn put_json<V: Serialize + Sync>(store: &dyn KvStore, key: &str, value: &V) -> Result<(), StoreError> {
  store.set(key, serde_json::to_value(value)?).await
}

pub async fn put_json_if_absent<V: Serialize + Sync>(
  store: &dyn KvStore,
  key: &str,
  value: &V,
) -> Result<bool, StoreError> {
  store.set_if_absent(key, serde_json::to_value(value)?).await
}

pub async fn get_json<V: DeserializeOwned>(store: &dyn KvStore, key: &str) -> Result<Option<V>, StoreError> {
  match store.get(key).await? {
    Some(value) => Ok(Some(serde_json::from_value(value)?)),
    None => Ok(None),
  }
}

pub async fn scan_json<V: DeserializeOwned>(store: &dyn KvStore, prefix: &str) -> Result<Vec<V>, StoreError> {
  store
    .get_by_prefix(prefix)
    .await?
    .into_iter()
    .map(|value| serde_json::from_value(value).map_err(StoreError::from))
    .collect()
}
