// forkful_server/src/store/memory.rs

use super::{KvStore, StoreError};
use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::Value;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

/// Process-local store on an ordered map. Used when no database is configured and in tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
  entries: RwLock<BTreeMap<String, Value>>,
}

impl MemoryStore {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn len(&self) -> usize {
    self.entries.read().len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.read().is_empty()
  }

  pub fn keys(&self) -> Vec<String> {
    self.entries.read().keys().cloned().collect()
  }
}

#[async_trait]
impl KvStore for MemoryStore {
  async fn set(&self, key: &str, value: Value) -> Result<(), StoreError> {
    self.entries.write().insert(key.to_string(), value);
    Ok(())
  }

  async fn set_if_absent(&self, key: &str, value: Value) -> Result<bool, StoreError> {
    match self.entries.write().entry(key.to_string()) {
      Entry::Occupied(_) => Ok(false),
      Entry::Vacant(slot) => {
        slot.insert(value);
        Ok(true)
      }
    }
  }

  async fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
    Ok(self.entries.read().get(key).cloned())
  }

  async fn get_by_prefix(&self, prefix: &str) -> Result<Vec<Value>, StoreError> {
    let entries = self.entries.read();
    Ok(
      entries
        .range(prefix.to_string()..)
        .take_while(|(key, _)| key.starts_with(prefix))
        .map(|(_, value)| value.clone())
        .collect(),
    )
  }

  async fn delete(&self, key: &str) -> Result<(), StoreError> {
    self.entries.write().remove(key);
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[tokio::test]
  async fn prefix_scan_stops_at_prefix_boundary() {
    let store = MemoryStore::new();
    store.set("order:a:1", json!(1)).await.unwrap();
    store.set("order:a:2", json!(2)).await.unwrap();
    store.set("order:ab:3", json!(3)).await.unwrap();
    store.set("restaurant:1", json!(4)).await.unwrap();

    let found = store.get_by_prefix("order:a:").await.unwrap();
    assert_eq!(found, vec![json!(1), json!(2)]);
  }

  #[tokio::test]
  async fn set_overwrites_and_delete_removes() {
    let store = MemoryStore::new();
    store.set("k", json!("old")).await.unwrap();
    store.set("k", json!("new")).await.unwrap();
    assert_eq!(store.get("k").await.unwrap(), Some(json!("new")));
    store.delete("k").await.unwrap();
    store.delete("k").await.unwrap();
    assert!(store.is_empty());
  }

  #[tokio::test]
  async fn set_if_absent_keeps_first_value() {
    let store = MemoryStore::new();
    assert!(store.set_if_absent("identity:ada", json!("first")).await.unwrap());
    assert!(!store.set_if_absent("identity:ada", json!("second")).await.unwrap());
    assert_eq!(store.get("identity:ada").await.unwrap(), Some(json!("first")));
  }
}
