//! Process-local hash store
//!
//! Keeps the hashes in memory behind a lock. Used by the test suite and
//! by embedders that want the accessor layer without a remote store.
//! Clones share the same underlying data.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::contract::StoreError;
use crate::domain::store::HashStore;

/// In-memory `HashStore` implementation
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    hashes: Arc<RwLock<HashMap<String, HashMap<String, String>>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Direct peek at a stored field, bypassing the gateway
    pub fn field(&self, key: &str, field: &str) -> Option<String> {
        self.hashes.read().get(key).and_then(|h| h.get(field).cloned())
    }

    /// Number of fields stored under `key`
    pub fn field_count(&self, key: &str) -> usize {
        self.hashes.read().get(key).map(|h| h.len()).unwrap_or(0)
    }

    /// Drop every stored hash
    pub fn flush_all(&self) {
        self.hashes.write().clear();
    }
}

#[async_trait]
impl HashStore for InMemoryStore {
    async fn hash_get(&self, key: &str, field: &str) -> Result<Option<String>, StoreError> {
        Ok(self.field(key, field))
    }

    async fn hash_set(&self, key: &str, field: &str, value: &str) -> Result<(), StoreError> {
        self.hashes
            .write()
            .entry(key.to_string())
            .or_default()
            .insert(field.to_string(), value.to_string());
        Ok(())
    }

    async fn hash_delete(&self, key: &str, field: &str) -> Result<(), StoreError> {
        if let Some(hash) = self.hashes.write().get_mut(key) {
            hash.remove(field);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn set_get_delete_round_trip() {
        let store = InMemoryStore::new();
        store.hash_set("key", "field", "value").await.expect("set");
        assert_eq!(
            store.hash_get("key", "field").await.expect("get").as_deref(),
            Some("value")
        );

        store.hash_delete("key", "field").await.expect("delete");
        assert_eq!(store.hash_get("key", "field").await.expect("get"), None);
    }

    #[tokio::test]
    async fn hashes_are_isolated_by_key() {
        let store = InMemoryStore::new();
        store.hash_set("key_a", "field", "a").await.expect("set");
        store.hash_set("key_b", "field", "b").await.expect("set");
        assert_eq!(store.field("key_a", "field").as_deref(), Some("a"));
        assert_eq!(store.field("key_b", "field").as_deref(), Some("b"));
        assert_eq!(store.field_count("key_a"), 1);
    }

    #[tokio::test]
    async fn clones_share_the_same_data() {
        let store = InMemoryStore::new();
        let clone = store.clone();
        store.hash_set("key", "field", "value").await.expect("set");
        assert_eq!(clone.field("key", "field").as_deref(), Some("value"));

        clone.flush_all();
        assert_eq!(store.field_count("key"), 0);
    }

    #[tokio::test]
    async fn deleting_an_absent_field_is_a_no_op() {
        let store = InMemoryStore::new();
        store.hash_delete("key", "field").await.expect("delete");
        assert_eq!(store.hash_get("key", "field").await.expect("get"), None);
    }
}
