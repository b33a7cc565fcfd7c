//! Store boundary trait
//!
//! The gateway talks to the backing store through this trait.
//! Implementations are in infra/storage.

use crate::contract::StoreError;
use async_trait::async_trait;

/// Hash-field key/value store.
///
/// `hash_get` answers `Ok(None)` for an absent field; a `StoreError` means
/// the store could not be reached. The two must stay distinguishable for
/// the failure policies to work. Connection pooling, timeouts and retries
/// are the implementation's concern - this layer never retries.
#[async_trait]
pub trait HashStore: Send + Sync {
    /// Fetch the raw string stored for `field` under `key`
    async fn hash_get(&self, key: &str, field: &str) -> Result<Option<String>, StoreError>;

    /// Store the raw string for `field` under `key`
    async fn hash_set(&self, key: &str, field: &str, value: &str) -> Result<(), StoreError>;

    /// Remove `field` from the hash under `key`
    async fn hash_delete(&self, key: &str, field: &str) -> Result<(), StoreError>;
}
