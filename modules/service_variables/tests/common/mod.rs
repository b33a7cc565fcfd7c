//! Shared store fixtures for integration tests

// Not every test binary uses every fixture.
#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use service_variables::{HashStore, InMemoryStore, Namespace, NamespaceConfig, StoreError};

/// Store wrapper that can be switched into a failing state, simulating
/// the backing store becoming unreachable mid-process.
#[derive(Default)]
pub struct FlakyStore {
    inner: InMemoryStore,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl FlakyStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The live data underneath, for direct inspection and seeding
    pub fn inner(&self) -> &InMemoryStore {
        &self.inner
    }

    /// Make every `hash_get` fail with a connectivity error
    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Make every `hash_set` and `hash_delete` fail with a connectivity
    /// error
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl HashStore for FlakyStore {
    async fn hash_get(&self, key: &str, field: &str) -> Result<Option<String>, StoreError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StoreError::connection("simulated outage"));
        }
        self.inner.hash_get(key, field).await
    }

    async fn hash_set(&self, key: &str, field: &str, value: &str) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::connection("simulated outage"));
        }
        self.inner.hash_set(key, field, value).await
    }

    async fn hash_delete(&self, key: &str, field: &str) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::connection("simulated outage"));
        }
        self.inner.hash_delete(key, field).await
    }
}

/// Namespace configured against a fresh flaky store with the given
/// failure-policy token
pub fn namespace_with_policy(policy: &str) -> (Namespace, Arc<FlakyStore>) {
    let store = Arc::new(FlakyStore::new());
    let ns = Namespace::new();
    ns.configure(
        store.clone(),
        NamespaceConfig {
            failure_policy: policy.to_string(),
            ..Default::default()
        },
    )
    .expect("namespace configures");
    (ns, store)
}
