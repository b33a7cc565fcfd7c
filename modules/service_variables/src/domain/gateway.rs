//! Resilient store gateway
//!
//! Maps a namespace's fields onto its physical hash key, executes reads
//! under the configured failure policy and keeps the per-namespace
//! last-known-value cache. Writes and deletes are never policy-shielded:
//! only reads degrade.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::contract::{FailurePolicy, VariablesError, DEFAULT_STORAGE_KEY};
use crate::domain::store::HashStore;

/// Derive the physical storage key for an optional namespace suffix
pub(crate) fn storage_key(suffix: Option<&str>) -> String {
    match suffix {
        Some(suffix) => format!("{DEFAULT_STORAGE_KEY}:{suffix}"),
        None => DEFAULT_STORAGE_KEY.to_string(),
    }
}

/// Gateway bound to one configured namespace.
///
/// Built exclusively by `Namespace::configure`; a re-configure swaps in a
/// fresh gateway, which is what wipes the last-known-value cache.
pub(crate) struct StoreGateway {
    store: Arc<dyn HashStore>,
    storage_key: String,
    default_policy: FailurePolicy,
    last_known: Mutex<HashMap<String, String>>,
}

impl StoreGateway {
    pub(crate) fn new(
        store: Arc<dyn HashStore>,
        key_suffix: Option<&str>,
        default_policy: FailurePolicy,
    ) -> Self {
        Self {
            store,
            storage_key: storage_key(key_suffix),
            default_policy,
            last_known: Mutex::new(HashMap::new()),
        }
    }

    pub(crate) fn default_policy(&self) -> FailurePolicy {
        self.default_policy
    }

    pub(crate) fn storage_key(&self) -> &str {
        &self.storage_key
    }

    /// Read the raw string for `field`, degrading per `policy` when the
    /// store is unreachable.
    pub(crate) async fn read(
        &self,
        field: &str,
        policy: FailurePolicy,
    ) -> Result<Option<String>, VariablesError> {
        match self.store.hash_get(&self.storage_key, field).await {
            Ok(Some(value)) => {
                self.last_known
                    .lock()
                    .insert(field.to_string(), value.clone());
                Ok(Some(value))
            }
            Ok(None) => {
                // The cache tracks the store: a field deleted elsewhere
                // must not resurrect from this process's cache.
                self.last_known.lock().remove(field);
                Ok(None)
            }
            Err(err) => match policy {
                FailurePolicy::Raise => Err(err.into()),
                FailurePolicy::UseDefault => {
                    tracing::warn!("store unreachable reading `{field}`, using default: {err}");
                    Ok(None)
                }
                FailurePolicy::UseLastValue => {
                    let cached = self.last_known.lock().get(field).cloned();
                    tracing::warn!(
                        "store unreachable reading `{field}`, using last known value: {err}"
                    );
                    Ok(cached)
                }
            },
        }
    }

    /// Persist the raw string for `field`
    pub(crate) async fn write(&self, field: &str, value: &str) -> Result<(), VariablesError> {
        self.store.hash_set(&self.storage_key, field, value).await?;
        self.last_known
            .lock()
            .insert(field.to_string(), value.to_string());
        tracing::debug!("wrote `{field}` to {}", self.storage_key);
        Ok(())
    }

    /// Remove `field` from the hash
    pub(crate) async fn delete(&self, field: &str) -> Result<(), VariablesError> {
        self.store.hash_delete(&self.storage_key, field).await?;
        self.last_known.lock().remove(field);
        tracing::debug!("deleted `{field}` from {}", self.storage_key);
        Ok(())
    }
}
