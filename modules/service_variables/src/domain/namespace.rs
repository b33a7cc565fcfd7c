//! Namespace orchestration
//!
//! A `Namespace` groups declared options that share one storage location
//! and one store handle. It is an explicit value: callers construct it,
//! configure it and pass clones around instead of relying on ambient
//! global state. Cloning is cheap and clones observe the same state.

use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::RwLock;

use crate::config::NamespaceConfig;
use crate::contract::{FailurePolicy, OptionSpec, OptionValue, VariablesError};
use crate::domain::accessor::{
    BoolOptionBuilder, FloatOptionBuilder, IntOptionBuilder, StringOptionBuilder,
};
use crate::domain::codec;
use crate::domain::gateway::StoreGateway;
use crate::domain::store::HashStore;
use crate::domain::validation;

/// Handle to a group of typed service variables sharing one storage
/// location and one store handle
#[derive(Clone, Default)]
pub struct Namespace {
    inner: Arc<Inner>,
}

#[derive(Default)]
struct Inner {
    /// `None` until `configure`; every read/write fails until then
    gateway: RwLock<Option<Arc<StoreGateway>>>,
    /// Declared options in declaration order
    specs: RwLock<IndexMap<String, Arc<OptionSpec>>>,
}

impl Namespace {
    /// Create an unconfigured namespace.
    ///
    /// Options may be declared right away - declaration never touches the
    /// store - but every read or write fails with `NotConfigured` until
    /// `configure` is called.
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the store handle, storage-key suffix and default failure
    /// policy.
    ///
    /// The failure-policy token is validated before anything else. Calling
    /// this on an already-configured namespace replaces its state
    /// entirely, including the last-known-value cache; declared options
    /// survive.
    pub fn configure(
        &self,
        store: Arc<dyn HashStore>,
        config: NamespaceConfig,
    ) -> Result<(), VariablesError> {
        let policy: FailurePolicy = config.failure_policy.parse()?;
        let gateway = StoreGateway::new(store, config.key_suffix.as_deref(), policy);
        tracing::debug!(
            "namespace configured for `{}` with default policy {policy}",
            gateway.storage_key()
        );
        *self.inner.gateway.write() = Some(Arc::new(gateway));
        Ok(())
    }

    /// Whether a store handle has been configured
    pub fn is_configured(&self) -> bool {
        self.inner.gateway.read().is_some()
    }

    /// Register a declarative option spec.
    ///
    /// Fails with `InvalidDefinition` when the name is already declared,
    /// the constraints are self-contradictory, or the default does not
    /// match the declared kind. No store access occurs.
    pub fn declare(&self, spec: OptionSpec) -> Result<(), VariablesError> {
        validation::check_schema(&spec.schema)?;
        if let Some(default) = &spec.default {
            validation::check_default(&spec.schema, default)?;
        }
        let mut specs = self.inner.specs.write();
        if specs.contains_key(&spec.name) {
            return Err(VariablesError::definition(format!(
                "option `{}` already declared",
                spec.name
            )));
        }
        specs.insert(spec.name.clone(), Arc::new(spec));
        Ok(())
    }

    /// Start declaring a boolean option
    pub fn boolean(&self, name: impl Into<String>) -> BoolOptionBuilder {
        BoolOptionBuilder::new(self.clone(), name.into())
    }

    /// Start declaring an integer option
    pub fn integer(&self, name: impl Into<String>) -> IntOptionBuilder {
        IntOptionBuilder::new(self.clone(), name.into())
    }

    /// Start declaring a float option
    pub fn float(&self, name: impl Into<String>) -> FloatOptionBuilder {
        FloatOptionBuilder::new(self.clone(), name.into())
    }

    /// Start declaring a string option
    pub fn string(&self, name: impl Into<String>) -> StringOptionBuilder {
        StringOptionBuilder::new(self.clone(), name.into())
    }

    /// Names of the declared options, in declaration order
    pub fn option_names(&self) -> Vec<String> {
        self.inner.specs.read().keys().cloned().collect()
    }

    /// Read an option under its effective failure policy.
    ///
    /// An absent field yields the declared default, which may itself be
    /// `None`. Stored values are decoded, never re-validated.
    pub async fn get(&self, name: &str) -> Result<Option<OptionValue>, VariablesError> {
        let spec = self.spec(name)?;
        let gateway = self.gateway()?;
        let policy = spec.failure_policy.unwrap_or(gateway.default_policy());
        match gateway.read(&spec.name, policy).await? {
            Some(raw) => codec::decode(spec.schema.kind(), &raw, &spec.name).map(Some),
            None => Ok(spec.default.clone()),
        }
    }

    /// Validate and persist an option value.
    ///
    /// Validation completes fully before the store is touched, and a
    /// connectivity failure is propagated regardless of failure policy.
    pub async fn set(
        &self,
        name: &str,
        value: impl Into<OptionValue>,
    ) -> Result<(), VariablesError> {
        let spec = self.spec(name)?;
        let accepted = validation::coerce(&spec.schema, value.into())?;
        let gateway = self.gateway()?;
        gateway.write(&spec.name, &codec::encode(&accepted)).await
    }

    /// Delete an option's stored field; subsequent reads yield the
    /// declared default again
    pub async fn unset(&self, name: &str) -> Result<(), VariablesError> {
        let spec = self.spec(name)?;
        let gateway = self.gateway()?;
        gateway.delete(&spec.name).await
    }

    fn spec(&self, name: &str) -> Result<Arc<OptionSpec>, VariablesError> {
        self.inner
            .specs
            .read()
            .get(name)
            .cloned()
            .ok_or_else(|| VariablesError::UnknownOption {
                name: name.to_string(),
            })
    }

    fn gateway(&self) -> Result<Arc<StoreGateway>, VariablesError> {
        self.inner
            .gateway
            .read()
            .clone()
            .ok_or(VariablesError::NotConfigured)
    }
}
