//! Service Variables
//!
//! Typed, schema-declared runtime options stored in a shared hash store.
//! An application declares named boolean/integer/float/string variables
//! with defaults, bounds and enumerations, then reads and writes them
//! through generated accessors. Writes are validated before anything is
//! persisted; reads degrade per a configurable failure policy (`raise`,
//! `use_default`, `use_last_value`) when the store is unreachable.
//!
//! ```no_run
//! use std::sync::Arc;
//! use service_variables::{FailurePolicy, InMemoryStore, Namespace, NamespaceConfig};
//!
//! # async fn example() -> Result<(), service_variables::VariablesError> {
//! let ns = Namespace::new();
//! ns.configure(Arc::new(InMemoryStore::new()), NamespaceConfig::default())?;
//!
//! let max_jobs = ns
//!     .integer("max_jobs")
//!     .default(5)
//!     .min(1)
//!     .max(10)
//!     .on_failure(FailurePolicy::UseLastValue)
//!     .declare()?;
//!
//! max_jobs.set(8).await?;
//! assert_eq!(max_jobs.get().await?, Some(8));
//! # Ok(())
//! # }
//! ```

// Public exports
pub mod contract;
pub use contract::{
    FailurePolicy, OptionSpec, OptionValue, StoreError, ValueKind, ValueSchema, VariablesError,
    DEFAULT_STORAGE_KEY,
};

pub mod config;
pub use config::NamespaceConfig;

// Internal layering (hidden from the docs; the useful types are
// re-exported below)
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod infra;

pub use domain::accessor::{
    BoolOptionBuilder, BoolVar, FloatOptionBuilder, FloatVar, IntOptionBuilder, IntVar,
    StringOptionBuilder, StringVar,
};
pub use domain::namespace::Namespace;
pub use domain::store::HashStore;
pub use infra::storage::InMemoryStore;
