//! Contract layer - public types of the accessor layer
//!
//! Transport-agnostic models and errors. NO serde derives on models -
//! the deserializable configuration lives in `config.rs`.

pub mod error;
pub mod model;

pub use error::{StoreError, VariablesError};
pub use model::{
    FailurePolicy, OptionSpec, OptionValue, ValueKind, ValueSchema, DEFAULT_STORAGE_KEY,
};
