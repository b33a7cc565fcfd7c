//! Contract error types for service variables

use thiserror::Error;

/// Connectivity failure reported by the backing hash store.
///
/// "Field absent" is not an error (`hash_get` returns `Ok(None)`); this
/// covers the cases the failure policies exist for. The two must stay
/// distinguishable at the store boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The store could not be reached
    #[error("store connection failed: {message}")]
    Connection {
        /// Description supplied by the store client
        message: String,
    },
}

impl StoreError {
    /// Connectivity error with the given description
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }
}

/// Service variables domain errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum VariablesError {
    /// Namespace used before `configure`
    #[error("store handle not given")]
    NotConfigured,
    /// Duplicate or self-contradictory option declaration
    #[error("invalid option definition: {message}")]
    InvalidDefinition {
        /// What made the declaration invalid
        message: String,
    },
    /// Write value failed type coercion or a declared constraint; also an
    /// unrecognized failure-policy token at configure time
    #[error("{message}")]
    InvalidValue {
        /// Which rule the value violated
        message: String,
    },
    /// Generic accessor dispatch on a name that was never declared
    #[error("unknown option `{name}`")]
    UnknownOption {
        /// The undeclared option name
        name: String,
    },
    /// Stored text that no longer parses as the declared kind. Writers
    /// pre-validate everything they persist, so this means the field was
    /// mutated outside this library.
    #[error("corrupt stored value for `{field}`: {raw:?}")]
    CorruptValue {
        /// Field whose stored text is unreadable
        field: String,
        /// The raw stored text
        raw: String,
    },
    /// Connectivity failure, propagated verbatim under the `raise` read
    /// policy and unconditionally for writes and deletes
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl VariablesError {
    pub(crate) fn definition(message: impl Into<String>) -> Self {
        Self::InvalidDefinition {
            message: message.into(),
        }
    }

    pub(crate) fn value(message: impl Into<String>) -> Self {
        Self::InvalidValue {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_error_is_transparent() {
        let err: VariablesError = StoreError::connection("refused").into();
        assert_eq!(err.to_string(), "store connection failed: refused");
    }

    #[test]
    fn not_configured_message() {
        assert_eq!(
            VariablesError::NotConfigured.to_string(),
            "store handle not given"
        );
    }
}
