//! Typed option builders and accessors
//!
//! Declaration happens through these builders: each `declare()` registers
//! a data-described spec with the namespace and returns a thin typed
//! handle bound to the option name. Handles dispatch through the
//! namespace's generic path, so policy handling, caching and validation
//! have a single implementation.

use crate::contract::{FailurePolicy, OptionSpec, OptionValue, ValueSchema, VariablesError};
use crate::domain::codec;
use crate::domain::namespace::Namespace;

// A decoded value always matches the declared kind; anything else means
// the stored text was mutated outside this library.
fn kind_mismatch(name: &str, value: &OptionValue) -> VariablesError {
    VariablesError::CorruptValue {
        field: name.to_string(),
        raw: codec::encode(value),
    }
}

// ===== Boolean =====

/// Builder for a boolean option
pub struct BoolOptionBuilder {
    ns: Namespace,
    name: String,
    default: Option<bool>,
    failure_policy: Option<FailurePolicy>,
}

impl BoolOptionBuilder {
    pub(crate) fn new(ns: Namespace, name: String) -> Self {
        Self {
            ns,
            name,
            default: None,
            failure_policy: None,
        }
    }

    /// Value reads fall back to when the field is absent
    pub fn default(mut self, value: bool) -> Self {
        self.default = Some(value);
        self
    }

    /// Override the namespace-wide failure policy for this option
    pub fn on_failure(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = Some(policy);
        self
    }

    /// Register the option and return its typed accessor
    pub fn declare(self) -> Result<BoolVar, VariablesError> {
        self.ns.declare(OptionSpec {
            name: self.name.clone(),
            schema: ValueSchema::Boolean,
            default: self.default.map(OptionValue::Bool),
            failure_policy: self.failure_policy,
        })?;
        Ok(BoolVar {
            ns: self.ns,
            name: self.name,
        })
    }
}

/// Typed accessor for a boolean option
#[derive(Clone)]
pub struct BoolVar {
    ns: Namespace,
    name: String,
}

impl BoolVar {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current value, or the declared default when the field is absent
    pub async fn get(&self) -> Result<Option<bool>, VariablesError> {
        match self.ns.get(&self.name).await? {
            Some(OptionValue::Bool(b)) => Ok(Some(b)),
            Some(other) => Err(kind_mismatch(&self.name, &other)),
            None => Ok(None),
        }
    }

    /// Validate and store a new value. Accepts the boolean literals and
    /// their string forms.
    pub async fn set(&self, value: impl Into<OptionValue>) -> Result<(), VariablesError> {
        self.ns.set(&self.name, value).await
    }

    /// Delete the stored field; reads fall back to the default again
    pub async fn clear(&self) -> Result<(), VariablesError> {
        self.ns.unset(&self.name).await
    }
}

// ===== Integer =====

/// Builder for an integer option
pub struct IntOptionBuilder {
    ns: Namespace,
    name: String,
    default: Option<i64>,
    min: Option<i64>,
    max: Option<i64>,
    failure_policy: Option<FailurePolicy>,
}

impl IntOptionBuilder {
    pub(crate) fn new(ns: Namespace, name: String) -> Self {
        Self {
            ns,
            name,
            default: None,
            min: None,
            max: None,
            failure_policy: None,
        }
    }

    /// Value reads fall back to when the field is absent
    pub fn default(mut self, value: i64) -> Self {
        self.default = Some(value);
        self
    }

    /// Inclusive lower bound checked on write
    pub fn min(mut self, value: i64) -> Self {
        self.min = Some(value);
        self
    }

    /// Inclusive upper bound checked on write
    pub fn max(mut self, value: i64) -> Self {
        self.max = Some(value);
        self
    }

    /// Override the namespace-wide failure policy for this option
    pub fn on_failure(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = Some(policy);
        self
    }

    /// Register the option and return its typed accessor
    pub fn declare(self) -> Result<IntVar, VariablesError> {
        self.ns.declare(OptionSpec {
            name: self.name.clone(),
            schema: ValueSchema::Integer {
                min: self.min,
                max: self.max,
            },
            default: self.default.map(OptionValue::Int),
            failure_policy: self.failure_policy,
        })?;
        Ok(IntVar {
            ns: self.ns,
            name: self.name,
        })
    }
}

/// Typed accessor for an integer option
#[derive(Clone)]
pub struct IntVar {
    ns: Namespace,
    name: String,
}

impl std::fmt::Debug for IntVar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IntVar").field("name", &self.name).finish()
    }
}

impl IntVar {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current value, or the declared default when the field is absent
    pub async fn get(&self) -> Result<Option<i64>, VariablesError> {
        match self.ns.get(&self.name).await? {
            Some(OptionValue::Int(i)) => Ok(Some(i)),
            Some(other) => Err(kind_mismatch(&self.name, &other)),
            None => Ok(None),
        }
    }

    /// Validate and store a new value. Accepts integers and strict
    /// textual numerals.
    pub async fn set(&self, value: impl Into<OptionValue>) -> Result<(), VariablesError> {
        self.ns.set(&self.name, value).await
    }

    /// Delete the stored field; reads fall back to the default again
    pub async fn clear(&self) -> Result<(), VariablesError> {
        self.ns.unset(&self.name).await
    }
}

// ===== Float =====

/// Builder for a float option
pub struct FloatOptionBuilder {
    ns: Namespace,
    name: String,
    default: Option<f64>,
    min: Option<f64>,
    max: Option<f64>,
    failure_policy: Option<FailurePolicy>,
}

impl FloatOptionBuilder {
    pub(crate) fn new(ns: Namespace, name: String) -> Self {
        Self {
            ns,
            name,
            default: None,
            min: None,
            max: None,
            failure_policy: None,
        }
    }

    /// Value reads fall back to when the field is absent
    pub fn default(mut self, value: f64) -> Self {
        self.default = Some(value);
        self
    }

    /// Inclusive lower bound checked on write
    pub fn min(mut self, value: f64) -> Self {
        self.min = Some(value);
        self
    }

    /// Inclusive upper bound checked on write
    pub fn max(mut self, value: f64) -> Self {
        self.max = Some(value);
        self
    }

    /// Override the namespace-wide failure policy for this option
    pub fn on_failure(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = Some(policy);
        self
    }

    /// Register the option and return its typed accessor
    pub fn declare(self) -> Result<FloatVar, VariablesError> {
        self.ns.declare(OptionSpec {
            name: self.name.clone(),
            schema: ValueSchema::Float {
                min: self.min,
                max: self.max,
            },
            default: self.default.map(OptionValue::Float),
            failure_policy: self.failure_policy,
        })?;
        Ok(FloatVar {
            ns: self.ns,
            name: self.name,
        })
    }
}

/// Typed accessor for a float option
#[derive(Clone)]
pub struct FloatVar {
    ns: Namespace,
    name: String,
}

impl std::fmt::Debug for FloatVar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FloatVar").field("name", &self.name).finish()
    }
}

impl FloatVar {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current value, or the declared default when the field is absent
    pub async fn get(&self) -> Result<Option<f64>, VariablesError> {
        match self.ns.get(&self.name).await? {
            Some(OptionValue::Float(f)) => Ok(Some(f)),
            Some(other) => Err(kind_mismatch(&self.name, &other)),
            None => Ok(None),
        }
    }

    /// Validate and store a new value. Accepts floats, integers and
    /// strict textual numerals.
    pub async fn set(&self, value: impl Into<OptionValue>) -> Result<(), VariablesError> {
        self.ns.set(&self.name, value).await
    }

    /// Delete the stored field; reads fall back to the default again
    pub async fn clear(&self) -> Result<(), VariablesError> {
        self.ns.unset(&self.name).await
    }
}

// ===== String =====

/// Builder for a string option
pub struct StringOptionBuilder {
    ns: Namespace,
    name: String,
    default: Option<String>,
    one_of: Option<Vec<String>>,
    failure_policy: Option<FailurePolicy>,
}

impl StringOptionBuilder {
    pub(crate) fn new(ns: Namespace, name: String) -> Self {
        Self {
            ns,
            name,
            default: None,
            one_of: None,
            failure_policy: None,
        }
    }

    /// Value reads fall back to when the field is absent
    pub fn default(mut self, value: impl Into<String>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Enumeration of allowed values checked on write
    pub fn one_of<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.one_of = Some(values.into_iter().map(Into::into).collect());
        self
    }

    /// Override the namespace-wide failure policy for this option
    pub fn on_failure(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = Some(policy);
        self
    }

    /// Register the option and return its typed accessor
    pub fn declare(self) -> Result<StringVar, VariablesError> {
        self.ns.declare(OptionSpec {
            name: self.name.clone(),
            schema: ValueSchema::String {
                one_of: self.one_of,
            },
            default: self.default.map(OptionValue::Str),
            failure_policy: self.failure_policy,
        })?;
        Ok(StringVar {
            ns: self.ns,
            name: self.name,
        })
    }
}

/// Typed accessor for a string option
#[derive(Clone)]
pub struct StringVar {
    ns: Namespace,
    name: String,
}

impl std::fmt::Debug for StringVar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StringVar")
            .field("name", &self.name)
            .finish()
    }
}

impl StringVar {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current value, or the declared default when the field is absent
    pub async fn get(&self) -> Result<Option<String>, VariablesError> {
        match self.ns.get(&self.name).await? {
            Some(OptionValue::Str(s)) => Ok(Some(s)),
            Some(other) => Err(kind_mismatch(&self.name, &other)),
            None => Ok(None),
        }
    }

    /// Validate and store a new value, checking the enumeration when one
    /// was declared
    pub async fn set(&self, value: impl Into<OptionValue>) -> Result<(), VariablesError> {
        self.ns.set(&self.name, value).await
    }

    /// Delete the stored field; reads fall back to the default again
    pub async fn clear(&self) -> Result<(), VariablesError> {
        self.ns.unset(&self.name).await
    }
}
