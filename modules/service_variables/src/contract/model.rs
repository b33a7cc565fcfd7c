//! Contract models for service variables
//!
//! These are pure domain types: the declarative option spec, the value
//! currency passed through readers and writers, and the failure policies.

use std::fmt;
use std::str::FromStr;

use super::error::VariablesError;

/// Storage key shared by every namespace configured without a suffix.
/// Deployed stores already hold hashes under this literal, so it must not
/// change.
pub const DEFAULT_STORAGE_KEY: &str = "service_variables_redis_key";

/// Value kinds an option can be declared with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Boolean,
    Integer,
    Float,
    String,
}

impl ValueKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::String => "string",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Value kind together with the constraints checked on write.
///
/// Constraints bind writes only; reads never re-validate a value that was
/// accepted at write time.
#[derive(Debug, Clone, PartialEq)]
pub enum ValueSchema {
    Boolean,
    Integer {
        /// Inclusive lower bound
        min: Option<i64>,
        /// Inclusive upper bound
        max: Option<i64>,
    },
    Float {
        /// Inclusive lower bound
        min: Option<f64>,
        /// Inclusive upper bound
        max: Option<f64>,
    },
    String {
        /// Enumeration of allowed values, when present
        one_of: Option<Vec<String>>,
    },
}

impl ValueSchema {
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Boolean => ValueKind::Boolean,
            Self::Integer { .. } => ValueKind::Integer,
            Self::Float { .. } => ValueKind::Float,
            Self::String { .. } => ValueKind::String,
        }
    }
}

/// A typed option value.
///
/// Doubles as the untyped writer input: writers accept any variant and
/// coerce it against the declared schema, so a boolean option takes both
/// `true` and `"true"`.
#[derive(Debug, Clone, PartialEq)]
pub enum OptionValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl OptionValue {
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Bool(_) => ValueKind::Boolean,
            Self::Int(_) => ValueKind::Integer,
            Self::Float(_) => ValueKind::Float,
            Self::Str(_) => ValueKind::String,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for OptionValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for OptionValue {
    fn from(value: i32) -> Self {
        Self::Int(value.into())
    }
}

impl From<f64> for OptionValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

/// Strategy for answering a read when the backing store is unreachable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Propagate the connectivity error to the caller
    #[default]
    Raise,
    /// Answer as if the field were absent, so the declared default applies
    UseDefault,
    /// Answer with the last value this process successfully wrote or read,
    /// falling back to absence when there is none
    UseLastValue,
}

impl FailurePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Raise => "raise",
            Self::UseDefault => "use_default",
            Self::UseLastValue => "use_last_value",
        }
    }
}

impl fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FailurePolicy {
    type Err = VariablesError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        match token {
            "raise" => Ok(Self::Raise),
            "use_default" => Ok(Self::UseDefault),
            "use_last_value" => Ok(Self::UseLastValue),
            other => Err(VariablesError::value(format!(
                "unknown failure policy `{other}`, expected raise, use_default or use_last_value"
            ))),
        }
    }
}

/// Declarative description of one option.
///
/// Registered once per namespace and immutable afterwards; readers and
/// writers are driven entirely by this data.
#[derive(Debug, Clone, PartialEq)]
pub struct OptionSpec {
    /// Field name, unique within the namespace
    pub name: String,
    /// Kind and write-time constraints
    pub schema: ValueSchema,
    /// Value reads fall back to when the field is absent
    pub default: Option<OptionValue>,
    /// Per-option override of the namespace failure policy
    pub failure_policy: Option<FailurePolicy>,
}
