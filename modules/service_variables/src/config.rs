//! Configuration for a service-variables namespace

use serde::Deserialize;

/// Per-namespace configuration supplied by the embedding application.
///
/// Deserializable so it can sit inside the application's own config file.
/// The failure-policy token is validated by `Namespace::configure`, not
/// here, so an unrecognized token surfaces as an invalid value at
/// configuration time rather than a parse error.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NamespaceConfig {
    /// Optional suffix appended to the shared storage key, isolating this
    /// namespace from others on the same store
    #[serde(default)]
    pub key_suffix: Option<String>,

    /// Failure policy applied to options that do not declare their own
    #[serde(default = "default_failure_policy")]
    pub failure_policy: String,
}

impl Default for NamespaceConfig {
    fn default() -> Self {
        Self {
            key_suffix: None,
            failure_policy: default_failure_policy(),
        }
    }
}

fn default_failure_policy() -> String {
    "raise".to_string()
}
