//! Configuration types for pathgate
//!
//! Two documents are involved: the application settings ([`AppConfig`]),
//! loaded from TOML and environment variables, and the path rules
//! ([`PathRulesConfig`]), a list of groups usually kept in a JSON file.

use serde::{Deserialize, Deserializer};

/// Root application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Path to the group rules document
    pub rules: Option<String>,

    /// Globally whitelisted usernames
    pub whitelist: WhitelistConfig,

    /// Decision policy settings
    pub policy: PolicyConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Global whitelist configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct WhitelistConfig {
    /// Usernames allowed on every path
    pub usernames: Vec<String>,
}

/// Decision policy configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    /// What to do with users that belong to no group
    pub unmatched: UnmatchedPolicy,
}

/// Policy for users that belong to no group and are not whitelisted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnmatchedPolicy {
    /// Deny every path
    #[default]
    Deny,
    /// Leave the request to the caller's own policy
    Allow,
}

/// Path rules document
///
/// ```json
/// {"groups": [{"name": "sample", "paths": ["/a"], "usernames": ["user@example.com"]}]}
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PathRulesConfig {
    /// Groups in declaration order
    #[serde(deserialize_with = "null_as_empty")]
    pub groups: Vec<GroupConfig>,
}

/// A named set of users sharing the same allowed paths
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GroupConfig {
    /// Name used in diagnostics only
    pub name: String,

    /// Allowed path patterns (regex, anchored at the start of the path)
    #[serde(deserialize_with = "null_as_empty")]
    pub paths: Vec<String>,

    /// Member usernames
    #[serde(deserialize_with = "null_as_empty")]
    pub usernames: Vec<String>,
}

/// Treat an explicit `null` list like a missing one
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Output format (pretty, json)
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable output
    #[default]
    Pretty,
    /// JSON structured output
    Json,
}
