//! TOML deserialization types (DTO layer).
//!
//! These types exist solely for serde deserialization.
//! They are converted to domain model types via the loader.

use serde::Deserialize;

/// Raw TOML representation of rule groups.
///
/// Extends the base `Config` with `[[groups]]` sections.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GroupsConfigDto {
    /// Rule group definitions.
    #[serde(rename = "groups", default)]
    pub groups: Vec<RuleGroupDto>,
}

/// TOML representation of a rule group.
#[derive(Debug, Clone, Deserialize)]
pub struct RuleGroupDto {
    /// Group name (e.g., "lambda").
    pub name: String,
    /// Severity (default: "error"). Anything other than "warning" is an error.
    #[serde(default = "default_severity_str", alias = "type")]
    pub severity: String,
    /// Violation message. `%s` is replaced by the matched name.
    pub message: String,
    /// Function-name patterns; `*` is a wildcard.
    #[serde(default, alias = "patterns")]
    pub functions: Vec<String>,
    /// Exact names exempted from this group.
    #[serde(default, alias = "whitelist")]
    pub allow: Vec<String>,
    /// Document reference.
    #[serde(default)]
    pub doc: Option<String>,
}

fn default_severity_str() -> String {
    "error".to_string()
}
