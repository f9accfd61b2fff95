//! Restricted-function rule groups driven by TOML configuration.
//!
//! # Architecture
//!
//! ```text
//! TOML text
//!   ↓ serde (DTO layer)
//! config_dto types
//!   ↓ validate + convert
//! GroupSet (pure domain model)
//!   ↓ RestrictionMatcher::builder().groups(..)
//! compiled, active groups
//! ```

pub mod config_dto;
pub mod loader;
pub mod model;

pub use model::{ExclusionList, GroupId, GroupSet, ModelError, NamePattern, RuleGroup};

/// Errors from parsing TOML and loading rule groups.
#[derive(Debug, thiserror::Error)]
pub enum LoadGroupsError {
    /// TOML deserialization failed.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Domain model validation failed.
    #[error("{0}")]
    Load(#[from] loader::LoadError),
}

/// Parses TOML content and returns the `[[groups]]` it defines.
///
/// Returns an empty set if no groups are present.
///
/// # Errors
///
/// Returns an error if TOML parsing or model validation fails.
pub fn load_groups_from_toml(content: &str) -> Result<GroupSet, LoadGroupsError> {
    let dto: config_dto::GroupsConfigDto = toml::from_str(content)?;
    Ok(loader::load(dto)?)
}
