//! DTO → Domain model conversion with validation.

use crate::types::Severity;

use super::config_dto::{GroupsConfigDto, RuleGroupDto};
use super::model::{GroupSet, ModelError, RuleGroup};

/// Errors during DTO → Domain conversion.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// A field-level validation error.
    #[error("{context}: {source}")]
    Validation {
        /// Where the error occurred (e.g., "groups[0].name").
        context: String,
        /// The underlying model error.
        source: ModelError,
    },

    /// The same group name appears twice in one configuration.
    #[error("groups[{index}]: duplicate group name `{name}`")]
    DuplicateGroup {
        /// Index of the second definition.
        index: usize,
        /// The repeated name.
        name: String,
    },
}

/// Converts a `GroupsConfigDto` to a validated `GroupSet`.
///
/// # Errors
///
/// Returns the first error encountered during conversion.
pub fn load(dto: GroupsConfigDto) -> Result<GroupSet, LoadError> {
    let mut set = GroupSet::new();
    for (index, group_dto) in dto.groups.into_iter().enumerate() {
        let group = convert_group(group_dto, index)?;
        if set.contains(group.id().as_str()) {
            return Err(LoadError::DuplicateGroup {
                index,
                name: group.id().to_string(),
            });
        }
        set.insert(group);
    }
    Ok(set)
}

fn convert_group(dto: RuleGroupDto, index: usize) -> Result<RuleGroup, LoadError> {
    let severity = Severity::from_type_str(&dto.severity);
    let mut group = RuleGroup::new(dto.name, severity, dto.message)
        .patterns(dto.functions)
        .allow(dto.allow);
    if let Some(doc) = dto.doc {
        group = group.doc_ref(doc);
    }

    group
        .id()
        .validate()
        .map_err(|e| LoadError::Validation {
            context: format!("groups[{index}].name"),
            source: e,
        })?;

    Ok(group)
}
