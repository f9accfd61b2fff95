//! Rule group presets for common configurations.

use fn_restrict_core::GroupSet;
use tracing::debug;

use crate::{discouraged, lambda, restricted};

/// Preset configurations for fn-restrict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// `eval` and `create_function`.
    Lambda,
    /// Runtime configuration, obfuscation, serialization and debug helpers.
    Discouraged,
    /// Hosted-platform restrictions.
    Restricted,
    /// Lambda plus discouraged.
    Recommended,
}

impl Preset {
    /// All presets, in display order.
    pub const ALL: [Self; 4] = [
        Self::Recommended,
        Self::Lambda,
        Self::Discouraged,
        Self::Restricted,
    ];

    /// Parses a preset name. Case-insensitive.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(name.trim()))
    }

    /// Returns the preset's configuration name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Lambda => "lambda",
            Self::Discouraged => "discouraged",
            Self::Restricted => "restricted",
            Self::Recommended => "recommended",
        }
    }

    /// Returns the groups for this preset.
    #[must_use]
    pub fn groups(self) -> GroupSet {
        let set: GroupSet = match self {
            Self::Lambda => lambda::groups().into_iter().collect(),
            Self::Discouraged => discouraged::groups().into_iter().collect(),
            Self::Restricted => restricted::groups().into_iter().collect(),
            Self::Recommended => recommended_groups(),
        };
        debug!("Preset {} provides {} groups", self.name(), set.len());
        set
    }
}

impl std::fmt::Display for Preset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Returns the recommended set of groups.
///
/// Includes:
/// - `lambda`
/// - `runtime_configuration`, `obfuscation`, `serialize`, `debug`
#[must_use]
pub fn recommended_groups() -> GroupSet {
    lambda::groups()
        .into_iter()
        .chain(discouraged::groups())
        .collect()
}

/// Returns every built-in group.
#[must_use]
pub fn all_groups() -> GroupSet {
    lambda::groups()
        .into_iter()
        .chain(discouraged::groups())
        .chain(restricted::groups())
        .collect()
}
