//! Compiles rule groups into one case-insensitive matcher per group.

use regex::{Regex, RegexBuilder};
use std::collections::HashSet;
use tracing::{debug, warn};

use crate::groups::{ExclusionList, GroupSet, RuleGroup};
use crate::types::Severity;

/// Translates a raw name pattern into a regex fragment.
///
/// Literal text is escaped; `*` and `.*` both become `.*`.
#[must_use]
pub fn compile_pattern(raw: &str) -> String {
    raw.replace(".*", "*")
        .split('*')
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(".*")
}

/// A rule group with its patterns compiled into a single matcher.
#[derive(Debug, Clone)]
pub struct CompiledGroup {
    id: String,
    severity: Severity,
    message: String,
    allow: HashSet<String>,
    doc_ref: Option<String>,
    matcher: Regex,
}

impl CompiledGroup {
    /// Compiles a group's patterns into `\b(?:p1|p2|..)\b`, case-insensitive.
    ///
    /// # Errors
    ///
    /// Returns an error only if the combined pattern exceeds the regex size limit.
    pub fn compile(group: &RuleGroup) -> Result<Self, regex::Error> {
        let alternation = group
            .name_patterns()
            .iter()
            .map(|p| {
                if p.has_wildcard() {
                    compile_pattern(p.as_str())
                } else {
                    regex::escape(p.as_str())
                }
            })
            .collect::<Vec<_>>()
            .join("|");
        let matcher = RegexBuilder::new(&format!(r"\b(?:{alternation})\b"))
            .case_insensitive(true)
            .build()?;

        Ok(Self {
            id: group.id().to_string(),
            severity: group.severity(),
            message: group.message().to_string(),
            allow: group.allow_list().clone(),
            doc_ref: group.documentation().map(String::from),
            matcher,
        })
    }

    /// Returns the group identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the severity.
    #[must_use]
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Returns the message template.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the documentation reference.
    #[must_use]
    pub fn doc_ref(&self) -> Option<&str> {
        self.doc_ref.as_deref()
    }

    /// Returns true if `lowercase_name` is on this group's allow-list.
    #[must_use]
    pub fn allows(&self, lowercase_name: &str) -> bool {
        self.allow.contains(lowercase_name)
    }

    /// Returns true if the name matches any of this group's patterns.
    #[must_use]
    pub fn is_match(&self, name: &str) -> bool {
        self.matcher.is_match(name)
    }

    /// Returns the compiled regex source.
    #[must_use]
    pub fn pattern(&self) -> &str {
        self.matcher.as_str()
    }
}

/// Merges, filters and compiles groups.
///
/// `supplementary` groups are merged after `primary` and win on collision.
/// Groups without patterns are dropped. Returns `None` when nothing is
/// left to check.
#[must_use]
pub fn compile_groups(
    primary: &GroupSet,
    supplementary: Option<&GroupSet>,
) -> Option<Vec<CompiledGroup>> {
    let mut merged = primary.clone();
    if let Some(extra) = supplementary {
        merged.merge(extra.clone());
    }

    for group in merged.iter().filter(|g| g.is_empty()) {
        debug!(group = %group.id(), "dropping group without patterns");
    }
    merged.retain_non_empty();

    let compiled: Vec<CompiledGroup> = merged
        .iter()
        .filter_map(|group| match CompiledGroup::compile(group) {
            Ok(compiled) => Some(compiled),
            Err(e) => {
                warn!(group = %group.id(), error = %e, "skipping group that failed to compile");
                None
            }
        })
        .collect();

    if compiled.is_empty() {
        None
    } else {
        Some(compiled)
    }
}

/// Compiled groups that survive the run's exclusion list.
///
/// Built once per configuration and shared read-only across files.
#[derive(Debug, Clone)]
pub struct ActiveGroupSet {
    groups: Vec<CompiledGroup>,
}

impl ActiveGroupSet {
    /// Removes excluded groups. Returns `None` if none remain.
    #[must_use]
    pub fn new(compiled: Vec<CompiledGroup>, exclusions: &ExclusionList) -> Option<Self> {
        let groups: Vec<CompiledGroup> = compiled
            .into_iter()
            .filter(|g| !exclusions.contains(g.id()))
            .collect();
        if groups.is_empty() {
            None
        } else {
            Some(Self { groups })
        }
    }

    /// Iterates groups in definition order.
    pub fn iter(&self) -> std::slice::Iter<'_, CompiledGroup> {
        self.groups.iter()
    }

    /// Number of active groups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Returns true if no groups are active.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl<'a> IntoIterator for &'a ActiveGroupSet {
    type Item = &'a CompiledGroup;
    type IntoIter = std::slice::Iter<'a, CompiledGroup>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.iter()
    }
}
