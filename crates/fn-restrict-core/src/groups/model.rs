//! Pure domain model for restricted-function rule groups.
//!
//! This module contains no serde and no I/O dependencies.

use crate::types::Severity;
use std::collections::HashSet;
use std::fmt;
use tracing::debug;

// ────────────────────────────────────────────
// Newtypes
// ────────────────────────────────────────────

/// A rule group identifier (e.g., `lambda`, `user_meta`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GroupId(String);

impl GroupId {
    /// Creates a group identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Checks that the identifier can be named in an exclusion list.
    ///
    /// # Errors
    ///
    /// Returns error if the identifier is empty, contains a comma, or has
    /// leading or trailing whitespace.
    pub fn validate(&self) -> Result<(), ModelError> {
        let trimmed = self.0.trim();
        if trimmed.is_empty() {
            return Err(ModelError::EmptyGroupId);
        }
        if self.0.contains(',') || trimmed != self.0 {
            return Err(ModelError::InvalidGroupId {
                id: self.0.clone(),
            });
        }
        Ok(())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A raw function-name pattern.
///
/// `*` and `.*` are "any characters" wildcards; everything else matches
/// literally and case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamePattern(String);

impl NamePattern {
    /// Creates a name pattern.
    #[must_use]
    pub fn new(pattern: impl Into<String>) -> Self {
        Self(pattern.into())
    }

    /// Returns the pattern as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the pattern contains a wildcard marker.
    #[must_use]
    pub fn has_wildcard(&self) -> bool {
        self.0.contains('*')
    }
}

// ────────────────────────────────────────────
// Domain entities
// ────────────────────────────────────────────

/// A named category of restricted function names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleGroup {
    id: GroupId,
    severity: Severity,
    message: String,
    patterns: Vec<NamePattern>,
    allow: HashSet<String>,
    doc_ref: Option<String>,
}

impl RuleGroup {
    /// Creates a group with no patterns and an empty allow-list.
    #[must_use]
    pub fn new(id: impl Into<String>, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            id: GroupId::new(id),
            severity,
            message: message.into(),
            patterns: Vec::new(),
            allow: HashSet::new(),
            doc_ref: None,
        }
    }

    /// Appends name patterns. Empty strings are ignored.
    #[must_use]
    pub fn patterns<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for pattern in patterns.into_iter().map(Into::into) {
            if pattern.is_empty() {
                debug!(group = %self.id, "ignoring empty name pattern");
            } else {
                self.patterns.push(NamePattern::new(pattern));
            }
        }
        self
    }

    /// Adds exact names exempted from this group. Names are stored lowercase.
    #[must_use]
    pub fn allow<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.allow
            .extend(names.into_iter().map(|n| n.as_ref().to_lowercase()));
        self
    }

    /// Sets the documentation reference.
    #[must_use]
    pub fn doc_ref(mut self, doc_ref: impl Into<String>) -> Self {
        self.doc_ref = Some(doc_ref.into());
        self
    }

    /// Returns the group identifier.
    #[must_use]
    pub fn id(&self) -> &GroupId {
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

    /// Returns the raw name patterns.
    #[must_use]
    pub fn name_patterns(&self) -> &[NamePattern] {
        &self.patterns
    }

    /// Returns the lowercase allow-list.
    #[must_use]
    pub fn allow_list(&self) -> &HashSet<String> {
        &self.allow
    }

    /// Returns the documentation reference.
    #[must_use]
    pub fn documentation(&self) -> Option<&str> {
        self.doc_ref.as_deref()
    }

    /// Returns true if the group has no name patterns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

// ────────────────────────────────────────────
// Aggregate
// ────────────────────────────────────────────

/// Ordered collection of rule groups keyed by identifier.
///
/// Inserting a group whose identifier already exists replaces the earlier
/// group in place, so the first insertion fixes a group's position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupSet {
    groups: Vec<RuleGroup>,
}

impl GroupSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a group.
    pub fn insert(&mut self, group: RuleGroup) {
        match self.groups.iter_mut().find(|g| g.id == group.id) {
            Some(existing) => *existing = group,
            None => self.groups.push(group),
        }
    }

    /// Merges `other` into this set. Groups from `other` win on collision.
    pub fn merge(&mut self, other: GroupSet) {
        for group in other.groups {
            self.insert(group);
        }
    }

    /// Returns the group with the given identifier.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&RuleGroup> {
        self.groups.iter().find(|g| g.id.as_str() == id)
    }

    /// Returns true if a group with the given identifier exists.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Removes groups that have no name patterns.
    pub fn retain_non_empty(&mut self) {
        self.groups.retain(|g| !g.is_empty());
    }

    /// Iterates groups in definition order.
    pub fn iter(&self) -> std::slice::Iter<'_, RuleGroup> {
        self.groups.iter()
    }

    /// Number of groups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Returns true if no groups are defined.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl FromIterator<RuleGroup> for GroupSet {
    fn from_iter<T: IntoIterator<Item = RuleGroup>>(iter: T) -> Self {
        let mut set = Self::new();
        for group in iter {
            set.insert(group);
        }
        set
    }
}

impl IntoIterator for GroupSet {
    type Item = RuleGroup;
    type IntoIter = std::vec::IntoIter<RuleGroup>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.into_iter()
    }
}

impl<'a> IntoIterator for &'a GroupSet {
    type Item = &'a RuleGroup;
    type IntoIter = std::slice::Iter<'a, RuleGroup>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.iter()
    }
}

/// Run-level list of group identifiers to skip entirely.
///
/// Parsed from a comma-delimited string such as `"switch_to_blog,user_meta"`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionList {
    ids: HashSet<String>,
}

impl ExclusionList {
    /// Parses a comma-delimited list. Entries are trimmed and empty entries dropped.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        Self {
            ids: value
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect(),
        }
    }

    /// Returns true if the group identifier is excluded.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// Returns true if nothing is excluded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

// ────────────────────────────────────────────
// Errors
// ────────────────────────────────────────────

/// Errors in domain model construction.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ModelError {
    /// Group identifier is empty.
    #[error("group name must not be empty")]
    EmptyGroupId,

    /// Group identifier cannot be used in a comma-delimited exclusion list.
    #[error("invalid group name `{id}`: must not contain `,` or surrounding whitespace")]
    InvalidGroupId {
        /// The invalid identifier.
        id: String,
    },
}

// ────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────
