//! Restricted function-call detection.
//!
//! [`RestrictionMatcher`] is the one sniff this module provides. It is
//! configured with data, not subclassed: hand it a [`GroupSet`] (and
//! optionally a supplementary set that overrides it) and an exclusion
//! list.
//!
//! ```text
//! GroupSet (+ supplementary)
//!   ↓ compiler: merge, drop empty groups, compile one regex per group
//! ActiveGroupSet (excluded groups removed)
//!   ↓ per Identifier/Eval token
//! classifier: is this a bare call?
//!   ↓ yes
//! emitter: one violation per matching group
//! ```

pub mod classifier;
pub mod compiler;
pub mod emitter;

use std::sync::Arc;

use tracing::debug;

use crate::context::FileContext;
use crate::groups::{ExclusionList, GroupSet, RuleGroup};
use crate::sniff::Sniff;
use crate::token::{TokenKind, TokenStream};
use crate::types::{Location, ViolationSink};

pub use classifier::is_bare_call;
pub use compiler::{compile_groups, compile_pattern, ActiveGroupSet, CompiledGroup};
pub use emitter::{emit, format_message};

/// Flags bare calls to restricted functions.
#[derive(Debug, Clone)]
pub struct RestrictionMatcher {
    active: Option<Arc<ActiveGroupSet>>,
    exclusions: ExclusionList,
}

impl RestrictionMatcher {
    /// Sniff name.
    pub const NAME: &'static str = "function-restrictions";

    /// Creates a new builder.
    #[must_use]
    pub fn builder() -> RestrictionMatcherBuilder {
        RestrictionMatcherBuilder::new()
    }

    /// Creates a matcher from already-compiled active groups.
    ///
    /// Lets several matchers share one compiled set across runs.
    #[must_use]
    pub fn from_active(active: Arc<ActiveGroupSet>, exclusions: ExclusionList) -> Self {
        Self {
            active: Some(active),
            exclusions,
        }
    }

    /// Returns the active groups, or `None` if there is nothing to check.
    #[must_use]
    pub fn active_groups(&self) -> Option<&Arc<ActiveGroupSet>> {
        self.active.as_ref()
    }
}

impl Sniff for RestrictionMatcher {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn description(&self) -> &'static str {
        "Flags bare calls to restricted functions"
    }

    fn register(&self) -> Vec<TokenKind> {
        if self.active.is_some() {
            vec![TokenKind::Identifier, TokenKind::Eval]
        } else {
            vec![]
        }
    }

    fn process(
        &self,
        ctx: &FileContext,
        tokens: &TokenStream,
        ptr: usize,
        sink: &mut dyn ViolationSink,
    ) {
        let Some(active) = &self.active else {
            return;
        };
        if !is_bare_call(tokens, ptr) {
            return;
        }
        let Some(token) = tokens.get(ptr) else {
            return;
        };

        let location = Location::from_token(ctx.relative_path.clone(), token, ptr);
        emit(
            Self::NAME,
            &token.content,
            &location,
            active,
            &self.exclusions,
            sink,
        );
    }
}

/// Builder for configuring a [`RestrictionMatcher`].
#[derive(Debug, Default)]
pub struct RestrictionMatcherBuilder {
    groups: GroupSet,
    supplementary: Option<GroupSet>,
    exclude: String,
}

impl RestrictionMatcherBuilder {
    /// Creates a new builder with no groups.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds groups. Later groups replace earlier ones with the same identifier.
    #[must_use]
    pub fn groups(mut self, groups: GroupSet) -> Self {
        self.groups.merge(groups);
        self
    }

    /// Adds a single group.
    #[must_use]
    pub fn group(mut self, group: RuleGroup) -> Self {
        self.groups.insert(group);
        self
    }

    /// Sets supplementary groups, merged last and winning on collision.
    #[must_use]
    pub fn supplementary(mut self, groups: GroupSet) -> Self {
        self.supplementary = Some(groups);
        self
    }

    /// Sets the comma-delimited list of group identifiers to skip.
    #[must_use]
    pub fn exclude(mut self, groups: impl Into<String>) -> Self {
        self.exclude = groups.into();
        self
    }

    /// Compiles the groups and builds the matcher.
    ///
    /// An empty result is not an error: the matcher then registers for no
    /// tokens.
    #[must_use]
    pub fn build(self) -> RestrictionMatcher {
        let exclusions = ExclusionList::parse(&self.exclude);
        let active = compile_groups(&self.groups, self.supplementary.as_ref())
            .and_then(|compiled| ActiveGroupSet::new(compiled, &exclusions))
            .map(Arc::new);

        if let Some(set) = &active {
            debug!("{} active restriction groups", set.len());
        } else {
            debug!("No active restriction groups; matcher opts out");
        }

        RestrictionMatcher { active, exclusions }
    }
}
