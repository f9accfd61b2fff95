//! # fn-restrict-core
//!
//! Core engine for flagging calls to restricted functions in PHP source,
//! driven by lexical tokens rather than a full AST.
//!
//! This crate provides:
//!
//! - [`Token`], [`TokenStream`] and the [`Tokenizer`] extension point
//! - [`Sniff`] trait for token-driven rules
//! - [`RuleGroup`] / [`GroupSet`] for declaring restricted names, loadable
//!   from TOML via [`groups::load_groups_from_toml`]
//! - [`RestrictionMatcher`], the sniff that compiles groups and reports
//!   bare calls to restricted names
//! - [`Analyzer`] for orchestrating lint execution over a directory
//! - [`Violation`] for representing lint findings
//!
//! ## Example
//!
//! ```ignore
//! use fn_restrict_core::{Analyzer, RestrictionMatcher, RuleGroup, Severity};
//!
//! let matcher = RestrictionMatcher::builder()
//!     .group(
//!         RuleGroup::new("lambda", Severity::Error, "Use anonymous functions instead please!")
//!             .patterns(["eval", "create_function"]),
//!     )
//!     .build();
//!
//! let analyzer = Analyzer::builder()
//!     .root("./src")
//!     .tokenizer(PhpTokenizer::new())
//!     .sniff(matcher)
//!     .build()?;
//!
//! let result = analyzer.analyze()?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod analyzer;
mod config;
mod context;
pub mod groups;
pub mod restrictions;
mod sniff;
mod token;
mod types;

pub use analyzer::{Analyzer, AnalyzerBuilder, AnalyzerError};
pub use config::{AnalyzerConfig, Config, ConfigError, RestrictionsConfig, SniffConfig};
pub use context::FileContext;
pub use groups::{ExclusionList, GroupId, GroupSet, LoadGroupsError, NamePattern, RuleGroup};
pub use restrictions::{RestrictionMatcher, RestrictionMatcherBuilder};
pub use sniff::{Sniff, SniffBox};
pub use token::{Token, TokenKind, TokenStream, TokenizeError, Tokenizer};
pub use types::{LintResult, Location, Severity, Violation, ViolationDiagnostic, ViolationSink};
