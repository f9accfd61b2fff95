//! Core types for lint violations and results.

use miette::{Diagnostic, SourceSpan};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::token::Token;

/// Severity level for lint violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Non-fatal finding that should be addressed.
    Warning,
    /// Fatal-class finding that must be fixed.
    Error,
}

impl Severity {
    /// Parses a group `type`/`severity` string.
    ///
    /// Only `"warning"` yields [`Severity::Warning`]; every other value,
    /// including `"error"` and unknown strings, is fatal-class.
    #[must_use]
    pub fn from_type_str(value: &str) -> Self {
        if value == "warning" {
            Self::Warning
        } else {
            Self::Error
        }
    }

    /// Returns true for fatal-class severities.
    #[must_use]
    pub fn is_fatal(self) -> bool {
        self == Self::Error
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Source code location of a violation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    /// File path relative to project root.
    pub file: PathBuf,
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed).
    pub column: usize,
    /// Byte offset in file (for miette integration).
    pub offset: usize,
    /// Length of the span in bytes.
    pub length: usize,
    /// Index of the originating token in the file's token stream.
    pub token: usize,
}

impl Location {
    /// Creates a new location with explicit values.
    #[must_use]
    pub fn new(file: PathBuf, line: usize, column: usize) -> Self {
        Self {
            file,
            line,
            column,
            offset: 0,
            length: 0,
            token: 0,
        }
    }

    /// Creates a location pointing at the token at `index`.
    #[must_use]
    pub fn from_token(file: PathBuf, token: &Token, index: usize) -> Self {
        Self {
            file,
            line: token.line,
            column: token.column,
            offset: token.offset,
            length: token.content.len(),
            token: index,
        }
    }
}

/// A lint violation found during analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Sniff name (e.g., "function-restrictions").
    pub rule: String,
    /// Rule group identifier (e.g., "lambda"), used for suppression and filtering.
    pub group: String,
    /// Severity of this violation.
    pub severity: Severity,
    /// Primary location of the violation.
    pub location: Location,
    /// Human-readable message with the matched name substituted.
    pub message: String,
    /// The identifier text as it appeared in the source.
    pub matched: String,
    /// Reference to documentation for the group.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc_ref: Option<String>,
}

impl Violation {
    /// Creates a new violation.
    #[must_use]
    pub fn new(
        rule: impl Into<String>,
        group: impl Into<String>,
        severity: Severity,
        location: Location,
        message: impl Into<String>,
        matched: impl Into<String>,
    ) -> Self {
        Self {
            rule: rule.into(),
            group: group.into(),
            severity,
            location,
            message: message.into(),
            matched: matched.into(),
            doc_ref: None,
        }
    }

    /// Adds a documentation reference to this violation.
    #[must_use]
    pub fn with_doc_ref(mut self, doc_ref: impl Into<String>) -> Self {
        self.doc_ref = Some(doc_ref.into());
        self
    }

    /// Returns the full source code, e.g. `function-restrictions.lambda`.
    #[must_use]
    pub fn source(&self) -> String {
        format!("{}.{}", self.rule, self.group)
    }

    /// Formats the violation for terminal output.
    #[must_use]
    pub fn format(&self) -> String {
        use std::fmt::Write;
        let mut output = format!(
            "{} at {}:{}:{}\n",
            self.source(),
            self.location.file.display(),
            self.location.line,
            self.location.column,
        );
        let _ = writeln!(output, "  {}: {}", self.severity, self.message);
        if let Some(doc_ref) = &self.doc_ref {
            let _ = writeln!(output, "  = see: {doc_ref}");
        }
        output
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}:{}: {} [{}] {}",
            self.location.file.display(),
            self.location.line,
            self.location.column,
            self.severity,
            self.group,
            self.message
        )?;
        if let Some(doc_ref) = &self.doc_ref {
            write!(f, " (see: {doc_ref})")?;
        }
        Ok(())
    }
}

/// Converts a Violation to a miette Diagnostic for rich error display.
#[derive(Debug, thiserror::Error, Diagnostic)]
#[error("{message}")]
pub struct ViolationDiagnostic {
    message: String,
    #[help]
    help: Option<String>,
    #[label("{label_message}")]
    span: SourceSpan,
    label_message: String,
}

impl From<&Violation> for ViolationDiagnostic {
    fn from(v: &Violation) -> Self {
        Self {
            message: format!("[{}] {}", v.group, v.message),
            help: v.doc_ref.as_ref().map(|d| format!("see: {d}")),
            span: SourceSpan::from((v.location.offset, v.location.length)),
            label_message: v.source(),
        }
    }
}

/// Write-only destination for violations.
///
/// Sniffs hand every violation to a sink as soon as it is found; nothing
/// is read back.
pub trait ViolationSink {
    /// Records a single violation.
    fn report(&mut self, violation: Violation);
}

impl ViolationSink for Vec<Violation> {
    fn report(&mut self, violation: Violation) {
        self.push(violation);
    }
}

/// Result of running lint analysis.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct LintResult {
    /// All violations found.
    pub violations: Vec<Violation>,
    /// Number of files checked.
    pub files_checked: usize,
}

impl ViolationSink for LintResult {
    fn report(&mut self, violation: Violation) {
        self.violations.push(violation);
    }
}

impl LintResult {
    /// Creates a new empty result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if there are any errors.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.violations.iter().any(|v| v.severity.is_fatal())
    }

    /// Returns true if there are any warnings or errors.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        self.violations
            .iter()
            .any(|v| v.severity >= Severity::Warning)
    }

    /// Returns violations filtered by severity.
    #[must_use]
    pub fn by_severity(&self, severity: Severity) -> Vec<&Violation> {
        self.violations
            .iter()
            .filter(|v| v.severity == severity)
            .collect()
    }

    /// Counts violations by severity as `(errors, warnings)`.
    #[must_use]
    pub fn count_by_severity(&self) -> (usize, usize) {
        let errors = self
            .violations
            .iter()
            .filter(|v| v.severity == Severity::Error)
            .count();
        let warnings = self
            .violations
            .iter()
            .filter(|v| v.severity == Severity::Warning)
            .count();
        (errors, warnings)
    }

    /// Adds violations from another result.
    pub fn extend(&mut self, other: Self) {
        self.violations.extend(other.violations);
        self.files_checked += other.files_checked;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_violation(severity: Severity) -> Violation {
        Violation::new(
            "function-restrictions",
            "lambda",
            severity,
            Location::new(PathBuf::from("src/index.php"), 3, 5),
            "Use anonymous functions instead please!",
            "eval",
        )
    }

    #[test]
    fn severity_from_type_str() {
        assert_eq!(Severity::from_type_str("warning"), Severity::Warning);
        assert_eq!(Severity::from_type_str("error"), Severity::Error);
        assert_eq!(Severity::from_type_str("critical"), Severity::Error);
        assert_eq!(Severity::from_type_str(""), Severity::Error);
    }

    #[test]
    fn only_error_is_fatal() {
        assert!(Severity::Error.is_fatal());
        assert!(!Severity::Warning.is_fatal());
    }

    #[test]
    fn violation_source_joins_rule_and_group() {
        let v = make_violation(Severity::Error);
        assert_eq!(v.source(), "function-restrictions.lambda");
    }

    #[test]
    fn violation_display() {
        let v = make_violation(Severity::Error);
        insta::assert_snapshot!(
            v.to_string(),
            @"src/index.php:3:5: error [lambda] Use anonymous functions instead please!"
        );
    }

    #[test]
    fn violation_display_includes_doc_ref() {
        let v = make_violation(Severity::Warning).with_doc_ref("docs/lambda.md");
        assert!(v.to_string().ends_with("(see: docs/lambda.md)"));
    }

    #[test]
    fn violation_format_omits_doc_ref_when_none() {
        let v = make_violation(Severity::Error);
        let formatted = v.format();
        let header = "function-restrictions.lambda at src/index.php:3:5";
        assert!(formatted.starts_with(header));
        assert!(!formatted.contains("see:"));
    }

    #[test]
    fn location_from_token_copies_position() {
        let token = Token::new(crate::TokenKind::Identifier, "eval", 2, 7, 12);
        let loc = Location::from_token(PathBuf::from("a.php"), &token, 4);
        assert_eq!(loc.line, 2);
        assert_eq!(loc.column, 7);
        assert_eq!(loc.offset, 12);
        assert_eq!(loc.length, 4);
        assert_eq!(loc.token, 4);
    }

    #[test]
    fn diagnostic_carries_group_and_message() {
        let diag = ViolationDiagnostic::from(&make_violation(Severity::Warning));
        assert_eq!(
            diag.to_string(),
            "[lambda] Use anonymous functions instead please!"
        );
    }

    #[test]
    fn sink_collects_into_result() {
        let mut result = LintResult::new();
        result.report(make_violation(Severity::Warning));
        result.report(make_violation(Severity::Error));
        assert_eq!(result.count_by_severity(), (1, 1));
        assert!(result.has_errors());
        assert_eq!(result.by_severity(Severity::Warning).len(), 1);
    }

    #[test]
    fn warnings_only_has_no_errors() {
        let mut result = LintResult::new();
        result.report(make_violation(Severity::Warning));
        assert!(!result.has_errors());
        assert!(result.has_warnings());
    }

    #[test]
    fn extend_merges_counts() {
        let mut a = LintResult::new();
        a.files_checked = 2;
        a.report(make_violation(Severity::Error));
        let mut b = LintResult::new();
        b.files_checked = 3;
        b.report(make_violation(Severity::Warning));
        a.extend(b);
        assert_eq!(a.files_checked, 5);
        assert_eq!(a.violations.len(), 2);
    }
}
