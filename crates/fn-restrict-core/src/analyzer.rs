//! Core analyzer for orchestrating lint execution.

use crate::config::{Config, SniffConfig};
use crate::context::FileContext;
use crate::sniff::{Sniff, SniffBox};
use crate::token::{TokenKind, TokenStream, TokenizeError, Tokenizer};
use crate::types::{LintResult, Violation};

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur during analysis.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// IO error resolving the root directory.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A source file could not be read.
    #[error("Failed to read {path}: {source}")]
    Read {
        /// Path to the unreadable file.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// A source file could not be tokenized.
    #[error("Tokenize error in {path}: {source}")]
    Tokenize {
        /// Path to the file that failed to tokenize.
        path: PathBuf,
        /// Underlying tokenizer error.
        source: TokenizeError,
    },

    /// File discovery failed.
    #[error("File discovery error: {0}")]
    Walk(#[from] ignore::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// No tokenizer was given to the builder.
    #[error("No tokenizer configured")]
    MissingTokenizer,
}

/// Builder for configuring an [`Analyzer`].
#[derive(Default)]
pub struct AnalyzerBuilder {
    root: Option<PathBuf>,
    sniffs: Vec<SniffBox>,
    tokenizer: Option<Box<dyn Tokenizer>>,
    exclude_patterns: Vec<String>,
    config: Option<Config>,
    fail_on_tokenize_error: bool,
}

impl AnalyzerBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the root directory (or single file) to analyze.
    #[must_use]
    pub fn root(mut self, path: impl Into<PathBuf>) -> Self {
        self.root = Some(path.into());
        self
    }

    /// Adds a sniff to the analyzer.
    #[must_use]
    pub fn sniff<S: Sniff + 'static>(mut self, sniff: S) -> Self {
        self.sniffs.push(Box::new(sniff));
        self
    }

    /// Adds a boxed sniff to the analyzer.
    #[must_use]
    pub fn sniff_box(mut self, sniff: SniffBox) -> Self {
        self.sniffs.push(sniff);
        self
    }

    /// Sets the tokenizer used for every file.
    #[must_use]
    pub fn tokenizer<T: Tokenizer + 'static>(mut self, tokenizer: T) -> Self {
        self.tokenizer = Some(Box::new(tokenizer));
        self
    }

    /// Adds an exclude glob pattern.
    #[must_use]
    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude_patterns.push(pattern.into());
        self
    }

    /// Adds multiple exclude glob patterns.
    #[must_use]
    pub fn excludes<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_patterns
            .extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Sets the configuration.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Sets whether to fail on unreadable or untokenizable files (default: false).
    #[must_use]
    pub fn fail_on_tokenize_error(mut self, fail: bool) -> Self {
        self.fail_on_tokenize_error = fail;
        self
    }

    /// Builds the analyzer.
    ///
    /// # Errors
    ///
    /// Returns an error if no tokenizer was set or the working directory
    /// cannot be resolved.
    pub fn build(self) -> Result<Analyzer, AnalyzerError> {
        let tokenizer = self.tokenizer.ok_or(AnalyzerError::MissingTokenizer)?;
        let config = self.config.unwrap_or_default();

        let root = self.root.unwrap_or_else(|| config.analyzer.root.clone());
        let root = if root.is_absolute() {
            root
        } else {
            std::env::current_dir()?.join(&root)
        };

        let mut exclude_patterns = self.exclude_patterns;
        exclude_patterns.extend(config.analyzer.exclude.iter().cloned());

        let extensions = if config.analyzer.extensions.is_empty() {
            tokenizer
                .extensions()
                .iter()
                .map(|e| (*e).to_string())
                .collect()
        } else {
            config.analyzer.extensions.clone()
        };

        let mut sniffs = Vec::new();
        for sniff in self.sniffs {
            if config.is_sniff_enabled(sniff.name()) {
                sniffs.push(sniff);
            } else {
                debug!("Skipping disabled sniff: {}", sniff.name());
            }
        }

        let listeners = build_listeners(&sniffs);

        Ok(Analyzer {
            root,
            sniffs,
            listeners,
            tokenizer,
            exclude_patterns,
            extensions,
            config,
            fail_on_tokenize_error: self.fail_on_tokenize_error,
        })
    }
}

/// Maps each token kind to the indices of the sniffs registered for it.
fn build_listeners(sniffs: &[SniffBox]) -> HashMap<TokenKind, Vec<usize>> {
    let mut listeners: HashMap<TokenKind, Vec<usize>> = HashMap::new();
    for (index, sniff) in sniffs.iter().enumerate() {
        let kinds = sniff.register();
        if kinds.is_empty() {
            debug!("Sniff {} registered for no tokens", sniff.name());
        }
        for kind in kinds {
            let entry = listeners.entry(kind).or_default();
            if !entry.contains(&index) {
                entry.push(index);
            }
        }
    }
    listeners
}

/// The main analyzer that orchestrates lint execution.
///
/// Use [`Analyzer::builder()`] to construct an instance.
pub struct Analyzer {
    root: PathBuf,
    sniffs: Vec<SniffBox>,
    listeners: HashMap<TokenKind, Vec<usize>>,
    tokenizer: Box<dyn Tokenizer>,
    exclude_patterns: Vec<String>,
    extensions: Vec<String>,
    config: Config,
    fail_on_tokenize_error: bool,
}

impl Analyzer {
    /// Creates a new builder for configuring an analyzer.
    #[must_use]
    pub fn builder() -> AnalyzerBuilder {
        AnalyzerBuilder::new()
    }

    /// Returns the root being analyzed.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the number of enabled sniffs.
    #[must_use]
    pub fn sniff_count(&self) -> usize {
        self.sniffs.len()
    }

    /// Returns true if at least one sniff listens for some token kind.
    #[must_use]
    pub fn has_listeners(&self) -> bool {
        !self.listeners.is_empty()
    }

    /// Analyzes all files and returns the results.
    ///
    /// # Errors
    ///
    /// Returns an error if file discovery fails, or if a file cannot be
    /// read or tokenized while `fail_on_tokenize_error` is set.
    pub fn analyze(&self) -> Result<LintResult, AnalyzerError> {
        info!("Starting analysis at {:?}", self.root);

        let mut result = LintResult::new();
        let files = self.discover_files()?;

        info!("Found {} files to analyze", files.len());

        for file_path in &files {
            match self.analyze_file(file_path) {
                Ok(violations) => {
                    result.violations.extend(violations);
                    result.files_checked += 1;
                }
                Err(e @ (AnalyzerError::Read { .. } | AnalyzerError::Tokenize { .. })) => {
                    warn!("{e}");
                    if self.fail_on_tokenize_error {
                        return Err(e);
                    }
                }
                Err(e) => return Err(e),
            }
        }

        sort_violations(&mut result.violations);

        info!(
            "Analysis complete: {} violations in {} files",
            result.violations.len(),
            result.files_checked
        );

        Ok(result)
    }

    /// Analyzes source text as if it were the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the source cannot be tokenized.
    pub fn analyze_source(
        &self,
        path: &Path,
        content: &str,
    ) -> Result<Vec<Violation>, AnalyzerError> {
        let tokens = self
            .tokenizer
            .tokenize(content)
            .map_err(|source| AnalyzerError::Tokenize {
                path: path.to_path_buf(),
                source,
            })?;

        let ctx = FileContext::new(path, self.base_dir());
        let mut violations = self.scan_tokens(&ctx, &tokens);
        sort_violations(&mut violations);
        Ok(violations)
    }

    /// Visits every token in stream order and dispatches it to the sniffs
    /// registered for its kind.
    #[must_use]
    pub fn scan_tokens(&self, ctx: &FileContext, tokens: &TokenStream) -> Vec<Violation> {
        let mut violations = Vec::new();
        if self.listeners.is_empty() {
            return violations;
        }

        for (ptr, token) in tokens.iter().enumerate() {
            let Some(listeners) = self.listeners.get(&token.kind) else {
                continue;
            };
            for &index in listeners {
                self.sniffs[index].process(ctx, tokens, ptr, &mut violations);
            }
        }

        self.apply_severity_override(&mut violations);
        violations
    }

    /// Analyzes a single file and returns violations.
    fn analyze_file(&self, path: &Path) -> Result<Vec<Violation>, AnalyzerError> {
        debug!("Analyzing: {}", path.display());

        let bytes = std::fs::read(path).map_err(|source| AnalyzerError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let content = String::from_utf8_lossy(&bytes);
        if matches!(content, std::borrow::Cow::Owned(_)) {
            debug!("{} is not valid UTF-8; decoding lossily", path.display());
        }
        self.analyze_source(path, &content)
    }

    /// Applies severity overrides from configuration.
    fn apply_severity_override(&self, violations: &mut [Violation]) {
        for v in violations {
            if let Some(severity) = self.config.sniff_severity(&v.rule) {
                v.severity = severity;
            }
        }
    }

    /// Directory that reported paths are relative to.
    fn base_dir(&self) -> &Path {
        if self.root.is_file() {
            self.root.parent().unwrap_or(self.root.as_path())
        } else {
            &self.root
        }
    }

    /// Discovers all source files to analyze.
    fn discover_files(&self) -> Result<Vec<PathBuf>, AnalyzerError> {
        let respect_gitignore = self.config.analyzer.respect_gitignore;
        let mut builder = ignore::WalkBuilder::new(&self.root);
        builder
            .hidden(false)
            .git_ignore(respect_gitignore)
            .git_exclude(respect_gitignore)
            .ignore(respect_gitignore)
            .require_git(false);

        let mut files = Vec::new();
        for entry in builder.build() {
            let entry = entry?;
            let path = entry.path();

            if !path.is_file() || !self.has_supported_extension(path) {
                continue;
            }

            if self.should_exclude(path) {
                debug!("Excluding: {}", path.display());
                continue;
            }

            files.push(path.to_path_buf());
        }

        files.sort();
        Ok(files)
    }

    fn has_supported_extension(&self, path: &Path) -> bool {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| format!(".{e}"))
            .unwrap_or_default();
        self.extensions.iter().any(|e| e.eq_ignore_ascii_case(&ext))
    }

    /// Checks if a path should be excluded.
    fn should_exclude(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy();

        for pattern in &self.exclude_patterns {
            if let Ok(glob_pattern) = glob::Pattern::new(pattern) {
                if glob_pattern.matches(&path_str) {
                    return true;
                }
            }

            // Also check as substring for patterns like "**/vendor/**"
            let normalized_pattern = pattern.replace("**", "");
            if !normalized_pattern.is_empty() && path_str.contains(&normalized_pattern) {
                return true;
            }
        }

        false
    }

    /// Gets the configuration for a specific sniff.
    #[must_use]
    pub fn sniff_config(&self, sniff_name: &str) -> Option<&SniffConfig> {
        self.config.sniffs.get(sniff_name)
    }
}

/// Sorts by file, line and column. Ties keep emission order.
fn sort_violations(violations: &mut [Violation]) {
    violations.sort_by(|a, b| {
        a.location
            .file
            .cmp(&b.location.file)
            .then(a.location.line.cmp(&b.location.line))
            .then(a.location.column.cmp(&b.location.column))
    });
}
