//! Configuration types for fn-restrict.
//!
//! Rule groups (`[[groups]]`) live in the same file but are loaded
//! separately through [`crate::groups::load_groups_from_toml`].

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Top-level configuration for fn-restrict.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Analyzer configuration.
    #[serde(default)]
    pub analyzer: AnalyzerConfig,

    /// Per-sniff configurations, keyed by sniff name.
    #[serde(default)]
    pub sniffs: HashMap<String, SniffConfig>,

    /// Restricted-function settings.
    #[serde(default)]
    pub restrictions: RestrictionsConfig,
}

impl Config {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Checks if a sniff is enabled.
    #[must_use]
    pub fn is_sniff_enabled(&self, sniff_name: &str) -> bool {
        self.sniffs
            .get(sniff_name)
            .map_or(true, |c| c.enabled.unwrap_or(true))
    }

    /// Gets the severity override for a sniff.
    #[must_use]
    pub fn sniff_severity(&self, sniff_name: &str) -> Option<crate::Severity> {
        self.sniffs.get(sniff_name).and_then(|c| c.severity)
    }
}

/// Analyzer-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Root directory to analyze (default: current directory).
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Glob patterns to exclude from analysis.
    #[serde(default)]
    pub exclude: Vec<String>,

    /// File extensions to scan (e.g., `[".php"]`). Empty means the
    /// tokenizer's own extensions.
    #[serde(default)]
    pub extensions: Vec<String>,

    /// Whether to respect .gitignore files.
    #[serde(default = "default_true")]
    pub respect_gitignore: bool,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            exclude: vec!["**/vendor/**".to_string(), "**/node_modules/**".to_string()],
            extensions: Vec::new(),
            respect_gitignore: true,
        }
    }
}

fn default_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_true() -> bool {
    true
}

/// Per-sniff configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SniffConfig {
    /// Whether this sniff is enabled.
    #[serde(default)]
    pub enabled: Option<bool>,

    /// Severity override for every violation this sniff reports.
    #[serde(default)]
    pub severity: Option<crate::Severity>,
}

/// Settings for the restricted-function matcher.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RestrictionsConfig {
    /// Built-in presets to enable (e.g., `["recommended"]`).
    #[serde(default)]
    pub presets: Vec<String>,

    /// Comma-delimited group identifiers to skip (e.g., `"switch_to_blog,user_meta"`).
    #[serde(default)]
    pub exclude: String,
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in config file.
    #[error("Failed to parse config: {message}")]
    Parse {
        /// Parse error message.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Severity;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.analyzer.respect_gitignore);
        assert!(config.sniffs.is_empty());
        assert!(config.restrictions.presets.is_empty());
        assert!(config.restrictions.exclude.is_empty());
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
[analyzer]
root = "./src"
exclude = ["**/generated/**"]
extensions = [".php"]

[sniffs.function-restrictions]
enabled = true
severity = "warning"

[restrictions]
presets = ["recommended"]
exclude = "switch_to_blog,user_meta"

[[groups]]
name = "ignored-here"
message = "m"
"#;

        let config = Config::parse(toml).expect("Failed to parse");
        assert_eq!(config.analyzer.root, PathBuf::from("./src"));
        assert_eq!(config.analyzer.extensions, vec![".php"]);
        assert!(config.is_sniff_enabled("function-restrictions"));
        assert_eq!(
            config.sniff_severity("function-restrictions"),
            Some(Severity::Warning)
        );
        assert_eq!(config.restrictions.presets, vec!["recommended"]);
        assert_eq!(config.restrictions.exclude, "switch_to_blog,user_meta");
    }

    #[test]
    fn test_disabled_sniff() {
        let config = Config::parse("[sniffs.function-restrictions]\nenabled = false\n").unwrap();
        assert!(!config.is_sniff_enabled("function-restrictions"));
        assert!(config.is_sniff_enabled("other"));
        assert_eq!(config.sniff_severity("function-restrictions"), None);
    }

    #[test]
    fn test_invalid_config() {
        let err = Config::parse("[analyzer\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_missing_file() {
        let err = Config::from_file(std::path::Path::new("/nonexistent/fn-restrict.toml"))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
