//! Configuration file resolution and loading.
//!
//! The configuration file is looked up in a fixed order:
//!
//! 1. `--config` flag (explicit path)
//! 2. `{project}/fn-restrict.toml` or `.fn-restrict.toml`
//! 3. `$FN_RESTRICT_CONFIG_DIR/config.toml`, else `~/.fn-restrict/config.toml`
//! 4. Nothing found: built-in defaults
//!
//! One file carries both the analyzer [`Config`] and any `[[groups]]`.

use anyhow::{Context, Result};
use fn_restrict_core::groups::load_groups_from_toml;
use fn_restrict_core::{Config, GroupSet};
use std::path::{Path, PathBuf};

/// Where the configuration was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Explicitly specified via `--config` flag.
    Explicit(PathBuf),
    /// Found in the project directory.
    Project(PathBuf),
    /// Loaded from the global config directory.
    Global(PathBuf),
    /// No config found; defaults will be used.
    Default,
}

impl ConfigSource {
    /// Returns the resolved path, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(p) | Self::Project(p) | Self::Global(p) => Some(p),
            Self::Default => None,
        }
    }

    /// Returns `true` if the config was loaded from the global directory.
    #[must_use]
    pub fn is_global(&self) -> bool {
        matches!(self, Self::Global(_))
    }
}

/// Analyzer settings and rule groups read from one configuration file.
#[derive(Debug, Default)]
pub struct LoadedConfig {
    /// `[analyzer]`, `[sniffs.*]` and `[restrictions]`.
    pub config: Config,
    /// `[[groups]]` defined in the file.
    pub groups: GroupSet,
}

const PROJECT_CONFIG_NAMES: &[&str] = &["fn-restrict.toml", ".fn-restrict.toml"];
const GLOBAL_CONFIG_NAME: &str = "config.toml";
const CONFIG_DIR_ENV: &str = "FN_RESTRICT_CONFIG_DIR";

/// Resolves the configuration file for `project`, which may be a directory
/// or a single file.
#[must_use]
pub fn resolve(project: &Path, explicit: Option<&Path>) -> ConfigSource {
    let project_dir = if project.is_file() {
        project.parent().unwrap_or(project)
    } else {
        project
    };
    resolve_in(project_dir, explicit, global_config_dir())
}

fn resolve_in(
    project_dir: &Path,
    explicit: Option<&Path>,
    global_dir: Option<PathBuf>,
) -> ConfigSource {
    if let Some(p) = explicit {
        return ConfigSource::Explicit(p.to_path_buf());
    }

    if let Some(found) = PROJECT_CONFIG_NAMES
        .iter()
        .map(|name| project_dir.join(name))
        .find(|candidate| candidate.is_file())
    {
        tracing::debug!("Found project config: {}", found.display());
        return ConfigSource::Project(found);
    }

    if let Some(found) = global_dir
        .map(|dir| dir.join(GLOBAL_CONFIG_NAME))
        .filter(|candidate| candidate.is_file())
    {
        tracing::debug!("Found global config: {}", found.display());
        return ConfigSource::Global(found);
    }

    ConfigSource::Default
}

/// Returns the global config directory: `$FN_RESTRICT_CONFIG_DIR`, else
/// `~/.fn-restrict/`.
#[must_use]
pub fn global_config_dir() -> Option<PathBuf> {
    std::env::var_os(CONFIG_DIR_ENV)
        .map(PathBuf::from)
        .or_else(|| home::home_dir().map(|h| h.join(".fn-restrict")))
}

/// Reads and parses the resolved configuration.
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not valid TOML, or
/// defines invalid groups.
pub fn load(source: &ConfigSource) -> Result<LoadedConfig> {
    let Some(path) = source.path() else {
        return Ok(LoadedConfig::default());
    };
    if source.is_global() {
        tracing::info!("Using global config: {}", path.display());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config: {}", path.display()))?;
    parse(&content).with_context(|| format!("Failed to load config: {}", path.display()))
}

fn parse(content: &str) -> Result<LoadedConfig> {
    Ok(LoadedConfig {
        config: Config::parse(content)?,
        groups: load_groups_from_toml(content)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn explicit_wins_without_existence_check() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("fn-restrict.toml"), "").unwrap();

        let explicit = Path::new("/nonexistent/custom.toml");
        let result = resolve_in(tmp.path(), Some(explicit), None);
        assert_eq!(result, ConfigSource::Explicit(explicit.to_path_buf()));
    }

    #[test]
    fn project_names_checked_in_order() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(".fn-restrict.toml"), "").unwrap();
        assert_eq!(
            resolve_in(tmp.path(), None, None),
            ConfigSource::Project(tmp.path().join(".fn-restrict.toml"))
        );

        fs::write(tmp.path().join("fn-restrict.toml"), "").unwrap();
        assert_eq!(
            resolve_in(tmp.path(), None, None),
            ConfigSource::Project(tmp.path().join("fn-restrict.toml"))
        );
    }

    #[test]
    fn global_used_only_without_project_config() {
        let project = TempDir::new().unwrap();
        let global = TempDir::new().unwrap();
        fs::write(global.path().join("config.toml"), "").unwrap();

        let result = resolve_in(project.path(), None, Some(global.path().to_path_buf()));
        assert!(result.is_global());
        assert_eq!(
            result.path(),
            Some(global.path().join("config.toml").as_path())
        );

        fs::write(project.path().join("fn-restrict.toml"), "").unwrap();
        let result = resolve_in(project.path(), None, Some(global.path().to_path_buf()));
        assert!(matches!(result, ConfigSource::Project(_)));
    }

    #[test]
    fn defaults_when_nothing_found() {
        let project = TempDir::new().unwrap();
        let empty_global = TempDir::new().unwrap();
        let result = resolve_in(
            project.path(),
            None,
            Some(empty_global.path().to_path_buf()),
        );
        assert_eq!(result, ConfigSource::Default);
        assert!(result.path().is_none());
    }

    #[test]
    fn single_file_resolves_from_parent() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("index.php");
        fs::write(&file, "<?php").unwrap();
        fs::write(tmp.path().join("fn-restrict.toml"), "").unwrap();

        assert_eq!(
            resolve(&file, None),
            ConfigSource::Project(tmp.path().join("fn-restrict.toml"))
        );
    }

    #[test]
    fn load_reads_config_and_groups() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("fn-restrict.toml");
        fs::write(
            &path,
            r#"
[restrictions]
presets = ["lambda"]
exclude = "debug"

[[groups]]
name = "legacy"
type = "warning"
message = "%s() is legacy"
functions = ["mysql_*"]
"#,
        )
        .unwrap();

        let loaded = load(&ConfigSource::Project(path)).unwrap();
        assert_eq!(loaded.config.restrictions.presets, vec!["lambda"]);
        assert_eq!(loaded.config.restrictions.exclude, "debug");
        assert!(loaded.groups.contains("legacy"));
    }

    #[test]
    fn load_default_is_empty() {
        let loaded = load(&ConfigSource::Default).unwrap();
        assert!(loaded.groups.is_empty());
        assert!(loaded.config.restrictions.presets.is_empty());
    }

    #[test]
    fn load_reports_invalid_groups() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("fn-restrict.toml");
        fs::write(&path, "[[groups]]\nname = \"a,b\"\nmessage = \"m\"\n").unwrap();

        let err = load(&ConfigSource::Explicit(path)).unwrap_err();
        assert!(format!("{err:#}").contains("groups[0].name"));
    }

    #[test]
    fn load_reports_missing_explicit_file() {
        let missing = ConfigSource::Explicit(PathBuf::from("/nonexistent/x.toml"));
        let err = load(&missing).unwrap_err();
        assert!(err.to_string().contains("Failed to read config"));
    }
}
