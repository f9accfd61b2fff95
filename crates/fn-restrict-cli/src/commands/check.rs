//! Check command implementation.

use anyhow::{bail, Context, Result};
use fn_restrict_core::{Analyzer, GroupSet, RestrictionMatcher};
use fn_restrict_rules::Preset;
use fn_restrict_ts::PhpTokenizer;
use std::path::Path;

use crate::config_resolver::{self, ConfigSource};
use crate::OutputFormat;

/// Command-line options for `check`.
pub struct CheckOptions {
    pub format: OutputFormat,
    pub exclude: Vec<String>,
    pub exclude_groups: Option<String>,
    pub presets: Vec<String>,
    pub strict: bool,
}

/// Runs the check command.
pub fn run(path: &Path, source: &ConfigSource, options: CheckOptions) -> Result<()> {
    let loaded = config_resolver::load(source)?;

    let presets = if options.presets.is_empty() {
        loaded.config.restrictions.presets.clone()
    } else {
        options.presets
    };
    let primary = select_groups(&presets, !loaded.groups.is_empty())?;

    let exclusions = join_exclusions(
        &loaded.config.restrictions.exclude,
        options.exclude_groups.as_deref(),
    );

    let matcher = RestrictionMatcher::builder()
        .groups(primary)
        .supplementary(loaded.groups)
        .exclude(exclusions)
        .build();

    let analyzer = Analyzer::builder()
        .root(path)
        .config(loaded.config)
        .tokenizer(PhpTokenizer::new())
        .sniff(matcher)
        .excludes(options.exclude)
        .fail_on_tokenize_error(options.strict)
        .build()
        .context("Failed to build analyzer")?;

    if !analyzer.has_listeners() {
        tracing::warn!("No active rule groups; nothing to check");
    }
    tracing::info!(
        "Analyzing {:?} with {} sniff(s)",
        path,
        analyzer.sniff_count()
    );

    let result = analyzer.analyze().context("Analysis failed")?;

    let base = if path.is_file() {
        path.parent().unwrap_or(path)
    } else {
        path
    };
    super::output::print(&result, options.format, base)?;

    if result.has_errors() {
        std::process::exit(1);
    }

    Ok(())
}

/// Collects the groups of the named presets, in order.
///
/// With no names, falls back to `recommended` unless the configuration
/// defines its own groups.
fn select_groups(presets: &[String], has_config_groups: bool) -> Result<GroupSet> {
    if presets.is_empty() {
        return Ok(if has_config_groups {
            GroupSet::new()
        } else {
            Preset::Recommended.groups()
        });
    }

    let mut groups = GroupSet::new();
    for name in presets {
        let Some(preset) = Preset::from_name(name) else {
            let valid: Vec<&str> = Preset::ALL.iter().map(|p| p.name()).collect();
            bail!(
                "Unknown preset '{}' (expected one of: {})",
                name,
                valid.join(", ")
            );
        };
        groups.merge(preset.groups());
    }
    Ok(groups)
}

fn join_exclusions(configured: &str, cli: Option<&str>) -> String {
    match cli {
        Some(extra) if !configured.trim().is_empty() => format!("{configured},{extra}"),
        Some(extra) => extra.to_string(),
        None => configured.to_string(),
    }
}
