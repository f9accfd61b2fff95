//! List-groups command implementation.

use anyhow::{bail, Result};
use fn_restrict_core::{GroupSet, NamePattern, RuleGroup};
use fn_restrict_rules::{all_groups, Preset};

use crate::config_resolver::{self, ConfigSource};

/// Runs the list-groups command.
pub fn run(source: &ConfigSource, presets: &[String]) -> Result<()> {
    let builtin = if presets.is_empty() {
        all_groups()
    } else {
        let mut groups = GroupSet::new();
        for name in presets {
            let Some(preset) = Preset::from_name(name) else {
                bail!("Unknown preset '{name}'");
            };
            groups.merge(preset.groups());
        }
        groups
    };

    println!("Built-in groups:\n");
    for group in &builtin {
        print_group(group, "");
    }

    let loaded = config_resolver::load(source)?;
    if !loaded.groups.is_empty() {
        println!("Configured groups:\n");
        for group in &loaded.groups {
            let marker = if builtin.contains(group.id().as_str()) {
                " (config, overrides built-in)"
            } else {
                " (config)"
            };
            print_group(group, marker);
        }
    }

    println!("Presets:");
    for preset in Preset::ALL {
        println!("  {preset}");
    }

    Ok(())
}

fn print_group(group: &RuleGroup, marker: &str) {
    let patterns: Vec<&str> = group
        .name_patterns()
        .iter()
        .map(NamePattern::as_str)
        .collect();
    println!("  {} [{}]{}", group.id(), group.severity(), marker);
    println!("    {}", patterns.join(", "));
    if !group.allow_list().is_empty() {
        let mut allowed: Vec<&str> = group.allow_list().iter().map(String::as_str).collect();
        allowed.sort_unstable();
        println!("    allows: {}", allowed.join(", "));
    }
    println!();
}
