//! Init command implementation.

use anyhow::{bail, Result};
use std::path::Path;

const CONFIG_NAME: &str = "fn-restrict.toml";

const DEFAULT_CONFIG: &str = r#"# fn-restrict configuration

[analyzer]
# Root directory to analyze (default: current directory)
# root = "./src"

# Glob patterns to exclude from analysis
exclude = [
    "**/vendor/**",
    "**/node_modules/**",
]

# Extensions to scan (default: .php, .inc)
# extensions = [".php"]

# Respect .gitignore files
respect_gitignore = true

[sniffs.function-restrictions]
enabled = true
# severity = "warning"  # Override the severity of every group

[restrictions]
# Built-in presets: recommended, lambda, discouraged, restricted
presets = ["recommended"]

# Comma-separated group ids to skip
exclude = ""

# Project groups. A group with a built-in id replaces that group.
# `%s` in the message is replaced with the called function's name.
#
# [[groups]]
# name = "legacy_mysql"
# type = "error"
# message = "%s() was removed in PHP 7; use mysqli or PDO."
# functions = ["mysql_*"]
# allow = []
"#;

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    write_config(Path::new(CONFIG_NAME), force)?;

    println!("Created {CONFIG_NAME}");
    println!("\nNext steps:");
    println!("  1. Edit {CONFIG_NAME} to choose presets and groups");
    println!("  2. Run: fn-restrict check");

    Ok(())
}

fn write_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }
    std::fs::write(path, DEFAULT_CONFIG)?;
    Ok(())
}
