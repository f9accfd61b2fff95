//! fn-restrict CLI tool.
//!
//! Usage:
//! ```bash
//! fn-restrict check [OPTIONS] [PATH]
//! fn-restrict list-groups
//! fn-restrict init
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

mod commands;
mod config_resolver;

/// Flags bare calls to restricted PHP functions
#[derive(Parser)]
#[command(name = "fn-restrict")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run lint checks
    Check {
        /// Path to analyze (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// Exclude patterns (can be specified multiple times)
        #[arg(short, long)]
        exclude: Vec<String>,

        /// Rule groups to skip (comma-separated, e.g. `debug,user_meta`)
        #[arg(long, env = "FN_RESTRICT_EXCLUDE_GROUPS")]
        exclude_groups: Option<String>,

        /// Built-in presets to enable (can be specified multiple times)
        #[arg(short, long)]
        preset: Vec<String>,

        /// Fail when a file cannot be read or tokenized
        #[arg(long)]
        strict: bool,
    },

    /// List available rule groups
    ListGroups {
        /// Only list groups from these presets
        #[arg(short, long)]
        preset: Vec<String>,
    },

    /// Initialize configuration file
    Init {
        /// Overwrite existing config
        #[arg(long)]
        force: bool,
    },
}

/// Output format for lint results.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON output.
    Json,
    /// One-line-per-violation compact format.
    Compact,
    /// Source snippets rendered with miette.
    Rich,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Check {
            path,
            format,
            exclude,
            exclude_groups,
            preset,
            strict,
        } => {
            let source = config_resolver::resolve(&path, cli.config.as_deref());
            let options = commands::check::CheckOptions {
                format,
                exclude,
                exclude_groups,
                presets: preset,
                strict,
            };
            commands::check::run(&path, &source, options)
        }
        Commands::ListGroups { preset } => {
            let source = config_resolver::resolve(Path::new("."), cli.config.as_deref());
            commands::list_groups::run(&source, &preset)
        }
        Commands::Init { force } => commands::init::run(force),
    }
}
