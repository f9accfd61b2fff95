//! Shared output formatting for lint results.

use anyhow::Result;
use fn_restrict_core::{LintResult, ViolationDiagnostic};
use miette::{NamedSource, Report};
use std::path::Path;

use crate::OutputFormat;

/// Print lint results in the specified format.
///
/// `base` is the directory violation paths are relative to; the rich
/// format reads sources from it.
pub fn print(result: &LintResult, format: OutputFormat, base: &Path) -> Result<()> {
    match format {
        OutputFormat::Text => print_text(result),
        OutputFormat::Json => return print_json(result),
        OutputFormat::Compact => print_compact(result),
        OutputFormat::Rich => print_rich(result, base),
    }
    Ok(())
}

fn print_text(result: &LintResult) {
    for violation in &result.violations {
        println!("{}", violation.format());
    }
    print_summary(result);
}

fn print_summary(result: &LintResult) {
    let (errors, warnings) = result.count_by_severity();
    let summary_color = if errors > 0 {
        "\x1b[31m"
    } else if warnings > 0 {
        "\x1b[33m"
    } else {
        "\x1b[32m"
    };

    println!(
        "{}Found {} error(s), {} warning(s) in {} file(s)\x1b[0m",
        summary_color, errors, warnings, result.files_checked
    );
}

fn print_json(result: &LintResult) -> Result<()> {
    let json = serde_json::to_string_pretty(result)?;
    println!("{json}");
    Ok(())
}

fn print_compact(result: &LintResult) {
    for violation in &result.violations {
        println!("{violation}");
    }
}

fn print_rich(result: &LintResult, base: &Path) {
    for violation in &result.violations {
        let file = &violation.location.file;
        let diagnostic = ViolationDiagnostic::from(violation);
        let report = match std::fs::read(base.join(file)) {
            Ok(bytes) => Report::new(diagnostic).with_source_code(NamedSource::new(
                file.display().to_string(),
                String::from_utf8_lossy(&bytes).into_owned(),
            )),
            Err(e) => {
                tracing::debug!("No source for {}: {}", file.display(), e);
                Report::new(diagnostic)
            }
        };
        eprintln!("{report:?}");
    }
    print_summary(result);
}
