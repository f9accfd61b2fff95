//! Integration test: PHP source through the real grammar and the restriction matcher.

use fn_restrict_core::{Analyzer, RestrictionMatcher, RuleGroup, Severity, Violation};
use fn_restrict_ts::PhpTokenizer;
use std::path::Path;

fn matcher() -> RestrictionMatcher {
    RestrictionMatcher::builder()
        .group(
            RuleGroup::new(
                "lambda",
                Severity::Error,
                "Use anonymous functions instead please!",
            )
            .patterns(["eval", "create_function"]),
        )
        .group(
            RuleGroup::new("debug", Severity::Warning, "%s() found")
                .patterns(["var_dump", "print_r"]),
        )
        .build()
}

fn scan(source: &str) -> Vec<Violation> {
    Analyzer::builder()
        .root(".")
        .tokenizer(PhpTokenizer::new())
        .sniff(matcher())
        .build()
        .expect("analyzer should build")
        .analyze_source(Path::new("index.php"), source)
        .expect("source should tokenize")
}

fn hits(found: &[Violation]) -> Vec<(usize, &str, &str)> {
    found
        .iter()
        .map(|v| (v.location.line, v.group.as_str(), v.matched.as_str()))
        .collect()
}

#[test]
fn eval_is_reported() {
    let found = scan("<?php\neval($x);\n");
    assert_eq!(hits(&found), vec![(2, "lambda", "eval")]);
    assert_eq!(found[0].severity, Severity::Error);
    assert_eq!(found[0].message, "Use anonymous functions instead please!");
}

#[test]
fn non_calls_are_ignored() {
    let source = r#"<?php
function var_dump() {}
$logger->var_dump($x);
$logger?->print_r($x);
Debug::var_dump($x);
My\Ns\print_r($x);
$s = 'var_dump($x)';
// var_dump($x);
"#;
    assert!(scan(source).is_empty());
}

#[test]
fn bare_and_global_calls_are_reported() {
    let source = "<?php\nVar_Dump($a);\n\\print_r($b);\n";
    let found = scan(source);
    assert_eq!(
        hits(&found),
        vec![(2, "debug", "Var_Dump"), (3, "debug", "print_r")]
    );
    assert_eq!(found[0].message, "Var_Dump() found");
}

#[test]
fn directory_scan_reports_relative_paths() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    std::fs::create_dir_all(root.join("inc")).unwrap();
    std::fs::write(root.join("index.php"), "<?php create_function('', '');\n").unwrap();
    std::fs::write(root.join("inc/helpers.inc"), "<?php print_r($x);\n").unwrap();
    std::fs::write(root.join("readme.md"), "eval($x)\n").unwrap();

    let result = Analyzer::builder()
        .root(dir.path())
        .tokenizer(PhpTokenizer::new())
        .sniff(matcher())
        .build()
        .unwrap()
        .analyze()
        .unwrap();

    assert_eq!(result.files_checked, 2);
    let files: Vec<String> = result
        .violations
        .iter()
        .map(|v| v.location.file.display().to_string())
        .collect();
    assert_eq!(files, vec!["inc/helpers.inc", "index.php"]);
    assert!(result.has_errors());
}

#[test]
fn latin1_file_is_still_scanned() {
    let dir = tempfile::tempdir().unwrap();
    let source: &[u8] = b"<?php\n// caf\xE9\neval($x);\n";
    std::fs::write(dir.path().join("legacy.php"), source).unwrap();

    let result = Analyzer::builder()
        .root(dir.path())
        .tokenizer(PhpTokenizer::new())
        .sniff(matcher())
        .build()
        .unwrap()
        .analyze()
        .unwrap();

    assert_eq!(result.files_checked, 1);
    assert_eq!(hits(&result.violations), vec![(3, "lambda", "eval")]);
}
