//! Dynamic code evaluation.

use fn_restrict_core::{RuleGroup, Severity};

/// Group identifier.
pub const LAMBDA: &str = "lambda";

/// `eval` and `create_function` compile strings into code at runtime.
///
/// ```php
/// // Bad
/// $fn = create_function('$a', 'return $a * 2;');
/// eval('$x = 1;');
///
/// // Good
/// $fn = function ($a) { return $a * 2; };
/// ```
#[must_use]
pub fn groups() -> Vec<RuleGroup> {
    vec![
        RuleGroup::new(
            LAMBDA,
            Severity::Error,
            "Use anonymous functions instead please!",
        )
        .patterns(["eval", "create_function"]),
    ]
}
