//! Functions that are legal but rarely belong in shipped code.

use fn_restrict_core::{RuleGroup, Severity};

/// Changing PHP configuration at runtime.
pub const RUNTIME_CONFIGURATION: &str = "runtime_configuration";
/// Encoding helpers commonly used to hide payloads.
pub const OBFUSCATION: &str = "obfuscation";
/// Native PHP serialization.
pub const SERIALIZE: &str = "serialize";
/// Debug output and error-handler manipulation.
pub const DEBUG: &str = "debug";

/// Returns the discouraged groups. All are warnings.
#[must_use]
pub fn groups() -> Vec<RuleGroup> {
    vec![
        RuleGroup::new(
            RUNTIME_CONFIGURATION,
            Severity::Warning,
            "%s() found. Changing configuration at runtime is rarely necessary.",
        )
        .patterns([
            "error_reporting",
            "ini_alter",
            "ini_restore",
            "ini_set",
            "apache_setenv",
            "putenv",
            "set_include_path",
            "restore_include_path",
            "set_time_limit",
            "dl",
        ]),
        RuleGroup::new(
            OBFUSCATION,
            Severity::Warning,
            "%s() can be used to obfuscate code which is strongly discouraged. \
             Please verify that the function is used for benign reasons.",
        )
        .patterns([
            "base64_decode",
            "base64_encode",
            "convert_uudecode",
            "convert_uuencode",
            "str_rot13",
        ]),
        RuleGroup::new(
            SERIALIZE,
            Severity::Warning,
            "%s() found. Serialized data has known vulnerability problems with \
             Object Injection. JSON is generally a better approach for serializing data.",
        )
        .patterns(["serialize", "unserialize"]),
        RuleGroup::new(
            DEBUG,
            Severity::Warning,
            "%s() found. Debug code should not normally be used in production.",
        )
        .patterns([
            "error_log",
            "var_dump",
            "var_export",
            "print_r",
            "trigger_error",
            "set_error_handler",
            "debug_backtrace",
            "debug_print_backtrace",
            "debug_zval_refcount",
        ]),
    ]
}
