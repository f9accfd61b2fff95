//! # fn-restrict-rules
//!
//! Built-in restricted function groups for fn-restrict.
//!
//! Groups are plain data: each module returns [`RuleGroup`] values that
//! are fed to a [`fn_restrict_core::RestrictionMatcher`]. Presets bundle
//! them for common configurations.
//!
//! ## Available Groups
//!
//! | Group | Severity | Preset | Functions |
//! |-------|----------|--------|-----------|
//! | `lambda` | error | lambda | `eval`, `create_function` |
//! | `runtime_configuration` | warning | discouraged | `ini_set`, `putenv`, `set_time_limit`, ... |
//! | `obfuscation` | warning | discouraged | `base64_decode`, `str_rot13`, ... |
//! | `serialize` | warning | discouraged | `serialize`, `unserialize` |
//! | `debug` | warning | discouraged | `var_dump`, `print_r`, `error_log`, ... |
//! | `switch_to_blog` | error | restricted | `switch_to_blog` |
//! | `user_meta` | error | restricted | `get_user_meta`, `update_user_meta`, ... |
//! | `cookies` | warning | restricted | `setcookie`, `setrawcookie` |
//! | `curl` | warning | restricted | `curl_*` (allows `curl_version`) |
//! | `remote_requests` | warning | restricted | `file_get_contents`, `fsockopen`, ... |
//!
//! `recommended` is `lambda` plus `discouraged`.
//!
//! ## Usage
//!
//! ```ignore
//! use fn_restrict_core::RestrictionMatcher;
//! use fn_restrict_rules::Preset;
//!
//! let matcher = RestrictionMatcher::builder()
//!     .groups(Preset::Recommended.groups())
//!     .exclude("debug")
//!     .build();
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod discouraged;
pub mod lambda;
mod presets;
pub mod restricted;

pub use presets::{all_groups, recommended_groups, Preset};

/// Re-export core types for convenience.
pub use fn_restrict_core::{GroupSet, RuleGroup, Severity};
