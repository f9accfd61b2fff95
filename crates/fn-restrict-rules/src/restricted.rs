//! Functions that are unsafe or unsupported on hosted multi-site platforms.

use fn_restrict_core::{RuleGroup, Severity};

/// Switching the current site in a network.
pub const SWITCH_TO_BLOG: &str = "switch_to_blog";
/// Per-user meta storage.
pub const USER_META: &str = "user_meta";
/// Setting cookies from the server.
pub const COOKIES: &str = "cookies";
/// Direct HTTP requests through cURL.
pub const CURL: &str = "curl";
/// Unvalidated remote fetches.
pub const REMOTE_REQUESTS: &str = "remote_requests";

/// Returns the restricted groups.
#[must_use]
pub fn groups() -> Vec<RuleGroup> {
    vec![
        RuleGroup::new(
            SWITCH_TO_BLOG,
            Severity::Error,
            "%s() is not something you should ever need to do in a theme context. \
             Use an API (XML-RPC, REST) to interact with other sites instead.",
        )
        .patterns(["switch_to_blog"]),
        RuleGroup::new(
            USER_META,
            Severity::Error,
            "%s() usage is highly discouraged, user meta is shared across the whole network.",
        )
        .patterns([
            "add_user_meta",
            "delete_user_meta",
            "get_user_meta",
            "update_user_meta",
        ]),
        RuleGroup::new(
            COOKIES,
            Severity::Warning,
            "Due to page caching, server side based client related logic will not work, \
             use JS instead.",
        )
        .patterns(["setcookie", "setrawcookie"]),
        RuleGroup::new(
            CURL,
            Severity::Warning,
            "Using cURL functions is highly discouraged. Use wp_remote_get() instead.",
        )
        .patterns(["curl_*"])
        .allow(["curl_version"]),
        RuleGroup::new(
            REMOTE_REQUESTS,
            Severity::Warning,
            "%s() is highly discouraged for remote requests, please use wp_remote_get() instead.",
        )
        .patterns(["file_get_contents", "fsockopen", "pfsockopen"]),
    ]
}
