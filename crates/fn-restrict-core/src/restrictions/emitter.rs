//! Turns a classified call site into zero or more violations.

use crate::groups::ExclusionList;
use crate::types::{Location, Violation, ViolationSink};

use super::compiler::ActiveGroupSet;

/// Substitutes `name` into a printf-style message template.
///
/// `%s` and `%1$s` are replaced by `name`, `%%` becomes `%`. Any other `%`
/// sequence is kept as written.
#[must_use]
pub fn format_message(template: &str, name: &str) -> String {
    let mut out = String::with_capacity(template.len() + name.len());
    let mut rest = template;
    while let Some(pos) = rest.find('%') {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        if let Some(after) = tail.strip_prefix("%%") {
            out.push('%');
            rest = after;
        } else if let Some(after) = tail.strip_prefix("%1$s") {
            out.push_str(name);
            rest = after;
        } else if let Some(after) = tail.strip_prefix("%s") {
            out.push_str(name);
            rest = after;
        } else {
            out.push('%');
            rest = &tail[1..];
        }
    }
    out.push_str(rest);
    out
}

/// Reports one violation for every active group that restricts `name`.
///
/// Groups are visited in definition order. A group is skipped when it is
/// excluded, when `name` is on its allow-list, or when its matcher does
/// not match. Returns the number of violations reported.
pub fn emit(
    rule: &str,
    name: &str,
    location: &Location,
    groups: &ActiveGroupSet,
    exclusions: &ExclusionList,
    sink: &mut dyn ViolationSink,
) -> usize {
    let lowercase = name.to_lowercase();
    let mut reported = 0;

    for group in groups {
        if exclusions.contains(group.id())
            || group.allows(&lowercase)
            || !group.is_match(&lowercase)
        {
            continue;
        }

        let mut violation = Violation::new(
            rule,
            group.id(),
            group.severity(),
            location.clone(),
            format_message(group.message(), name),
            name,
        );
        if let Some(doc_ref) = group.doc_ref() {
            violation = violation.with_doc_ref(doc_ref);
        }
        sink.report(violation);
        reported += 1;
    }

    reported
}
