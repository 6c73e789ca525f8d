use crate::regex::Regex;
use once_cell::sync::Lazy;

static WHITESPACE_RUN_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Single-level brace group, matched lazily so each `{...}` is unwrapped once.
static BRACE_GROUP_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{(.+?)\}").unwrap());

/// Replaces every newline with a space.
///
/// Field values keep the line breaks of the source file, so text fields are
/// flattened before any other normalization.
pub fn flatten_newlines(text: &str) -> String {
    text.replace('\n', " ")
}

/// Collapses every run of whitespace to a single space.
///
/// Leading and trailing runs are collapsed too, not removed.
///
/// With the `lite` feature only ASCII whitespace counts, so a no-break space
/// (U+00A0) is left in place.
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_RUN_REGEX.replace_all(text, " ").into_owned()
}

/// Removes one layer of `{...}` protection around each braced substring.
///
/// Nested groups are not handled: `{{A}}` becomes `{A}`.
pub fn strip_brace_groups(text: &str) -> String {
    BRACE_GROUP_REGEX.replace_all(text, "$1").into_owned()
}
