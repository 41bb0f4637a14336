use regex::Regex;

/// Matches `type!:` and `type(scope)!:` at the start of a message
const BREAKING_MARKER: &str = r"^([a-zA-Z]+)(\(.+\))?!:";

/// Check whether a message carries the conventional-commit breaking marker
///
/// Supports formats:
/// - type!: description
/// - type(scope)!: description
pub fn has_breaking_marker(message: &str) -> bool {
    Regex::new(BREAKING_MARKER)
        .map(|re| re.is_match(message))
        .unwrap_or(false)
}

/// Check whether a message is a bump commit produced by a previous run.
///
/// The marker is compared against the lowercased message so `CI: Version Bump To`
/// is recognised too.
pub fn is_bump_commit(message: &str, marker: &str) -> bool {
    if marker.is_empty() {
        return false;
    }
    message.to_lowercase().contains(&marker.to_lowercase())
}

/// Commit message written for a bump to `version`
pub fn bump_commit_message(marker: &str, version: &str) -> String {
    format!("ci: {} {}", marker, version)
}
