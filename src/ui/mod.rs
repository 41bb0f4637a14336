//! Run output module.
//!
//! `formatter` holds the line formatting; this module re-exports it and adds the
//! terminal-state lines every run ends with.

pub mod formatter;

pub use formatter::{
    display_error, display_messages, display_notice, display_status, display_success,
    display_version_change, display_warning,
};

/// Final line of a run that bumped the version
pub const MSG_BUMPED: &str = "Version bumped!";
/// Final line of a run skipped because it was triggered by a bump commit
pub const MSG_BUMP_COMMIT: &str = "No action necessary!";
/// Final line of a run skipped because no keyword matched
pub const MSG_NO_KEYWORDS: &str = "No version keywords found, skipping bump.";
/// Final line of a failed run
pub const MSG_FAILED: &str = "Failed to bump version";
