use std::fmt;
use std::path::PathBuf;

/// Non-fatal conditions met during a run.
/// The run continues after each of these; they are reported to the user.
#[derive(Debug, Clone, PartialEq)]
pub enum RunWarning {
    /// The message input is empty and the event payload carried no commits;
    /// classification falls back to the default bump
    NoEventCommits,
    /// The event payload could not be read or parsed; it is treated as carrying no commits
    EventPayloadUnreadable { path: PathBuf, reason: String },
    /// A platform file field could not be patched
    PlatformPatchSkipped {
        file: PathBuf,
        field: String,
        reason: String,
    },
    /// Committing on the target branch failed, usually because there was nothing to commit
    TargetCommitSkipped { branch: String, reason: String },
}

impl fmt::Display for RunWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunWarning::NoEventCommits => write!(
                f,
                "Couldn't find any commits in this event, falling back to the default bump"
            ),
            RunWarning::EventPayloadUnreadable { path, reason } => write!(
                f,
                "Ignoring unreadable event payload '{}': {}",
                path.display(),
                reason
            ),
            RunWarning::PlatformPatchSkipped {
                file,
                field,
                reason,
            } => write!(
                f,
                "Skipped {} in '{}': {}",
                field,
                file.display(),
                reason
            ),
            RunWarning::TargetCommitSkipped { branch, reason } => write!(
                f,
                "Commit on branch '{}' skipped ({}); the bump commit may already be on it",
                branch, reason
            ),
        }
    }
}
