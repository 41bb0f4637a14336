use thiserror::Error;

/// Every way a bump run can fail.
///
/// Variants carry the message shown to the user; the run ends with that message
/// followed by the generic failure line.
#[derive(Error, Debug)]
pub enum BumpError {
    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    /// Bad config file, bad CI input, or a ref the target branch cannot be derived from
    #[error("Configuration error: {0}")]
    Config(String),

    /// A version string that is not valid semver
    #[error("Version error: {0}")]
    Version(String),

    /// `npm version` could not be started or exited unsuccessfully
    #[error("Version tool failed: {0}")]
    Tool(String),

    /// A platform file field could not be rewritten
    #[error("Patch error: {0}")]
    Patch(String),

    #[error("Remote operation failed: {0}")]
    Remote(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, BumpError>;

impl BumpError {
    pub fn config(msg: impl Into<String>) -> Self {
        BumpError::Config(msg.into())
    }

    pub fn version(msg: impl Into<String>) -> Self {
        BumpError::Version(msg.into())
    }

    pub fn tool(msg: impl Into<String>) -> Self {
        BumpError::Tool(msg.into())
    }

    pub fn patch(msg: impl Into<String>) -> Self {
        BumpError::Patch(msg.into())
    }

    pub fn remote(msg: impl Into<String>) -> Self {
        BumpError::Remote(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BranchContext, BumpedVersion};
    use crate::manifest::PackageManifest;
    use crate::patch::next_build_number;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_missing_ref_is_config_error() {
        let err = BranchContext::resolve(None, None).unwrap_err();
        assert!(matches!(err, BumpError::Config(_)));
        assert!(err.to_string().starts_with("Configuration error"));
    }

    #[test]
    fn test_invalid_tool_output_is_version_error() {
        let err = BumpedVersion::parse("npm WARN something").unwrap_err();
        assert!(matches!(err, BumpError::Version(_)));
        assert!(err.to_string().contains("npm WARN something"));
    }

    #[test]
    fn test_malformed_manifest_is_json_error() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("package.json"), "{ \"version\": ").unwrap();

        let err = PackageManifest::load(dir.path()).unwrap_err();
        assert!(matches!(err, BumpError::Json(_)));
        assert!(err.to_string().starts_with("JSON error"));
    }

    #[test]
    fn test_bad_build_counter_is_patch_error() {
        let err = next_build_number("42a").unwrap_err();
        assert!(matches!(err, BumpError::Patch(_)));
        assert!(err.to_string().contains("'42a'"));
    }

    #[test]
    fn test_git_error_keeps_libgit2_message() {
        let dir = TempDir::new().unwrap();
        let err: BumpError = git2::Repository::open(dir.path()).err().unwrap().into();
        assert!(matches!(err, BumpError::Git(_)));
        assert!(err.to_string().starts_with("Git operation failed"));
    }

    #[cfg(unix)]
    #[test]
    fn test_tool_stderr_reaches_the_message() {
        use crate::tool::{NpmVersionTool, VersionTool};
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let script = dir.path().join("npm");
        fs::write(
            &script,
            "#!/bin/sh\necho 'npm ERR! Version not changed' >&2\nexit 1\n",
        )
        .unwrap();
        fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();

        let tool = NpmVersionTool::with_program(script.to_string_lossy());
        let err = tool.set_version(dir.path(), "1.0.0").unwrap_err();
        assert!(matches!(err, BumpError::Tool(_)));
        let msg = err.to_string();
        assert!(msg.contains("npm ERR! Version not changed"));
        assert!(msg.contains("exit code 1"));
    }
}
