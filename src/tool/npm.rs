use crate::domain::{BumpKind, BumpedVersion};
use crate::error::{BumpError, Result};
use crate::tool::VersionTool;
use std::path::Path;
use std::process::Command;

/// Runs `npm version` without letting npm touch git
pub struct NpmVersionTool {
    program: String,
}

impl NpmVersionTool {
    /// Use the `npm` found on `PATH`
    pub fn new() -> Self {
        NpmVersionTool {
            program: "npm".to_string(),
        }
    }

    /// Use a specific executable speaking the `npm version` interface
    pub fn with_program(program: impl Into<String>) -> Self {
        NpmVersionTool {
            program: program.into(),
        }
    }

    /// Run `<program> version --git-tag-version=false <args>` in `package_dir`
    /// and return its trimmed stdout.
    ///
    /// Any non-zero exit code is an error carrying both output streams.
    fn run(&self, package_dir: &Path, args: &[String]) -> Result<String> {
        let output = Command::new(&self.program)
            .arg("version")
            .arg("--git-tag-version=false")
            .args(args)
            .current_dir(package_dir)
            .output()
            .map_err(|e| BumpError::tool(format!("Failed to execute {}: {}", self.program, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stdout = String::from_utf8_lossy(&output.stdout);
            return Err(BumpError::tool(format!(
                "{} version {} failed with exit code {}\nStdout: {}\nStderr: {}",
                self.program,
                args.join(" "),
                output.status.code().unwrap_or(-1),
                stdout,
                stderr
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

impl Default for NpmVersionTool {
    fn default() -> Self {
        Self::new()
    }
}

impl VersionTool for NpmVersionTool {
    fn set_version(&self, package_dir: &Path, version: &str) -> Result<()> {
        self.run(
            package_dir,
            &["--allow-same-version=true".to_string(), version.to_string()],
        )?;
        Ok(())
    }

    fn bump(&self, package_dir: &Path, kind: &BumpKind) -> Result<BumpedVersion> {
        let stdout = self.run(package_dir, &kind.tool_args())?;
        // npm may print lifecycle script output first; the version is the last line
        let last_line = stdout.lines().last().unwrap_or_default();
        BumpedVersion::parse(last_line)
    }
}
