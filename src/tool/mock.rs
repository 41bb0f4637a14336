use crate::domain::{BumpKind, BumpedVersion};
use crate::error::{BumpError, Result};
use crate::tool::VersionTool;
use semver::Version;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// A call recorded by [MockVersionTool]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolCall {
    SetVersion { dir: PathBuf, version: String },
    Bump { dir: PathBuf, kind: BumpKind },
}

/// In-memory version tool following npm's increment rules
pub struct MockVersionTool {
    current: Mutex<Version>,
    calls: Mutex<Vec<ToolCall>>,
    fail_bump: bool,
}

impl MockVersionTool {
    /// Create a tool whose manifest holds `version`
    pub fn new(version: Version) -> Self {
        MockVersionTool {
            current: Mutex::new(version),
            calls: Mutex::new(Vec::new()),
            fail_bump: false,
        }
    }

    /// Create a tool whose bumps always fail
    pub fn failing(version: Version) -> Self {
        MockVersionTool {
            fail_bump: true,
            ..Self::new(version)
        }
    }

    /// Version currently held by the simulated manifest
    pub fn current(&self) -> Version {
        self.current
            .lock()
            .map(|v| v.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }

    /// Every call made so far, in order
    pub fn calls(&self) -> Vec<ToolCall> {
        self.calls
            .lock()
            .map(|c| c.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }

    fn record(&self, call: ToolCall) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
    }

    fn store(&self, version: Version) -> Result<()> {
        let mut current = self
            .current
            .lock()
            .map_err(|_| BumpError::tool("mock version state poisoned"))?;
        *current = version;
        Ok(())
    }
}

impl VersionTool for MockVersionTool {
    fn set_version(&self, package_dir: &Path, version: &str) -> Result<()> {
        self.record(ToolCall::SetVersion {
            dir: package_dir.to_path_buf(),
            version: version.to_string(),
        });
        let parsed = BumpedVersion::parse(version)?;
        self.store(parsed.semver().clone())
    }

    fn bump(&self, package_dir: &Path, kind: &BumpKind) -> Result<BumpedVersion> {
        self.record(ToolCall::Bump {
            dir: package_dir.to_path_buf(),
            kind: kind.clone(),
        });
        if self.fail_bump {
            return Err(BumpError::tool("mock bump failure"));
        }
        let next = kind.apply(&self.current())?;
        self.store(next.clone())?;
        Ok(BumpedVersion::new(next))
    }
}
