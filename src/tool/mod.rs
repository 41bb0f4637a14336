//! Version tool abstraction
//!
//! The new version is computed by an external, trusted tool. The [VersionTool]
//! trait keeps the orchestrator independent of that tool:
//!
//! - [npm::NpmVersionTool]: runs `npm version` in the package directory
//! - [mock::MockVersionTool]: in-memory implementation for testing

pub mod mock;
pub mod npm;

pub use mock::MockVersionTool;
pub use npm::NpmVersionTool;

use crate::domain::{BumpKind, BumpedVersion};
use crate::error::Result;
use std::path::Path;

/// Computes and writes package versions
pub trait VersionTool {
    /// Write `version` into the manifest, accepting an unchanged version.
    ///
    /// Running this twice with the same version leaves the manifest untouched.
    fn set_version(&self, package_dir: &Path, version: &str) -> Result<()>;

    /// Increment the manifest version by `kind` and return the new version.
    ///
    /// # Returns
    /// * `Ok(BumpedVersion)` - The version now written in the manifest
    /// * `Err` - If the tool exits unsuccessfully or prints an invalid version
    fn bump(&self, package_dir: &Path, kind: &BumpKind) -> Result<BumpedVersion>;
}
