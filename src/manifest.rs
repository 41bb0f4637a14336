use crate::error::{BumpError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// File name of the package manifest
pub const MANIFEST_FILE: &str = "package.json";

/// Read-only view of the package manifest that owns the canonical version
#[derive(Debug, Clone)]
pub struct PackageManifest {
    path: PathBuf,
    version: String,
}

impl PackageManifest {
    /// Load `package.json` from a package directory.
    ///
    /// # Returns
    /// * `Ok(PackageManifest)` - Manifest with a string `version` field
    /// * `Err` - If the file is missing, is not JSON, or has no string `version`
    pub fn load(package_dir: &Path) -> Result<Self> {
        let path = package_dir.join(MANIFEST_FILE);
        let content = fs::read_to_string(&path).map_err(|e| {
            BumpError::config(format!("Cannot read {}: {}", path.display(), e))
        })?;
        let value: serde_json::Value = serde_json::from_str(&content)?;

        let version = value
            .get("version")
            .and_then(|v| v.as_str())
            .ok_or_else(|| {
                BumpError::version(format!("{} has no string 'version' field", path.display()))
            })?
            .to_string();

        Ok(PackageManifest { path, version })
    }

    /// Current version string exactly as written in the manifest
    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
