use crate::error::{BumpError, Result};
use std::fmt;

/// Version string as reported by the version tool, validated as semver
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BumpedVersion {
    version: semver::Version,
}

impl BumpedVersion {
    /// Create from an already parsed version
    pub fn new(version: semver::Version) -> Self {
        BumpedVersion { version }
    }

    /// Parse tool output such as `v1.3.0` or `1.3.0-alpha.0`
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        let clean = trimmed.trim_start_matches('v').trim_start_matches('V');
        let version = semver::Version::parse(clean).map_err(|e| {
            BumpError::version(format!("Invalid version '{}': {}", trimmed, e))
        })?;
        Ok(BumpedVersion { version })
    }

    /// The bare `MAJOR.MINOR.PATCH[-pre]` form written into platform files
    pub fn plain(&self) -> String {
        self.version.to_string()
    }

    /// The `v`-prefixed form used in commit messages (`v1.3.0`)
    pub fn label(&self) -> String {
        format!("v{}", self.version)
    }

    /// Tag name: configured prefix followed by the label
    ///
    /// # Example
    /// ```ignore
    /// let v = BumpedVersion::parse("v1.3.0")?;
    /// assert_eq!(v.tag(""), "v1.3.0");
    /// assert_eq!(v.tag("app-"), "app-v1.3.0");
    /// ```
    pub fn tag(&self, prefix: &str) -> String {
        format!("{}{}", prefix, self.label())
    }

    pub fn semver(&self) -> &semver::Version {
        &self.version
    }
}

impl fmt::Display for BumpedVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
