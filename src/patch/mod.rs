//! Regex-driven field patching of platform build-metadata files
//!
//! A [KeyValuePatcher] knows how to find one field in a text file, read its current
//! value and write a new one. [PlatformFile] pairs the two fields every platform
//! carries: the human-readable version and the integer build counter.
//!
//! A field that is not present is reported as [PatchOutcome::FieldNotFound], not as
//! an error; I/O failures (such as a missing file) are errors. The caller decides
//! whether either one aborts the run.

pub mod android;
pub mod ios;

use crate::domain::BumpedVersion;
use crate::error::{BumpError, Result};
use regex::{NoExpand, Regex};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Result of patching one field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchOutcome {
    /// The field was rewritten (the values may be equal)
    Updated { from: String, to: String },
    /// The pattern did not match; the file was left untouched
    FieldNotFound,
}

/// Finds a single field with a regex whose first capture group is the value
#[derive(Debug, Clone)]
pub struct KeyValuePatcher {
    field: &'static str,
    pattern: Regex,
    render: fn(&str) -> String,
}

impl KeyValuePatcher {
    /// Create a patcher
    ///
    /// # Arguments
    /// * `field` - Field name used in log lines
    /// * `pattern` - Regex with exactly one capture group around the value
    /// * `render` - Builds the full replacement text for a new value
    pub fn new(field: &'static str, pattern: &str, render: fn(&str) -> String) -> Result<Self> {
        let pattern = Regex::new(pattern)
            .map_err(|e| BumpError::patch(format!("Invalid pattern for {}: {}", field, e)))?;
        Ok(KeyValuePatcher {
            field,
            pattern,
            render,
        })
    }

    pub fn field(&self) -> &'static str {
        self.field
    }

    /// Current value of the field, if present
    pub fn extract(&self, content: &str) -> Option<String> {
        self.pattern
            .captures(content)
            .and_then(|captures| captures.get(1))
            .map(|m| m.as_str().to_string())
    }

    /// Replace the first occurrence of the field with `new_value`
    pub fn substitute(&self, content: &str, new_value: &str) -> Option<String> {
        if !self.pattern.is_match(content) {
            return None;
        }
        let replacement = (self.render)(new_value);
        Some(
            self.pattern
                .replacen(content, 1, NoExpand(&replacement))
                .into_owned(),
        )
    }

    /// Read `path`, transform the field's current value and write the result back.
    ///
    /// # Returns
    /// * `Ok(PatchOutcome::Updated)` - The file was rewritten
    /// * `Ok(PatchOutcome::FieldNotFound)` - The field is absent, nothing written
    /// * `Err` - If the file cannot be read or written, or `transform` fails
    pub fn apply<F>(&self, path: &Path, transform: F) -> Result<PatchOutcome>
    where
        F: FnOnce(&str) -> Result<String>,
    {
        let content = fs::read_to_string(path)?;

        let Some(current) = self.extract(&content) else {
            return Ok(PatchOutcome::FieldNotFound);
        };

        let next = transform(&current)?;
        let Some(patched) = self.substitute(&content, &next) else {
            return Ok(PatchOutcome::FieldNotFound);
        };

        fs::write(path, patched)?;
        Ok(PatchOutcome::Updated {
            from: current,
            to: next,
        })
    }
}

/// Increment an integer build counter
pub fn next_build_number(current: &str) -> Result<String> {
    let number = current
        .trim()
        .parse::<u64>()
        .map_err(|e| BumpError::patch(format!("Invalid build number '{}': {}", current, e)))?;
    let next = number
        .checked_add(1)
        .ok_or_else(|| BumpError::patch(format!("Build number '{}' cannot be incremented", current)))?;
    Ok(next.to_string())
}

/// Target platform of a build-metadata file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Ios,
    Android,
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::Ios => write!(f, "iOS"),
            Platform::Android => write!(f, "Android"),
        }
    }
}

/// A platform file with its version and build-counter fields
#[derive(Debug, Clone)]
pub struct PlatformFile {
    pub platform: Platform,
    pub path: PathBuf,
    version_field: KeyValuePatcher,
    build_field: KeyValuePatcher,
}

impl PlatformFile {
    /// iOS property list at `path`
    pub fn ios(path: impl Into<PathBuf>) -> Result<Self> {
        Ok(PlatformFile {
            platform: Platform::Ios,
            path: path.into(),
            version_field: ios::short_version_patcher()?,
            build_field: ios::bundle_version_patcher()?,
        })
    }

    /// Android gradle build script at `path`
    pub fn android(path: impl Into<PathBuf>) -> Result<Self> {
        Ok(PlatformFile {
            platform: Platform::Android,
            path: path.into(),
            version_field: android::version_name_patcher()?,
            build_field: android::version_code_patcher()?,
        })
    }

    pub fn version_field(&self) -> &'static str {
        self.version_field.field()
    }

    pub fn build_field(&self) -> &'static str {
        self.build_field.field()
    }

    /// Write the new human-readable version
    pub fn patch_version(&self, version: &BumpedVersion) -> Result<PatchOutcome> {
        let plain = version.plain();
        self.version_field.apply(&self.path, |_| Ok(plain))
    }

    /// Read the build counter and write `counter + 1`
    pub fn increment_build(&self) -> Result<PatchOutcome> {
        self.build_field.apply(&self.path, next_build_number)
    }
}
