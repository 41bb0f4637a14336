use crate::error::{BumpError, Result};
use semver::{Prerelease, Version};
use std::fmt;
use std::str::FromStr;

/// Semantic-version component to increment, decided once per run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BumpKind {
    Major,
    Minor,
    Patch,
    /// Prerelease bump, optionally carrying an identifier such as `alpha`
    Prerelease(Option<String>),
}

impl BumpKind {
    /// Build a prerelease bump from the keyword that triggered it.
    ///
    /// The identifier is everything after the first `-` of the keyword,
    /// so `pre-alpha` yields `alpha`. A keyword without a dash yields no identifier.
    pub fn prerelease_from_keyword(keyword: &str) -> Self {
        let preid = keyword
            .split_once('-')
            .map(|(_, suffix)| suffix.to_string())
            .filter(|suffix| !suffix.is_empty());
        BumpKind::Prerelease(preid)
    }

    /// Arguments handed to the version tool for this bump
    ///
    /// # Example
    /// ```ignore
    /// assert_eq!(BumpKind::Minor.tool_args(), vec!["minor"]);
    /// assert_eq!(
    ///     BumpKind::Prerelease(Some("rc".into())).tool_args(),
    ///     vec!["prerelease", "--preid=rc"]
    /// );
    /// ```
    pub fn tool_args(&self) -> Vec<String> {
        match self {
            BumpKind::Prerelease(Some(preid)) => {
                vec!["prerelease".to_string(), format!("--preid={}", preid)]
            }
            other => vec![other.name().to_string()],
        }
    }

    /// Apply this bump to `version` with npm's increment rules.
    ///
    /// Used to preview a bump without running the version tool. A release bump
    /// of a prerelease finishes that prerelease (`1.2.4-alpha.1` + patch = `1.2.4`).
    ///
    /// # Example
    /// ```ignore
    /// let v = Version::parse("1.2.3")?;
    /// assert_eq!(BumpKind::Minor.apply(&v)?, Version::parse("1.3.0")?);
    /// assert_eq!(
    ///     BumpKind::Prerelease(Some("alpha".into())).apply(&v)?,
    ///     Version::parse("1.2.4-alpha.0")?
    /// );
    /// ```
    pub fn apply(&self, version: &Version) -> Result<Version> {
        let mut next = version.clone();
        match self {
            BumpKind::Major => {
                if version.pre.is_empty() || version.minor != 0 || version.patch != 0 {
                    next.major += 1;
                }
                next.minor = 0;
                next.patch = 0;
            }
            BumpKind::Minor => {
                if version.pre.is_empty() || version.patch != 0 {
                    next.minor += 1;
                }
                next.patch = 0;
            }
            BumpKind::Patch => {
                if version.pre.is_empty() {
                    next.patch += 1;
                }
            }
            BumpKind::Prerelease(preid) => {
                let pre = if version.pre.is_empty() {
                    next.patch += 1;
                    first_prerelease(preid.as_deref())
                } else {
                    next_prerelease(&version.pre, preid.as_deref())
                };
                next.pre = Prerelease::new(&pre).map_err(|e| {
                    BumpError::version(format!("Invalid prerelease '{}': {}", pre, e))
                })?;
                return Ok(next);
            }
        }
        next.pre = Prerelease::EMPTY;
        Ok(next)
    }

    /// Lowercase name of the bump kind
    pub fn name(&self) -> &'static str {
        match self {
            BumpKind::Major => "major",
            BumpKind::Minor => "minor",
            BumpKind::Patch => "patch",
            BumpKind::Prerelease(_) => "prerelease",
        }
    }
}

fn first_prerelease(preid: Option<&str>) -> String {
    match preid {
        Some(id) => format!("{}.0", id),
        None => "0".to_string(),
    }
}

/// Increment the trailing number of `pre`, or restart at `<preid>.0` when the id changes
fn next_prerelease(pre: &Prerelease, preid: Option<&str>) -> String {
    let current = pre.as_str();
    if let Some(id) = preid {
        if current != id && !current.starts_with(&format!("{}.", id)) {
            return first_prerelease(Some(id));
        }
    }

    let mut parts: Vec<String> = current.split('.').map(str::to_string).collect();
    match parts.last().and_then(|last| last.parse::<u64>().ok()) {
        Some(n) => {
            if let Some(last) = parts.last_mut() {
                *last = (n + 1).to_string();
            }
        }
        None => parts.push("0".to_string()),
    }
    parts.join(".")
}

impl fmt::Display for BumpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BumpKind::Prerelease(Some(preid)) => write!(f, "prerelease --preid={}", preid),
            other => write!(f, "{}", other.name()),
        }
    }
}

impl FromStr for BumpKind {
    type Err = BumpError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "major" => Ok(BumpKind::Major),
            "minor" => Ok(BumpKind::Minor),
            "patch" => Ok(BumpKind::Patch),
            "prerelease" => Ok(BumpKind::Prerelease(None)),
            other => Err(BumpError::config(format!(
                "Unknown bump kind '{}' - expected major, minor, patch or prerelease",
                other
            ))),
        }
    }
}
