use crate::error::{BumpError, Result};
use regex::Regex;

/// Branch that receives the durable bump commit and tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchContext {
    pub name: String,
    pub is_pull_request: bool,
}

impl BranchContext {
    /// Create a branch context for a push-style run
    pub fn new(name: impl Into<String>) -> Self {
        BranchContext {
            name: name.into(),
            is_pull_request: false,
        }
    }

    /// Derive the target branch from the run's ref and optional pull-request head ref.
    ///
    /// A non-empty `head_ref` wins and marks the run as a pull request. Otherwise the
    /// name is parsed from a ref of the form `refs/<kind>/<name>`, where `<name>` may
    /// itself contain slashes (`refs/heads/release/2.x` -> `release/2.x`).
    ///
    /// # Returns
    /// * `Ok(BranchContext)` - The resolved branch
    /// * `Err` - If there is no head ref and `git_ref` is missing or malformed
    pub fn resolve(git_ref: Option<&str>, head_ref: Option<&str>) -> Result<Self> {
        if let Some(head) = head_ref.map(str::trim).filter(|h| !h.is_empty()) {
            return Ok(BranchContext {
                name: head.to_string(),
                is_pull_request: true,
            });
        }

        let git_ref = git_ref
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .ok_or_else(|| BumpError::config("No ref available to derive the target branch"))?;

        Self::parse_ref(git_ref)
            .map(BranchContext::new)
            .ok_or_else(|| BumpError::config(format!("Cannot parse branch from ref '{}'", git_ref)))
    }

    /// Extract `<name>` from `refs/<kind>/<name>`
    pub fn parse_ref(git_ref: &str) -> Option<String> {
        let re = Regex::new(r"^refs/[a-zA-Z]+/(.+)$").ok()?;
        re.captures(git_ref)
            .and_then(|captures| captures.get(1))
            .map(|m| m.as_str().to_string())
    }
}
