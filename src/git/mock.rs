use crate::config::PushTarget;
use crate::error::{BumpError, Result};
use crate::git::Repository;
use git2::Oid;
use std::collections::HashSet;
use std::sync::Mutex;

/// Kinds of git operation, used to inject failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GitOp {
    Identity,
    Commit,
    Fetch,
    Checkout,
    Tag,
    Push,
}

/// A call recorded by [MockRepository]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GitCall {
    ConfigureIdentity { name: String, email: String },
    Commit { message: String, branch: Option<String> },
    Fetch { remote: String },
    Checkout { branch: String },
    Tag { name: String, branch: Option<String> },
    Push { target: PushTarget, branch: String, tag: Option<String> },
}

#[derive(Default)]
struct MockState {
    calls: Vec<GitCall>,
    head_branch: Option<String>,
    commits: u8,
}

/// Mock repository for testing without actual git operations
///
/// Starts on a detached HEAD. Records every call in order.
pub struct MockRepository {
    state: Mutex<MockState>,
    failing: HashSet<GitOp>,
    clean_branches: HashSet<String>,
}

impl MockRepository {
    /// Create a new mock repository with a detached HEAD
    pub fn new() -> Self {
        MockRepository {
            state: Mutex::new(MockState::default()),
            failing: HashSet::new(),
            clean_branches: HashSet::new(),
        }
    }

    /// Make every operation of kind `op` fail
    pub fn fail_on(mut self, op: GitOp) -> Self {
        self.failing.insert(op);
        self
    }

    /// Make commits on `branch` fail with "nothing to commit", as when the
    /// bump commit already landed on it
    pub fn with_clean_branch(mut self, branch: impl Into<String>) -> Self {
        self.clean_branches.insert(branch.into());
        self
    }

    /// Every call made so far, in order
    pub fn calls(&self) -> Vec<GitCall> {
        self.with_state(|state| state.calls.clone())
    }

    /// Branch HEAD points to, `None` when detached
    pub fn head_branch(&self) -> Option<String> {
        self.with_state(|state| state.head_branch.clone())
    }

    fn with_state<T>(&self, f: impl FnOnce(&mut MockState) -> T) -> T {
        match self.state.lock() {
            Ok(mut state) => f(&mut state),
            Err(poisoned) => f(&mut poisoned.into_inner()),
        }
    }

    fn check(&self, op: GitOp) -> Result<()> {
        if self.failing.contains(&op) {
            return Err(BumpError::Git(git2::Error::from_str(&format!(
                "mock failure: {:?}",
                op
            ))));
        }
        Ok(())
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Repository for MockRepository {
    fn configure_identity(&self, name: &str, email: &str) -> Result<()> {
        self.with_state(|state| {
            state.calls.push(GitCall::ConfigureIdentity {
                name: name.to_string(),
                email: email.to_string(),
            })
        });
        self.check(GitOp::Identity)
    }

    fn commit_all(&self, message: &str) -> Result<Oid> {
        let (branch, count) = self.with_state(|state| {
            state.calls.push(GitCall::Commit {
                message: message.to_string(),
                branch: state.head_branch.clone(),
            });
            (state.head_branch.clone(), state.commits)
        });
        self.check(GitOp::Commit)?;

        if branch.is_some_and(|b| self.clean_branches.contains(&b)) {
            return Err(BumpError::Git(git2::Error::from_str(
                "nothing to commit, working tree clean",
            )));
        }

        let next = count.wrapping_add(1);
        self.with_state(|state| state.commits = next);
        Ok(Oid::from_bytes(&[next; 20])?)
    }

    fn fetch(&self, remote: &str) -> Result<()> {
        self.with_state(|state| {
            state.calls.push(GitCall::Fetch {
                remote: remote.to_string(),
            })
        });
        self.check(GitOp::Fetch)
    }

    fn checkout_branch(&self, branch: &str, _remote: &str) -> Result<()> {
        self.with_state(|state| {
            state.calls.push(GitCall::Checkout {
                branch: branch.to_string(),
            })
        });
        self.check(GitOp::Checkout)?;
        self.with_state(|state| state.head_branch = Some(branch.to_string()));
        Ok(())
    }

    fn create_tag(&self, name: &str) -> Result<()> {
        self.with_state(|state| {
            state.calls.push(GitCall::Tag {
                name: name.to_string(),
                branch: state.head_branch.clone(),
            })
        });
        self.check(GitOp::Tag)
    }

    fn push(&self, target: &PushTarget, branch: &str, tag: Option<&str>) -> Result<()> {
        self.with_state(|state| {
            state.calls.push(GitCall::Push {
                target: target.clone(),
                branch: branch.to_string(),
                tag: tag.map(str::to_string),
            })
        });
        self.check(GitOp::Push)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_starts_detached() {
        let repo = MockRepository::new();
        assert_eq!(repo.head_branch(), None);
        repo.checkout_branch("main", "origin").unwrap();
        assert_eq!(repo.head_branch(), Some("main".to_string()));
    }

    #[test]
    fn test_mock_records_commits_with_branch() {
        let repo = MockRepository::new();
        repo.commit_all("first").unwrap();
        repo.checkout_branch("main", "origin").unwrap();
        repo.commit_all("second").unwrap();

        let commits: Vec<_> = repo
            .calls()
            .into_iter()
            .filter(|c| matches!(c, GitCall::Commit { .. }))
            .collect();
        assert_eq!(
            commits,
            vec![
                GitCall::Commit {
                    message: "first".to_string(),
                    branch: None
                },
                GitCall::Commit {
                    message: "second".to_string(),
                    branch: Some("main".to_string())
                },
            ]
        );
    }

    #[test]
    fn test_mock_clean_branch_rejects_commit() {
        let repo = MockRepository::new().with_clean_branch("main");
        assert!(repo.commit_all("detached").is_ok());
        repo.checkout_branch("main", "origin").unwrap();
        let err = repo.commit_all("on main").unwrap_err();
        assert!(err.to_string().contains("nothing to commit"));
    }

    #[test]
    fn test_mock_injected_failure() {
        let repo = MockRepository::new().fail_on(GitOp::Push);
        let target = PushTarget::Remote("origin".to_string());
        assert!(repo.push(&target, "main", None).is_err());
        assert_eq!(repo.calls().len(), 1);
    }
}
