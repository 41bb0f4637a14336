//! Git operations abstraction layer
//!
//! This module provides a trait-based abstraction over the git operations a bump
//! run performs, allowing for a real implementation and a mock for testing.
//!
//! - [repository::Git2Repository]: A real implementation using the `git2` crate
//! - [mock::MockRepository]: A mock implementation that records every call
//!
//! The orchestrator depends on the [Repository] trait only.

pub mod mock;
pub mod repository;

pub use mock::{GitCall, GitOp, MockRepository};
pub use repository::Git2Repository;

use crate::config::PushTarget;
use crate::error::Result;
use git2::Oid;

/// Git operations used by a bump run
///
/// ## Error Handling
///
/// All methods return [crate::error::Result<T>]. Implementations map underlying
/// errors (like `git2::Error`) to the appropriate [crate::error::BumpError] variants.
pub trait Repository {
    /// Set the commit identity for this repository only
    fn configure_identity(&self, name: &str, email: &str) -> Result<()>;

    /// Stage every tracked modification and commit it on the current HEAD
    ///
    /// Behaves like `git commit -a -m <message>`: untracked files are ignored.
    ///
    /// # Returns
    /// * `Ok(Oid)` - The new commit
    /// * `Err` - If there is nothing to commit or a git error occurs
    fn commit_all(&self, message: &str) -> Result<Oid>;

    /// Fetch the default refspecs of `remote`
    fn fetch(&self, remote: &str) -> Result<()>;

    /// Switch the working tree to local branch `branch`
    ///
    /// When only `<remote>/<branch>` exists, a local branch tracking it is created first.
    fn checkout_branch(&self, branch: &str, remote: &str) -> Result<()>;

    /// Create a lightweight tag on HEAD
    fn create_tag(&self, name: &str) -> Result<()>;

    /// Push `branch` and, when given, `tag` to `target`
    fn push(&self, target: &PushTarget, branch: &str, tag: Option<&str>) -> Result<()>;
}
