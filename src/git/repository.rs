use crate::config::PushTarget;
use crate::error::{BumpError, Result};
use git2::build::CheckoutBuilder;
use git2::{
    BranchType, ConfigLevel, Cred, CredentialType, ErrorCode, FetchOptions, Oid, PushOptions,
    RemoteCallbacks, Repository as Git2Repo,
};
use std::path::Path;

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
    credentials: Option<(String, String)>,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;

        Ok(Git2Repository {
            repo,
            credentials: None,
        })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository {
            repo,
            credentials: None,
        }
    }

    /// Username and token offered to remotes that ask for plaintext credentials
    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.credentials = Some((username.into(), password.into()));
        self
    }

    /// Name of the branch HEAD points to, `None` when detached
    pub fn current_branch(&self) -> Result<Option<String>> {
        if self.repo.head_detached()? {
            return Ok(None);
        }
        let head = self.repo.head()?;
        Ok(head.shorthand().map(str::to_string))
    }

    /// Credentials callback shared by fetch and push.
    ///
    /// Order: explicit username/token, SSH agent, then git2 defaults.
    fn remote_callbacks<'a>(
        &'a self,
        explicit: Option<(&'a str, &'a str)>,
    ) -> RemoteCallbacks<'a> {
        let fallback = self
            .credentials
            .as_ref()
            .map(|(user, pass)| (user.as_str(), pass.as_str()));
        let userpass = explicit.or(fallback);

        let mut callbacks = RemoteCallbacks::new();
        callbacks.credentials(move |_url, username_from_url, allowed_types| {
            if allowed_types.contains(CredentialType::USER_PASS_PLAINTEXT) {
                if let Some((user, pass)) = userpass {
                    return Cred::userpass_plaintext(user, pass);
                }
            }

            if allowed_types.contains(CredentialType::SSH_KEY) {
                if let Ok(cred) = Cred::ssh_key_from_agent(username_from_url.unwrap_or("git")) {
                    return Ok(cred);
                }
            }

            Cred::default()
        });

        // Rejections arrive here rather than as an Err from push()
        callbacks.push_update_reference(|refname, status| match status {
            Some(status) => Err(git2::Error::from_str(&format!(
                "Push rejected for {}: {}",
                refname, status
            ))),
            None => Ok(()),
        });

        callbacks
    }
}

impl super::Repository for Git2Repository {
    fn configure_identity(&self, name: &str, email: &str) -> Result<()> {
        let mut config = self.repo.config()?.open_level(ConfigLevel::Local)?;
        config.set_str("user.name", name)?;
        config.set_str("user.email", email)?;
        Ok(())
    }

    fn commit_all(&self, message: &str) -> Result<Oid> {
        let mut index = self.repo.index()?;
        index.update_all(["*"].iter(), None)?;
        index.write()?;

        let tree_oid = index.write_tree()?;
        let parent = self.repo.head()?.peel_to_commit()?;
        if parent.tree_id() == tree_oid {
            return Err(BumpError::Git(git2::Error::from_str(
                "nothing to commit, working tree clean",
            )));
        }

        let tree = self.repo.find_tree(tree_oid)?;
        let signature = self.repo.signature()?;
        let oid = self
            .repo
            .commit(Some("HEAD"), &signature, &signature, message, &tree, &[&parent])?;

        Ok(oid)
    }

    fn fetch(&self, remote: &str) -> Result<()> {
        let mut remote_handle = self
            .repo
            .find_remote(remote)
            .map_err(|e| BumpError::remote(format!("Cannot find remote '{}': {}", remote, e)))?;

        let mut options = FetchOptions::new();
        options.remote_callbacks(self.remote_callbacks(None));

        remote_handle
            .fetch(&[] as &[&str], Some(&mut options), None)
            .map_err(|e| BumpError::remote(format!("Fetch from '{}' failed: {}", remote, e)))?;

        Ok(())
    }

    fn checkout_branch(&self, branch: &str, remote: &str) -> Result<()> {
        let local = match self.repo.find_branch(branch, BranchType::Local) {
            Ok(local) => local,
            Err(e) if e.code() == ErrorCode::NotFound => {
                let upstream = format!("{}/{}", remote, branch);
                let remote_branch = self
                    .repo
                    .find_branch(&upstream, BranchType::Remote)
                    .map_err(|e| {
                        BumpError::Git(git2::Error::from_str(&format!(
                            "Cannot find branch '{}' locally or as '{}': {}",
                            branch, upstream, e
                        )))
                    })?;
                let commit = remote_branch.get().peel_to_commit()?;
                let mut created = self.repo.branch(branch, &commit, false)?;
                created.set_upstream(Some(upstream.as_str()))?;
                created
            }
            Err(e) => return Err(e.into()),
        };

        let reference = local.into_reference();
        let refname = reference
            .name()
            .ok_or_else(|| BumpError::Git(git2::Error::from_str("Branch name is not UTF-8")))?
            .to_string();
        let target = reference.peel(git2::ObjectType::Commit)?;

        let mut checkout = CheckoutBuilder::new();
        checkout.safe();
        self.repo.checkout_tree(&target, Some(&mut checkout))?;
        self.repo.set_head(&refname)?;

        Ok(())
    }

    fn create_tag(&self, name: &str) -> Result<()> {
        let head = self.repo.head()?.peel_to_commit()?;
        self.repo.tag_lightweight(name, head.as_object(), false)?;
        Ok(())
    }

    fn push(&self, target: &PushTarget, branch: &str, tag: Option<&str>) -> Result<()> {
        let (mut remote, explicit) = match target {
            PushTarget::Remote(name) => {
                let remote = self.repo.find_remote(name).map_err(|e| {
                    BumpError::remote(format!("Cannot find remote '{}': {}", name, e))
                })?;
                (remote, None)
            }
            PushTarget::Url {
                url,
                username,
                password,
            } => (
                self.repo.remote_anonymous(url)?,
                Some((username.as_str(), password.as_str())),
            ),
        };

        let mut refspecs = vec![format!("refs/heads/{0}:refs/heads/{0}", branch)];
        if let Some(tag) = tag {
            refspecs.push(format!("refs/tags/{0}:refs/tags/{0}", tag));
        }

        let mut options = PushOptions::new();
        options.remote_callbacks(self.remote_callbacks(explicit));

        remote.push(&refspecs, Some(&mut options)).map_err(|e| {
            if e.class() == git2::ErrorClass::Net {
                BumpError::remote(format!("Network error during push: {}", e))
            } else {
                BumpError::remote(format!("Push of '{}' failed: {}", branch, e))
            }
        })?;

        Ok(())
    }
}
