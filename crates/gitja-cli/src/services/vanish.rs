//! Vanish service: delete branches locally and on their remote.

use anyhow::Result;
use gitja_core::{Error, Options, RemoteTarget, TrackingResolver};
use gitja_git::GitOps;

/// At least one branch must be named.
pub fn require_branches(branches: &[String]) -> Result<()> {
    if branches.is_empty() {
        return Err(Error::MissingArgument("which branches do you want to remove?").into());
    }
    Ok(())
}

pub struct VanishService<'a, G: GitOps> {
    repo: &'a G,
    options: &'a Options,
    default_remote: &'a str,
}

impl<'a, G: GitOps> VanishService<'a, G> {
    #[must_use]
    pub const fn new(repo: &'a G, options: &'a Options, default_remote: &'a str) -> Self {
        Self {
            repo,
            options,
            default_remote,
        }
    }

    /// Remote branch removed together with `branch`.
    ///
    /// Must be resolved before the local branch is deleted, as deleting it
    /// drops its tracking configuration.
    pub fn target(&self, branch: &str, remote: Option<&str>) -> Result<RemoteTarget> {
        Ok(TrackingResolver::new(self.repo, self.options).remote_target(
            branch,
            remote,
            None,
            self.default_remote,
        )?)
    }

    /// Delete `branch` locally, then on `target`.
    pub fn vanish(&self, branch: &str, target: &RemoteTarget, force: bool) -> Result<()> {
        self.repo.delete_branch(branch, force)?;
        self.repo.delete_remote_branch(&target.remote, &target.branch)?;
        Ok(())
    }
}
