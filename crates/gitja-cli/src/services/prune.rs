//! Prune service: delete remote branches nobody works on locally.

use anyhow::Result;
use gitja_core::prune::{self, PrunePlan};
use gitja_core::{Options, RemoteTarget};
use gitja_git::GitOps;

pub struct PruneService<'a, G: GitOps> {
    repo: &'a G,
    options: &'a Options,
    default_remote: &'a str,
}

impl<'a, G: GitOps> PruneService<'a, G> {
    #[must_use]
    pub const fn new(repo: &'a G, options: &'a Options, default_remote: &'a str) -> Self {
        Self {
            repo,
            options,
            default_remote,
        }
    }

    /// Update remotes unless running shy. Returns git's report.
    pub fn refresh(&self) -> Result<Option<String>> {
        if self.options.shy {
            return Ok(None);
        }
        Ok(Some(self.repo.remote_update()?))
    }

    /// Pick the remote branches to delete.
    pub fn plan(&self, named: &[String]) -> Result<PrunePlan> {
        Ok(prune::plan(self.repo, named, self.default_remote)?)
    }

    /// Delete `target` from its remote. Returns `false` when running shy.
    pub fn prune(&self, target: &RemoteTarget) -> Result<bool> {
        if self.options.shy {
            return Ok(false);
        }
        self.repo
            .delete_remote_branch(&target.remote, &target.branch)?;
        Ok(true)
    }
}
