//! Fast-forward service: move local branches up to their upstream.

use anyhow::Result;
use gitja_core::forward::{self, ForwardStep};
use gitja_core::{Error, Options};
use gitja_git::{GitOps, RefName};
use tracing::debug;

/// Result of a fast-forward run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ForwardOutcome {
    pub forwarded: Vec<(RefName, RefName)>,
    pub diverged: Vec<(RefName, RefName)>,
    /// Branch checked out again at the end, if the run moved away from it.
    pub restored: Option<RefName>,
}

pub struct ForwardService<'a, G: GitOps> {
    repo: &'a G,
    options: &'a Options,
}

impl<'a, G: GitOps> ForwardService<'a, G> {
    #[must_use]
    pub const fn new(repo: &'a G, options: &'a Options) -> Self {
        Self { repo, options }
    }

    pub fn ensure_clean(&self) -> Result<()> {
        if self.repo.is_dirty() {
            return Err(Error::DirtyWorkingTree.into());
        }
        Ok(())
    }

    /// Update remotes unless running shy.
    pub fn refresh(&self) -> Result<Option<String>> {
        if self.options.shy {
            return Ok(None);
        }
        Ok(Some(self.repo.remote_update()?))
    }

    /// Fast-forward every branch that is strictly behind its upstream, then
    /// return to the branch that was checked out.
    ///
    /// The original branch is checked out again even when a step fails.
    pub fn forward(&self, branches: &[RefName]) -> Result<ForwardOutcome> {
        let original = self.repo.current_branch()?;
        let mut checked_out = original.clone();
        let mut outcome = ForwardOutcome::default();

        let result = self.apply(branches, &mut checked_out, &mut outcome);

        if checked_out == original {
            result?;
            return Ok(outcome);
        }

        let restored = self.repo.checkout(&original);
        result?;
        restored?;
        outcome.restored = Some(original);
        Ok(outcome)
    }

    fn apply(
        &self,
        branches: &[RefName],
        checked_out: &mut RefName,
        outcome: &mut ForwardOutcome,
    ) -> Result<()> {
        for step in forward::plan(self.repo, self.options, branches)? {
            match step {
                ForwardStep::Forward { branch, upstream } => {
                    if branch != *checked_out {
                        *checked_out = branch.clone();
                        self.repo.checkout(&branch)?;
                    }
                    self.repo.merge_ff(&upstream)?;
                    outcome.forwarded.push((branch, upstream));
                }
                ForwardStep::Diverged { branch, upstream } => {
                    outcome.diverged.push((branch, upstream));
                }
                ForwardStep::UpToDate { branch, .. } | ForwardStep::Untracked(branch) => {
                    debug!("Nothing to forward on {branch}");
                }
            }
        }
        Ok(())
    }
}
