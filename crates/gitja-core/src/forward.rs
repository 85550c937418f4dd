//! Fast-forward planning for local branches behind their upstream.

use gitja_git::{GitOps, RefName, Scope};
use tracing::debug;

use crate::error::Result;
use crate::options::Options;
use crate::tracking::TrackingResolver;

/// What to do with one branch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ForwardStep {
    /// No live upstream.
    Untracked(RefName),
    /// Upstream has nothing new.
    UpToDate { branch: RefName, upstream: RefName },
    /// Both sides have commits; needs a manual merge.
    Diverged { branch: RefName, upstream: RefName },
    /// Can be fast-forwarded to the upstream.
    Forward { branch: RefName, upstream: RefName },
}

/// Classify each branch against its live upstream.
///
/// # Errors
/// Returns error if tracking resolution or commit counting fails.
pub fn plan<G: GitOps>(repo: &G, options: &Options, branches: &[RefName]) -> Result<Vec<ForwardStep>> {
    let tracking = TrackingResolver::new(repo, options).resolve(Scope::All)?;

    let mut steps = Vec::with_capacity(branches.len());
    for branch in branches {
        let Some(upstream) = tracking.get(branch).cloned() else {
            steps.push(ForwardStep::Untracked(branch.clone()));
            continue;
        };
        debug!("Trying {branch} -> {upstream}");

        let branch = branch.clone();
        let missing = repo.count_commits_between(&branch, &upstream)?;
        if missing == 0 {
            debug!("{upstream} is not ahead of {branch}");
            steps.push(ForwardStep::UpToDate { branch, upstream });
            continue;
        }
        if repo.count_commits_between(&upstream, &branch)? > 0 {
            steps.push(ForwardStep::Diverged { branch, upstream });
        } else {
            steps.push(ForwardStep::Forward { branch, upstream });
        }
    }

    Ok(steps)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use gitja_git::testing::MockGitOps;

    #[test]
    fn test_classification() {
        let repo = MockGitOps::new()
            .with_branch("behind", "1")
            .with_branch("even", "2")
            .with_branch("split", "3")
            .with_branch("loose", "4")
            .with_remote_branch("origin/behind", "5")
            .with_remote_branch("origin/even", "2")
            .with_remote_branch("origin/split", "6")
            .with_upstream("behind", "origin/behind")
            .with_upstream("even", "origin/even")
            .with_upstream("split", "origin/split")
            .with_count("behind", "origin/behind", 2)
            .with_count("split", "origin/split", 1)
            .with_count("origin/split", "split", 1);
        let options = Options::default();
        let branches: Vec<RefName> = ["behind", "even", "split", "loose"]
            .into_iter()
            .map(RefName::new)
            .collect();

        let steps = plan(&repo, &options, &branches).unwrap();

        let r = RefName::new;
        assert_eq!(
            steps,
            [
                ForwardStep::Forward {
                    branch: r("behind"),
                    upstream: r("origin/behind")
                },
                ForwardStep::UpToDate {
                    branch: r("even"),
                    upstream: r("origin/even")
                },
                ForwardStep::Diverged {
                    branch: r("split"),
                    upstream: r("origin/split")
                },
                ForwardStep::Untracked(r("loose")),
            ]
        );
    }
}
