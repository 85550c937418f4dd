//! Selection of remote branches to delete.

use std::collections::BTreeSet;

use gitja_git::{RefName, RefQuery};
use tracing::debug;

use crate::error::{Error, Result};
use crate::tracking::RemoteTarget;

/// Remote branches proposed for deletion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrunePlan {
    pub targets: Vec<RemoteTarget>,
    /// Targets were picked automatically rather than named by the user.
    pub automatic: bool,
}

impl PrunePlan {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

/// Build the prune plan.
///
/// Named refs must all be remote branches. Without names, every branch of
/// `default_remote` that has no local branch of the same name is proposed.
///
/// # Errors
/// Returns [`Error::NotARemoteBranch`] for a named ref that isn't one, or a
/// git error if listing branches fails.
pub fn plan<G: RefQuery>(repo: &G, named: &[String], default_remote: &str) -> Result<PrunePlan> {
    let remote_branches = repo.remote_branches(false)?;

    if !named.is_empty() {
        let targets = named
            .iter()
            .map(|name| target_of(&remote_branches, name))
            .collect::<Result<Vec<_>>>()?;
        return Ok(PrunePlan {
            targets,
            automatic: false,
        });
    }

    let local = repo.local_branches()?;
    let targets = remote_branches
        .iter()
        .filter_map(|remote_ref| {
            let (remote, branch) = remote_ref.split_remote()?;
            if remote != default_remote {
                return None;
            }
            if local.contains(&RefName::new(branch)) {
                debug!("{remote_ref} exists locally, keeping it");
                return None;
            }
            Some(RemoteTarget {
                remote: remote.to_string(),
                branch: branch.to_string(),
            })
        })
        .collect();

    Ok(PrunePlan {
        targets,
        automatic: true,
    })
}

fn target_of(remote_branches: &BTreeSet<RefName>, name: &str) -> Result<RemoteTarget> {
    let name = RefName::new(name);
    if !remote_branches.contains(&name) {
        return Err(Error::NotARemoteBranch(name.into_inner()));
    }
    name.split_remote()
        .map(|(remote, branch)| RemoteTarget {
            remote: remote.to_string(),
            branch: branch.to_string(),
        })
        .ok_or_else(|| Error::NotARemoteBranch(name.to_string()))
}
