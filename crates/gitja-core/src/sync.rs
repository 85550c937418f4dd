//! Sync logs: the commits separating a branch from its upstream.

use std::fmt;

use gitja_git::{GitOps, RefName, Scope, SyncState};
use tracing::debug;

use crate::error::Result;
use crate::options::Options;
use crate::tracking::TrackingResolver;

/// Which side is missing commits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ahead,
    Behind,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ahead => f.write_str("AHEAD"),
            Self::Behind => f.write_str("BEHIND"),
        }
    }
}

/// One side of a branch/upstream gap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncEntry {
    pub branch: RefName,
    pub upstream: RefName,
    pub direction: Direction,
    pub commits: usize,
}

impl SyncEntry {
    /// `(from, to)` of the missing commits.
    #[must_use]
    pub fn range(&self) -> (&str, &str) {
        match self.direction {
            Direction::Ahead => (self.upstream.as_str(), self.branch.as_str()),
            Direction::Behind => (self.branch.as_str(), self.upstream.as_str()),
        }
    }
}

/// Compute the sync entries of `refs`.
///
/// Branches in sync, without a live upstream, or whose upstream is gone are
/// skipped. A diverged branch yields an ahead entry then a behind entry.
///
/// # Errors
/// Returns error if reading branch state or tracking fails.
pub fn entries<G: GitOps>(repo: &G, options: &Options, refs: &[RefName]) -> Result<Vec<SyncEntry>> {
    // Resolving may fetch, and the counts must reflect the fetched state.
    let tracking = TrackingResolver::new(repo, options).resolve(Scope::All)?;
    let states = repo.sync_states()?;

    let mut entries = Vec::new();
    for branch in refs {
        let Some(state) = states.get(branch.as_str()) else {
            debug!("{branch} has no upstream state");
            continue;
        };
        let Some(upstream) = tracking.get(branch) else {
            debug!("{branch} is not tracking any live remote branch");
            continue;
        };

        let mut push = |direction, commits| {
            entries.push(SyncEntry {
                branch: branch.clone(),
                upstream: upstream.clone(),
                direction,
                commits,
            });
        };
        match *state {
            SyncState::Ahead { commits } => push(Direction::Ahead, commits),
            SyncState::Behind { commits } => push(Direction::Behind, commits),
            SyncState::Diverged { ahead, behind } => {
                push(Direction::Ahead, ahead);
                push(Direction::Behind, behind);
            }
            SyncState::InSync | SyncState::Gone => {}
        }
    }

    Ok(entries)
}
