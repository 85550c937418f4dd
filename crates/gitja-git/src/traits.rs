//! Trait abstractions for git operations.
//!
//! `RefQuery` answers read-only questions about refs; `GitOps` adds the
//! operations that change local or remote state. Services depend on these
//! traits so they can be exercised against mocks.

use std::collections::{BTreeMap, BTreeSet};

use crate::{CommitId, RefName, Result, SyncState};

/// Which local branches a query covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope<'a> {
    /// Every local branch.
    All,
    /// A single local branch.
    Branch(&'a str),
}

/// Ordering for rendered logs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogOrder {
    /// Commit date order (`--date-order`).
    #[default]
    Date,
    /// Topological order (`--topo-order`).
    Topo,
}

impl LogOrder {
    /// The git flag for this order.
    #[must_use]
    pub const fn flag(self) -> &'static str {
        match self {
            Self::Date => "--date-order",
            Self::Topo => "--topo-order",
        }
    }
}

/// Read-only questions about a repository's refs.
#[allow(clippy::missing_errors_doc)]
pub trait RefQuery {
    /// Local branch names.
    fn local_branches(&self) -> Result<BTreeSet<RefName>>;

    /// Remote-tracking branch names (`remote/branch`).
    ///
    /// With `force_refresh`, all remotes are fetched and pruned first.
    fn remote_branches(&self, force_refresh: bool) -> Result<BTreeSet<RefName>>;

    /// The branch HEAD points to.
    ///
    /// Returns an error if HEAD is detached.
    fn current_branch(&self) -> Result<RefName>;

    /// Whether `name` resolves to a commit. Never fails.
    fn ref_exists(&self, name: &str) -> bool;

    /// Octopus merge-base of `refs`.
    fn merge_base(&self, refs: &[RefName]) -> Result<CommitId>;

    /// Human-friendly name for a commit, without a `remotes/` prefix.
    fn commit_name(&self, commit: &CommitId) -> Result<String>;

    /// Commit id a ref points to.
    fn commit_id(&self, name: &str) -> Result<CommitId>;

    /// Configured remote upstream for each local branch in scope.
    fn upstreams(&self, scope: Scope<'_>) -> Result<Vec<(RefName, Option<RefName>)>>;

    /// Ahead/behind state of every local branch that has an upstream.
    fn sync_states(&self) -> Result<BTreeMap<String, SyncState>>;

    /// Configured remote names.
    fn remotes(&self) -> Result<Vec<String>>;

    /// Number of commits reachable from `to` but not from `from`.
    fn count_commits_between(&self, from: &str, to: &str) -> Result<usize>;
}

/// Operations that change the repository or its remotes.
#[allow(clippy::missing_errors_doc)]
pub trait GitOps: RefQuery {
    // === Branch configuration ===

    /// Remove the upstream configuration of a local branch.
    fn unset_upstream(&self, branch: &str) -> Result<()>;

    /// Delete a local branch (`-D` when `force`).
    fn delete_branch(&self, branch: &str, force: bool) -> Result<()>;

    /// Checkout a local branch.
    fn checkout(&self, branch: &str) -> Result<()>;

    /// Fast-forward the current branch to `target`.
    fn merge_ff(&self, target: &str) -> Result<()>;

    /// Whether the working tree has uncommitted changes.
    fn is_dirty(&self) -> bool;

    // === Remotes ===

    /// Push `local` to `remote_branch` on `remote`.
    fn push(
        &self,
        remote: &str,
        local: &str,
        remote_branch: &str,
        set_upstream: bool,
    ) -> Result<()>;

    /// Delete `branch` on `remote`.
    fn delete_remote_branch(&self, remote: &str, branch: &str) -> Result<()>;

    /// Fetch all remotes, pruning deleted branches.
    fn fetch_all(&self) -> Result<()>;

    /// `git remote update --prune`, returning git's report.
    fn remote_update(&self) -> Result<String>;

    /// `git remote show`, optionally without contacting the remote.
    fn remote_show(&self, remote: &str, offline: bool) -> Result<String>;

    // === Rendering ===

    /// Render the graph of the commits reachable from `refs` but not from
    /// `base`. One line per commit: short id, decorations, subject.
    fn log_graph(
        &self,
        base: &CommitId,
        refs: &[RefName],
        order: LogOrder,
        color: bool,
    ) -> Result<String>;

    /// Render full messages of the commits in `from..to`.
    fn log_range(&self, from: &str, to: &str, color: bool) -> Result<String>;
}
