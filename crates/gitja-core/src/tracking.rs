//! Tracking resolution: which local branch tracks which remote branch.
//!
//! The configured upstream of a branch is only trusted when the remote
//! branch it names is present in the freshly listed remote branch set.
//! Links pointing elsewhere are stale: they are dropped from the result,
//! and in aggressive mode their configuration is removed from the branch.

use std::collections::BTreeMap;
use std::fmt;

use gitja_git::{GitOps, RefName, Scope};
use serde::Serialize;
use tracing::{debug, info};

use crate::error::Result;
use crate::options::Options;

/// Resolved local branch -> remote branch links.
///
/// Invariant: every value was a member of the remote branch set listed
/// during resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TrackingMap(BTreeMap<RefName, RefName>);

impl TrackingMap {
    /// Upstream of `branch`, if it has a live one.
    #[must_use]
    pub fn get(&self, branch: &str) -> Option<&RefName> {
        self.0.get(&RefName::new(branch))
    }

    /// Iterate links ordered by local branch name.
    pub fn iter(&self) -> impl Iterator<Item = (&RefName, &RefName)> {
        self.0.iter()
    }

    /// Number of live links.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no branch has a live upstream.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Length of the longest local branch name.
    #[must_use]
    pub fn widest_local(&self) -> usize {
        self.0.keys().map(|k| k.len()).max().unwrap_or(0)
    }

    /// Length of the longest remote branch name.
    #[must_use]
    pub fn widest_remote(&self) -> usize {
        self.0.values().map(|v| v.len()).max().unwrap_or(0)
    }
}

/// Where a local branch is pushed to or deleted from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteTarget {
    pub remote: String,
    pub branch: String,
}

impl fmt::Display for RemoteTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.remote, self.branch)
    }
}

/// Resolves tracking links against the live remote branch set.
pub struct TrackingResolver<'a, G: GitOps> {
    repo: &'a G,
    options: &'a Options,
}

impl<'a, G: GitOps> TrackingResolver<'a, G> {
    /// Create a resolver.
    pub const fn new(repo: &'a G, options: &'a Options) -> Self {
        Self { repo, options }
    }

    /// Resolve the live upstream of every local branch in `scope`.
    ///
    /// Branches without an upstream are simply absent from the result. In
    /// aggressive mode, each stale link is unset on its branch exactly once.
    ///
    /// # Errors
    /// Returns error if listing refs fails, or if unsetting a stale upstream
    /// fails in aggressive mode.
    pub fn resolve(&self, scope: Scope<'_>) -> Result<TrackingMap> {
        // Must happen before any staleness decision.
        let remote_branches = self.repo.remote_branches(self.options.refresh_remotes())?;

        let mut links = BTreeMap::new();
        for (local, upstream) in self.repo.upstreams(scope)? {
            let Some(upstream) = upstream else {
                continue;
            };

            if remote_branches.contains(&upstream) {
                links.insert(local, upstream);
            } else if self.options.maniac {
                info!("Cleaning inexistent {upstream} upstream for branch {local}");
                self.repo.unset_upstream(&local)?;
            } else {
                debug!("{local} tracks {upstream} that does not exist any more");
            }
        }

        Ok(TrackingMap(links))
    }

    /// Live upstream of a single branch.
    ///
    /// # Errors
    /// Returns error if resolution fails.
    pub fn upstream_of(&self, branch: &str) -> Result<Option<RefName>> {
        Ok(self.resolve(Scope::Branch(branch))?.get(branch).cloned())
    }

    /// Decide the remote and remote branch name for `branch`.
    ///
    /// An explicit `remote` wins and skips the tracking lookup; otherwise the
    /// live upstream is used, falling back to `<default_remote>/<branch>`.
    /// An explicit `remote_branch` always overrides the branch part.
    ///
    /// # Errors
    /// Returns error if the tracking lookup fails.
    pub fn remote_target(
        &self,
        branch: &str,
        remote: Option<&str>,
        remote_branch: Option<&str>,
        default_remote: &str,
    ) -> Result<RemoteTarget> {
        let (remote, tracked_branch) = match remote {
            Some(remote) => (remote.to_string(), branch.to_string()),
            None => match self.upstream_of(branch)? {
                Some(upstream) => match upstream.split_remote() {
                    Some((remote, tracked)) => (remote.to_string(), tracked.to_string()),
                    None => (default_remote.to_string(), upstream.into_inner()),
                },
                None => (default_remote.to_string(), branch.to_string()),
            },
        };

        Ok(RemoteTarget {
            remote,
            branch: remote_branch.map_or(tracked_branch, ToString::to_string),
        })
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use gitja_git::RefQuery;
    use gitja_git::testing::MockGitOps;

    fn repo_a_tracks_live_b_tracks_deleted() -> MockGitOps {
        MockGitOps::new()
            .with_branch("a", "aaa")
            .with_branch("b", "bbb")
            .with_branch("c", "ccc")
            .with_remote_branch("origin/a", "aaa")
            .with_upstream("a", "origin/a")
            .with_upstream("b", "origin/b")
    }

    #[test]
    fn test_normal_mode_omits_stale_and_never_mutates() {
        let repo = repo_a_tracks_live_b_tracks_deleted();
        let options = Options::default();
        let resolver = TrackingResolver::new(&repo, &options);

        let map = resolver.resolve(Scope::All).unwrap();

        assert_eq!(map.len(), 1);
        assert_eq!(map.get("a").map(RefName::as_str), Some("origin/a"));
        assert!(map.get("b").is_none());
        assert!(map.get("c").is_none());
        assert!(repo.calls_matching("branch --unset-upstream").is_empty());
        assert!(repo.calls_matching("fetch").is_empty());
    }

    #[test]
    fn test_aggressive_mode_unsets_each_stale_link_once() {
        let repo = repo_a_tracks_live_b_tracks_deleted();
        let options = Options {
            maniac: true,
            ..Options::default()
        };
        let resolver = TrackingResolver::new(&repo, &options);

        let map = resolver.resolve(Scope::All).unwrap();

        assert_eq!(map.len(), 1);
        assert_eq!(map.get("a").map(RefName::as_str), Some("origin/a"));
        assert_eq!(
            repo.calls_matching("branch --unset-upstream"),
            ["branch --unset-upstream b"]
        );
        assert!(!repo.upstreams.borrow().contains_key("b"));
    }

    #[test]
    fn test_aggressive_mode_refreshes_before_detecting_staleness() {
        let repo = MockGitOps::new()
            .with_branch("a", "aaa")
            .with_remote_branch("origin/a", "aaa")
            .with_upstream("a", "origin/a")
            .with_gone_on_fetch("origin/a");
        let options = Options {
            maniac: true,
            ..Options::default()
        };

        let map = TrackingResolver::new(&repo, &options)
            .resolve(Scope::All)
            .unwrap();

        assert!(map.is_empty());
        assert_eq!(
            repo.calls(),
            ["fetch --all --prune", "branch --unset-upstream a"]
        );
    }

    #[test]
    fn test_result_only_contains_live_remote_branches() {
        let repo = MockGitOps::new()
            .with_branch("x", "1")
            .with_branch("y", "2")
            .with_branch("z", "3")
            .with_remote_branch("origin/x", "1")
            .with_remote_branch("fork/y", "2")
            .with_upstream("x", "origin/x")
            .with_upstream("y", "fork/y")
            .with_upstream("z", "origin/z");
        let options = Options::default();

        let map = TrackingResolver::new(&repo, &options)
            .resolve(Scope::All)
            .unwrap();

        let remotes = repo.remote_branches(false).unwrap();
        assert_eq!(map.len(), 2);
        assert!(map.iter().all(|(_, remote)| remotes.contains(remote)));
    }

    #[test]
    fn test_single_branch_scope() {
        let repo = repo_a_tracks_live_b_tracks_deleted();
        let options = Options::default();
        let resolver = TrackingResolver::new(&repo, &options);

        assert_eq!(
            resolver.upstream_of("a").unwrap().as_ref().map(RefName::as_str),
            Some("origin/a")
        );
        assert_eq!(resolver.upstream_of("b").unwrap(), None);
        assert_eq!(resolver.upstream_of("c").unwrap(), None);
    }

    #[test]
    fn test_remote_target_falls_back_to_default_remote() {
        let repo = MockGitOps::new().with_branch("work", "1");
        let options = Options::default();
        let resolver = TrackingResolver::new(&repo, &options);

        let target = resolver.remote_target("work", None, None, "origin").unwrap();
        assert_eq!(target.to_string(), "origin/work");
    }

    #[test]
    fn test_remote_target_uses_tracked_upstream() {
        let repo = MockGitOps::new()
            .with_branch("work", "1")
            .with_remote_branch("fork/feature/work", "1")
            .with_upstream("work", "fork/feature/work");
        let options = Options::default();
        let resolver = TrackingResolver::new(&repo, &options);

        let target = resolver.remote_target("work", None, None, "origin").unwrap();
        assert_eq!(target.remote, "fork");
        assert_eq!(target.branch, "feature/work");

        let target = resolver
            .remote_target("work", None, Some("renamed"), "origin")
            .unwrap();
        assert_eq!(target.to_string(), "fork/renamed");
    }

    #[test]
    fn test_remote_target_explicit_remote_skips_lookup() {
        let repo = MockGitOps::new()
            .with_branch("work", "1")
            .with_remote_branch("fork/other", "1")
            .with_upstream("work", "fork/other");
        let options = Options::default();
        let resolver = TrackingResolver::new(&repo, &options);

        let target = resolver
            .remote_target("work", Some("backup"), None, "origin")
            .unwrap();
        assert_eq!(target.to_string(), "backup/work");
    }

    #[test]
    fn test_tracking_map_serializes_as_object() {
        let repo = repo_a_tracks_live_b_tracks_deleted();
        let options = Options::default();
        let map = TrackingResolver::new(&repo, &options)
            .resolve(Scope::All)
            .unwrap();

        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"a":"origin/a"}"#);
        assert_eq!(map.widest_local(), 1);
        assert_eq!(map.widest_remote(), 8);
    }
}
