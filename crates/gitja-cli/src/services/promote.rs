//! Promote service: push local branches to their remote.

use anyhow::Result;
use gitja_core::{Error, Options, RemoteTarget, TrackingResolver};
use gitja_git::GitOps;

/// Flags shared by every branch of one promote run.
#[derive(Debug, Clone, Default)]
pub struct PromoteRequest {
    pub remote: Option<String>,
    pub remote_branch: Option<String>,
    pub set_upstream: bool,
    pub allow_dirty: bool,
}

/// Service for promote operations with trait-based dependencies.
pub struct PromoteService<'a, G: GitOps> {
    repo: &'a G,
    options: &'a Options,
    default_remote: &'a str,
}

impl<'a, G: GitOps> PromoteService<'a, G> {
    /// Create a new promote service.
    #[must_use]
    pub const fn new(repo: &'a G, options: &'a Options, default_remote: &'a str) -> Self {
        Self {
            repo,
            options,
            default_remote,
        }
    }

    /// Refuse to run on a dirty working tree unless allowed.
    pub fn ensure_clean(&self, request: &PromoteRequest) -> Result<()> {
        if !request.allow_dirty && self.repo.is_dirty() {
            return Err(Error::DirtyWorkingTree.into());
        }
        Ok(())
    }

    /// Where `branch` would be pushed.
    pub fn target(&self, branch: &str, request: &PromoteRequest) -> Result<RemoteTarget> {
        Ok(TrackingResolver::new(self.repo, self.options).remote_target(
            branch,
            request.remote.as_deref(),
            request.remote_branch.as_deref(),
            self.default_remote,
        )?)
    }

    /// Push `branch` to `target`.
    pub fn push(&self, branch: &str, target: &RemoteTarget, request: &PromoteRequest) -> Result<()> {
        self.repo
            .push(&target.remote, branch, &target.branch, request.set_upstream)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use gitja_git::testing::MockGitOps;

    #[test]
    fn test_current_branch_without_upstream_goes_to_origin() {
        let repo = MockGitOps::new()
            .with_current_branch("work")
            .with_branch("work", "1");
        let options = Options::default();
        let service = PromoteService::new(&repo, &options, "origin");
        let request = PromoteRequest::default();

        service.ensure_clean(&request).unwrap();
        let target = service.target("work", &request).unwrap();
        service.push("work", &target, &request).unwrap();

        assert_eq!(repo.calls(), ["push origin work:work"]);
    }

    #[test]
    fn test_tracked_upstream_and_overrides() {
        let repo = MockGitOps::new()
            .with_branch("work", "1")
            .with_remote_branch("fork/topic", "1")
            .with_upstream("work", "fork/topic");
        let options = Options::default();
        let service = PromoteService::new(&repo, &options, "origin");

        let tracked = service.target("work", &PromoteRequest::default()).unwrap();
        assert_eq!(tracked.to_string(), "fork/topic");

        let request = PromoteRequest {
            remote: Some("backup".into()),
            remote_branch: Some("saved".into()),
            set_upstream: true,
            ..PromoteRequest::default()
        };
        let target = service.target("work", &request).unwrap();
        service.push("work", &target, &request).unwrap();
        assert_eq!(repo.calls(), ["push -u backup work:saved"]);
    }

    #[test]
    fn test_dirty_tree_is_refused() {
        let repo = MockGitOps::new().with_dirty(true);
        let options = Options::default();
        let service = PromoteService::new(&repo, &options, "origin");

        let err = service.ensure_clean(&PromoteRequest::default()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<Error>(),
            Some(Error::DirtyWorkingTree)
        ));

        let allowed = PromoteRequest {
            allow_dirty: true,
            ..PromoteRequest::default()
        };
        assert!(service.ensure_clean(&allowed).is_ok());
    }

    #[test]
    fn test_push_failure_propagates() {
        let repo = MockGitOps::new()
            .with_branch("work", "1")
            .with_push_failure("work");
        let options = Options::default();
        let service = PromoteService::new(&repo, &options, "origin");
        let request = PromoteRequest::default();

        let target = service.target("work", &request).unwrap();
        assert!(service.push("work", &target, &request).is_err());
    }
}
