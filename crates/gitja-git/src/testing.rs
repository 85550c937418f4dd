//! In-memory [`GitOps`] implementation for unit tests.
//!
//! Enabled with the `testing` feature. Mutations and renders are recorded
//! as git-like command strings so tests can assert on side effects.

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use crate::parse::SyncState;
use crate::{CommitId, Error, GitOps, LogOrder, RefName, RefQuery, Result, Scope};

/// Mock repository state.
#[derive(Default)]
pub struct MockGitOps {
    pub current_branch: RefCell<Option<String>>,
    pub local: RefCell<BTreeSet<RefName>>,
    pub remote: RefCell<BTreeSet<RefName>>,
    pub upstreams: RefCell<BTreeMap<String, RefName>>,
    pub commits: RefCell<HashMap<String, CommitId>>,
    pub merge_base: RefCell<Option<CommitId>>,
    pub names: RefCell<HashMap<String, String>>,
    pub sync: RefCell<BTreeMap<String, SyncState>>,
    pub remotes: RefCell<Vec<String>>,
    pub counts: RefCell<HashMap<(String, String), usize>>,
    pub dirty: RefCell<bool>,
    pub push_failures: RefCell<HashSet<String>>,
    pub merge_failures: RefCell<HashSet<String>>,
    pub gone_on_fetch: RefCell<BTreeSet<RefName>>,
    pub calls: RefCell<Vec<String>>,
}

impl MockGitOps {
    #[must_use]
    pub fn new() -> Self {
        Self {
            current_branch: RefCell::new(Some("main".to_string())),
            remotes: RefCell::new(vec!["origin".to_string()]),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_current_branch(self, name: &str) -> Self {
        *self.current_branch.borrow_mut() = Some(name.to_string());
        self
    }

    #[must_use]
    pub fn with_detached_head(self) -> Self {
        *self.current_branch.borrow_mut() = None;
        self
    }

    /// Add a local branch pointing at `commit`.
    #[must_use]
    pub fn with_branch(self, name: &str, commit: &str) -> Self {
        self.local.borrow_mut().insert(RefName::new(name));
        self.commits
            .borrow_mut()
            .insert(name.to_string(), CommitId::new(commit));
        self
    }

    /// Add a remote-tracking branch (`remote/branch`) pointing at `commit`.
    #[must_use]
    pub fn with_remote_branch(self, name: &str, commit: &str) -> Self {
        self.remote.borrow_mut().insert(RefName::new(name));
        self.commits
            .borrow_mut()
            .insert(name.to_string(), CommitId::new(commit));
        self
    }

    /// Configure `local` to track `remote`, whether or not `remote` exists.
    #[must_use]
    pub fn with_upstream(self, local: &str, remote: &str) -> Self {
        self.upstreams
            .borrow_mut()
            .insert(local.to_string(), RefName::new(remote));
        self
    }

    #[must_use]
    pub fn with_merge_base(self, commit: &str) -> Self {
        *self.merge_base.borrow_mut() = Some(CommitId::new(commit));
        self
    }

    #[must_use]
    pub fn with_commit_name(self, commit: &str, name: &str) -> Self {
        self.names
            .borrow_mut()
            .insert(commit.to_string(), name.to_string());
        self
    }

    #[must_use]
    pub fn with_sync_state(self, branch: &str, state: SyncState) -> Self {
        self.sync.borrow_mut().insert(branch.to_string(), state);
        self
    }

    #[must_use]
    pub fn with_count(self, from: &str, to: &str, count: usize) -> Self {
        self.counts
            .borrow_mut()
            .insert((from.to_string(), to.to_string()), count);
        self
    }

    #[must_use]
    pub fn with_dirty(self, dirty: bool) -> Self {
        *self.dirty.borrow_mut() = dirty;
        self
    }

    #[must_use]
    pub fn with_push_failure(self, local: &str) -> Self {
        self.push_failures.borrow_mut().insert(local.to_string());
        self
    }

    /// Fast-forward onto `target` fails.
    #[must_use]
    pub fn with_merge_failure(self, target: &str) -> Self {
        self.merge_failures.borrow_mut().insert(target.to_string());
        self
    }

    /// Remote branch that disappears when remotes are fetched and pruned.
    #[must_use]
    pub fn with_gone_on_fetch(self, name: &str) -> Self {
        self.gone_on_fetch.borrow_mut().insert(RefName::new(name));
        self
    }

    /// Every recorded call, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    /// Recorded calls starting with `prefix`.
    #[must_use]
    pub fn calls_matching(&self, prefix: &str) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .filter(|call| call.starts_with(prefix))
            .cloned()
            .collect()
    }

    fn record(&self, call: impl Into<String>) {
        self.calls.borrow_mut().push(call.into());
    }

    fn failure(command: String) -> Error {
        Error::ExternalCommand {
            command,
            code: Some(1),
            diagnostic: "mock failure".to_string(),
        }
    }
}

impl RefQuery for MockGitOps {
    fn local_branches(&self) -> Result<BTreeSet<RefName>> {
        Ok(self.local.borrow().clone())
    }

    fn remote_branches(&self, force_refresh: bool) -> Result<BTreeSet<RefName>> {
        if force_refresh {
            self.fetch_all()?;
        }
        Ok(self.remote.borrow().clone())
    }

    fn current_branch(&self) -> Result<RefName> {
        self.current_branch
            .borrow()
            .as_deref()
            .map(RefName::new)
            .ok_or(Error::DetachedHead)
    }

    fn ref_exists(&self, name: &str) -> bool {
        self.commits.borrow().contains_key(name)
    }

    fn merge_base(&self, refs: &[RefName]) -> Result<CommitId> {
        if refs.is_empty() {
            return Err(Error::EmptyRefList);
        }
        let names: Vec<String> = refs.iter().map(ToString::to_string).collect();
        self.record(format!("merge-base --octopus {}", names.join(" ")));

        if let Some(invalid) = refs.iter().find(|r| !self.ref_exists(r)) {
            return Err(Error::InvalidRef(invalid.to_string()));
        }
        self.merge_base
            .borrow()
            .clone()
            .ok_or(Error::NoCommonHistory(names))
    }

    fn commit_name(&self, commit: &CommitId) -> Result<String> {
        Ok(self
            .names
            .borrow()
            .get(commit.as_str())
            .cloned()
            .unwrap_or_else(|| commit.short().to_string()))
    }

    fn commit_id(&self, name: &str) -> Result<CommitId> {
        self.commits
            .borrow()
            .get(name)
            .cloned()
            .ok_or_else(|| Error::InvalidRef(name.to_string()))
    }

    fn upstreams(&self, scope: Scope<'_>) -> Result<Vec<(RefName, Option<RefName>)>> {
        let upstreams = self.upstreams.borrow();
        Ok(self
            .local
            .borrow()
            .iter()
            .filter(|local| match scope {
                Scope::All => true,
                Scope::Branch(branch) => *local == branch,
            })
            .map(|local| (local.clone(), upstreams.get(local.as_str()).cloned()))
            .collect())
    }

    fn sync_states(&self) -> Result<BTreeMap<String, SyncState>> {
        Ok(self.sync.borrow().clone())
    }

    fn remotes(&self) -> Result<Vec<String>> {
        Ok(self.remotes.borrow().clone())
    }

    fn count_commits_between(&self, from: &str, to: &str) -> Result<usize> {
        Ok(self
            .counts
            .borrow()
            .get(&(from.to_string(), to.to_string()))
            .copied()
            .unwrap_or(0))
    }
}

impl GitOps for MockGitOps {
    fn unset_upstream(&self, branch: &str) -> Result<()> {
        self.record(format!("branch --unset-upstream {branch}"));
        self.upstreams.borrow_mut().remove(branch);
        Ok(())
    }

    fn delete_branch(&self, branch: &str, force: bool) -> Result<()> {
        let switch = if force { "-D" } else { "-d" };
        let command = format!("branch {switch} {branch}");
        self.record(command.clone());
        if !self.local.borrow_mut().remove(&RefName::new(branch)) {
            return Err(Self::failure(format!("git {command}")));
        }
        self.commits.borrow_mut().remove(branch);
        Ok(())
    }

    fn checkout(&self, branch: &str) -> Result<()> {
        self.record(format!("checkout {branch}"));
        *self.current_branch.borrow_mut() = Some(branch.to_string());
        Ok(())
    }

    fn merge_ff(&self, target: &str) -> Result<()> {
        let command = format!("merge --ff-only {target}");
        self.record(command.clone());
        if self.merge_failures.borrow().contains(target) {
            return Err(Self::failure(format!("git {command}")));
        }
        Ok(())
    }

    fn is_dirty(&self) -> bool {
        *self.dirty.borrow()
    }

    fn push(
        &self,
        remote: &str,
        local: &str,
        remote_branch: &str,
        set_upstream: bool,
    ) -> Result<()> {
        let flag = if set_upstream { " -u" } else { "" };
        let command = format!("push{flag} {remote} {local}:{remote_branch}");
        self.record(command.clone());
        if self.push_failures.borrow().contains(local) {
            return Err(Self::failure(format!("git {command}")));
        }
        self.remote
            .borrow_mut()
            .insert(RefName::new(format!("{remote}/{remote_branch}")));
        Ok(())
    }

    fn delete_remote_branch(&self, remote: &str, branch: &str) -> Result<()> {
        let command = format!("push {remote} :{branch}");
        self.record(command.clone());
        if self.push_failures.borrow().contains(branch) {
            return Err(Self::failure(format!("git {command}")));
        }
        self.remote
            .borrow_mut()
            .remove(&RefName::new(format!("{remote}/{branch}")));
        Ok(())
    }

    fn fetch_all(&self) -> Result<()> {
        self.record("fetch --all --prune");
        let gone = std::mem::take(&mut *self.gone_on_fetch.borrow_mut());
        self.remote.borrow_mut().retain(|name| !gone.contains(name));
        Ok(())
    }

    fn remote_update(&self) -> Result<String> {
        self.record("remote update --prune");
        self.fetch_all()?;
        Ok("Fetching origin".to_string())
    }

    fn remote_show(&self, remote: &str, offline: bool) -> Result<String> {
        let flag = if offline { " -n" } else { "" };
        self.record(format!("remote show{flag} {remote}"));
        Ok(format!("* remote {remote}"))
    }

    fn log_graph(
        &self,
        base: &CommitId,
        refs: &[RefName],
        order: LogOrder,
        _color: bool,
    ) -> Result<String> {
        let names: Vec<&str> = refs.iter().map(RefName::as_str).collect();
        self.record(format!("log {} ^{base} {}", order.flag(), names.join(" ")));
        Ok(names
            .iter()
            .map(|name| format!("* {name}"))
            .collect::<Vec<_>>()
            .join("\n"))
    }

    fn log_range(&self, from: &str, to: &str, _color: bool) -> Result<String> {
        self.record(format!("log {from}..{to}"));
        Ok(format!("{from}..{to}"))
    }
}
