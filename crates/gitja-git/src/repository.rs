//! Repository wrapper answering ref questions through the git binary.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{Error, Result};
use crate::parse;
use crate::runner::{CommandRunner, GitRunner};
use crate::traits::{GitOps, LogOrder, RefQuery, Scope};
use crate::types::{CommitId, RefName};

/// Pretty format for divergence graphs: red short id, tab, green
/// decorations, reset, space, subject.
const GRAPH_FORMAT_COLOR: &str = "--pretty=format:%x1b[31m%h%x09%x1b[32m%d%x1b[0m%x20%s";
const GRAPH_FORMAT_PLAIN: &str = "--pretty=format:%h%x09%d%x20%s";

const RANGE_FORMAT_COLOR: &str = "--pretty=format:%Cgreen%H %Cblue%d%Creset%n%B";
const RANGE_FORMAT_PLAIN: &str = "--pretty=format:%H %d%n%B";

/// High-level wrapper around a git work tree.
pub struct Repository<R: CommandRunner = GitRunner> {
    runner: R,
}

impl Repository<GitRunner> {
    /// Open the repository containing `path`.
    ///
    /// # Errors
    /// Returns error if no repository is found at `path` or any parent.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::with_runner(GitRunner::discover(path)?))
    }

    /// Open the repository containing the current directory.
    ///
    /// # Errors
    /// Returns error if not inside a git repository.
    pub fn open_current() -> Result<Self> {
        Self::open(".")
    }

    /// Path to the repository root (workdir).
    #[must_use]
    pub fn workdir(&self) -> &Path {
        self.runner.workdir()
    }
}

impl<R: CommandRunner> Repository<R> {
    /// Wrap an existing runner.
    pub const fn with_runner(runner: R) -> Self {
        Self { runner }
    }

    /// Absolute path to the `.git` directory.
    ///
    /// # Errors
    /// Returns error if git cannot report it.
    pub fn git_dir(&self) -> Result<PathBuf> {
        let dir = self.runner.run(&["rev-parse", "--absolute-git-dir"])?;
        Ok(PathBuf::from(dir.trim()))
    }

    /// Access the underlying runner.
    #[must_use]
    pub const fn runner(&self) -> &R {
        &self.runner
    }
}

impl<R: CommandRunner> RefQuery for Repository<R> {
    fn local_branches(&self) -> Result<BTreeSet<RefName>> {
        // Same shape as `git show-ref --heads`, but succeeds on unborn repos.
        let output = self.runner.run(&[
            "for-each-ref",
            "--format=%(objectname) %(refname)",
            "refs/heads",
        ])?;
        Ok(parse::local_heads(&output))
    }

    fn remote_branches(&self, force_refresh: bool) -> Result<BTreeSet<RefName>> {
        if force_refresh {
            info!("Getting information from remotes");
            self.fetch_all()?;
        }
        let output = self
            .runner
            .run(&["for-each-ref", "--format=%(refname)", "refs/remotes"])?;
        Ok(parse::remote_refs(&output))
    }

    fn current_branch(&self) -> Result<RefName> {
        let name = self.runner.run(&["rev-parse", "--abbrev-ref", "HEAD"])?;
        let name = RefName::new(name);
        if name == "HEAD" {
            return Err(Error::DetachedHead);
        }
        Ok(name)
    }

    fn ref_exists(&self, name: &str) -> bool {
        let spec = format!("{name}^{{commit}}");
        self.runner
            .probe(&["rev-parse", "--verify", "--quiet", &spec])
    }

    fn merge_base(&self, refs: &[RefName]) -> Result<CommitId> {
        if refs.is_empty() {
            return Err(Error::EmptyRefList);
        }

        let mut args = vec!["merge-base", "--octopus"];
        args.extend(refs.iter().map(RefName::as_str));

        let no_history = || Error::NoCommonHistory(refs.iter().map(ToString::to_string).collect());

        match self.runner.run(&args) {
            Ok(output) => output
                .lines()
                .map(str::trim)
                .find(|line| !line.is_empty())
                .map(CommitId::new)
                .ok_or_else(no_history),
            Err(Error::ExternalCommand { .. }) => {
                if let Some(invalid) = refs.iter().find(|r| !self.ref_exists(r)) {
                    return Err(Error::InvalidRef(invalid.to_string()));
                }
                Err(no_history())
            }
            Err(e) => Err(e),
        }
    }

    fn commit_name(&self, commit: &CommitId) -> Result<String> {
        let output = self
            .runner
            .run(&["name-rev", "--name-only", commit.as_str()])?;
        Ok(parse::name_rev(&output).unwrap_or_else(|| commit.short().to_string()))
    }

    fn commit_id(&self, name: &str) -> Result<CommitId> {
        let spec = format!("{name}^{{commit}}");
        self.runner
            .run(&["rev-parse", "--verify", "--quiet", &spec])
            .map(CommitId::new)
            .map_err(|_| Error::InvalidRef(name.to_string()))
    }

    fn upstreams(&self, scope: Scope<'_>) -> Result<Vec<(RefName, Option<RefName>)>> {
        let pattern = match scope {
            Scope::All => "refs/heads".to_string(),
            Scope::Branch(branch) => format!("refs/heads/{branch}"),
        };
        let output = self.runner.run(&[
            "for-each-ref",
            "--format=%(refname)%09%(upstream)",
            &pattern,
        ])?;
        let mut parsed = parse::upstreams(&output);
        // for-each-ref patterns also match `refs/heads/<branch>/*`
        if let Scope::Branch(branch) = scope {
            parsed.retain(|(local, _)| local == branch);
        }
        Ok(parsed)
    }

    fn sync_states(&self) -> Result<BTreeMap<String, parse::SyncState>> {
        let output = self.runner.run(&[
            "for-each-ref",
            "--format=%(refname)%09%(upstream)%09%(upstream:track)",
            "refs/heads",
        ])?;
        Ok(parse::sync_states(&output))
    }

    fn remotes(&self) -> Result<Vec<String>> {
        let output = self.runner.run(&["remote"])?;
        Ok(parse::remotes(&output))
    }

    fn count_commits_between(&self, from: &str, to: &str) -> Result<usize> {
        let range = format!("{from}..{to}");
        let output = self.runner.run(&["rev-list", &range])?;
        Ok(parse::line_count(&output))
    }
}

impl<R: CommandRunner> GitOps for Repository<R> {
    fn unset_upstream(&self, branch: &str) -> Result<()> {
        self.runner.run(&["branch", "--unset-upstream", branch])?;
        Ok(())
    }

    fn delete_branch(&self, branch: &str, force: bool) -> Result<()> {
        let switch = if force { "-D" } else { "-d" };
        self.runner.run(&["branch", switch, branch])?;
        Ok(())
    }

    fn checkout(&self, branch: &str) -> Result<()> {
        self.runner.run(&["checkout", "-q", branch])?;
        Ok(())
    }

    fn merge_ff(&self, target: &str) -> Result<()> {
        self.runner.run(&["merge", "--ff-only", "-q", target])?;
        Ok(())
    }

    fn is_dirty(&self) -> bool {
        // Stat-only changes would otherwise count as modifications.
        self.runner.probe(&["update-index", "-q", "--refresh"]);
        !self
            .runner
            .probe(&["diff-index", "--quiet", "HEAD", "--"])
    }

    fn push(
        &self,
        remote: &str,
        local: &str,
        remote_branch: &str,
        set_upstream: bool,
    ) -> Result<()> {
        let refspec = format!("{local}:{remote_branch}");
        let mut args = vec!["push"];
        if set_upstream {
            args.push("-u");
        }
        args.extend([remote, refspec.as_str()]);
        self.runner.run(&args)?;
        Ok(())
    }

    fn delete_remote_branch(&self, remote: &str, branch: &str) -> Result<()> {
        let refspec = format!(":{branch}");
        self.runner.run(&["push", remote, &refspec])?;
        Ok(())
    }

    fn fetch_all(&self) -> Result<()> {
        self.runner.run(&["fetch", "--all", "--prune"])?;
        Ok(())
    }

    fn remote_update(&self) -> Result<String> {
        self.runner.run(&["remote", "update", "--prune"])
    }

    fn remote_show(&self, remote: &str, offline: bool) -> Result<String> {
        let mut args = vec!["remote", "show"];
        if offline {
            args.push("-n");
        }
        args.push(remote);
        self.runner.run(&args)
    }

    fn log_graph(
        &self,
        base: &CommitId,
        refs: &[RefName],
        order: LogOrder,
        color: bool,
    ) -> Result<String> {
        let exclude = format!("^{base}");
        let mut args = vec![
            "log",
            order.flag(),
            "--graph",
            if color { "--color=always" } else { "--color=never" },
            if color {
                GRAPH_FORMAT_COLOR
            } else {
                GRAPH_FORMAT_PLAIN
            },
            exclude.as_str(),
        ];
        args.extend(refs.iter().map(RefName::as_str));
        self.runner.run(&args)
    }

    fn log_range(&self, from: &str, to: &str, color: bool) -> Result<String> {
        let range = format!("{from}..{to}");
        self.runner.run(&[
            "log",
            if color { "--color=always" } else { "--color=never" },
            if color {
                RANGE_FORMAT_COLOR
            } else {
                RANGE_FORMAT_PLAIN
            },
            &range,
        ])
    }
}

impl<R: CommandRunner> std::fmt::Debug for Repository<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repository").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use std::cell::RefCell;
    use std::collections::HashMap;

    use super::*;

    /// Runner answering from a script keyed by the joined argument list.
    #[derive(Default)]
    struct ScriptedRunner {
        responses: HashMap<String, std::result::Result<String, i32>>,
        calls: RefCell<Vec<String>>,
    }

    impl ScriptedRunner {
        fn ok(mut self, args: &str, output: &str) -> Self {
            self.responses.insert(args.to_string(), Ok(output.to_string()));
            self
        }

        fn fail(mut self, args: &str, code: i32) -> Self {
            self.responses.insert(args.to_string(), Err(code));
            self
        }

        fn calls(&self) -> Vec<String> {
            self.calls.borrow().clone()
        }
    }

    impl CommandRunner for ScriptedRunner {
        fn run(&self, args: &[&str]) -> Result<String> {
            let key = args.join(" ");
            self.calls.borrow_mut().push(key.clone());
            match self.responses.get(&key) {
                Some(Ok(output)) => Ok(output.clone()),
                Some(Err(code)) => Err(Error::ExternalCommand {
                    command: format!("git {key}"),
                    code: Some(*code),
                    diagnostic: "scripted failure".to_string(),
                }),
                None => panic!("unexpected git call: {key}"),
            }
        }

        fn probe(&self, args: &[&str]) -> bool {
            self.run(args).is_ok()
        }
    }

    #[test]
    fn test_current_branch_detached() {
        let runner = ScriptedRunner::default().ok("rev-parse --abbrev-ref HEAD", "HEAD\n");
        let repo = Repository::with_runner(runner);
        assert!(matches!(repo.current_branch(), Err(Error::DetachedHead)));
    }

    #[test]
    fn test_current_branch() {
        let runner = ScriptedRunner::default().ok("rev-parse --abbrev-ref HEAD", "work\n");
        let repo = Repository::with_runner(runner);
        assert_eq!(repo.current_branch().unwrap(), "work");
    }

    #[test]
    fn test_remote_branches_refreshes_first_when_forced() {
        let runner = ScriptedRunner::default()
            .ok("fetch --all --prune", "")
            .ok(
                "for-each-ref --format=%(refname) refs/remotes",
                "refs/remotes/origin/HEAD\nrefs/remotes/origin/a",
            );
        let repo = Repository::with_runner(runner);

        let remotes = repo.remote_branches(true).unwrap();
        assert_eq!(remotes.len(), 1);
        assert!(remotes.contains(&RefName::new("origin/a")));
        assert_eq!(
            repo.runner().calls(),
            [
                "fetch --all --prune",
                "for-each-ref --format=%(refname) refs/remotes"
            ]
        );
    }

    #[test]
    fn test_remote_branches_no_refresh() {
        let runner = ScriptedRunner::default().ok(
            "for-each-ref --format=%(refname) refs/remotes",
            "refs/remotes/origin/a",
        );
        let repo = Repository::with_runner(runner);
        repo.remote_branches(false).unwrap();
        assert_eq!(repo.runner().calls().len(), 1);
    }

    #[test]
    fn test_ref_exists_is_a_probe() {
        let runner = ScriptedRunner::default()
            .ok("rev-parse --verify --quiet main^{commit}", "abc")
            .fail("rev-parse --verify --quiet nope^{commit}", 1);
        let repo = Repository::with_runner(runner);
        assert!(repo.ref_exists("main"));
        assert!(!repo.ref_exists("nope"));
    }

    #[test]
    fn test_merge_base_first_line() {
        let runner = ScriptedRunner::default()
            .ok("merge-base --octopus main feature", "abc123\n");
        let repo = Repository::with_runner(runner);
        let base = repo
            .merge_base(&[RefName::new("main"), RefName::new("feature")])
            .unwrap();
        assert_eq!(base.as_str(), "abc123");
    }

    #[test]
    fn test_merge_base_empty_list() {
        let repo = Repository::with_runner(ScriptedRunner::default());
        assert!(matches!(repo.merge_base(&[]), Err(Error::EmptyRefList)));
    }

    #[test]
    fn test_merge_base_no_common_history() {
        let runner = ScriptedRunner::default()
            .fail("merge-base --octopus main orphan", 1)
            .ok("rev-parse --verify --quiet main^{commit}", "a")
            .ok("rev-parse --verify --quiet orphan^{commit}", "b");
        let repo = Repository::with_runner(runner);
        let err = repo
            .merge_base(&[RefName::new("main"), RefName::new("orphan")])
            .unwrap_err();
        assert!(matches!(err, Error::NoCommonHistory(refs) if refs == ["main", "orphan"]));
    }

    #[test]
    fn test_merge_base_invalid_ref() {
        let runner = ScriptedRunner::default()
            .fail("merge-base --octopus main typo", 128)
            .ok("rev-parse --verify --quiet main^{commit}", "a")
            .fail("rev-parse --verify --quiet typo^{commit}", 1);
        let repo = Repository::with_runner(runner);
        let err = repo
            .merge_base(&[RefName::new("main"), RefName::new("typo")])
            .unwrap_err();
        assert!(matches!(err, Error::InvalidRef(name) if name == "typo"));
    }

    #[test]
    fn test_commit_name_strips_remote_namespace() {
        let runner = ScriptedRunner::default()
            .ok("name-rev --name-only abcdef0123", "remotes/origin/main")
            .ok("name-rev --name-only 0000000000", "undefined");
        let repo = Repository::with_runner(runner);
        assert_eq!(
            repo.commit_name(&CommitId::new("abcdef0123")).unwrap(),
            "origin/main"
        );
        assert_eq!(
            repo.commit_name(&CommitId::new("0000000000")).unwrap(),
            "0000000"
        );
    }

    #[test]
    fn test_upstreams_single_branch_filters_nested() {
        let runner = ScriptedRunner::default().ok(
            "for-each-ref --format=%(refname)%09%(upstream) refs/heads/a",
            "refs/heads/a\trefs/remotes/origin/a\nrefs/heads/a/sub\trefs/remotes/origin/sub",
        );
        let repo = Repository::with_runner(runner);
        let upstreams = repo.upstreams(Scope::Branch("a")).unwrap();
        assert_eq!(upstreams.len(), 1);
        assert_eq!(upstreams[0].0, "a");
    }

    #[test]
    fn test_push_with_upstream() {
        let runner = ScriptedRunner::default().ok("push -u origin work:work", "");
        let repo = Repository::with_runner(runner);
        repo.push("origin", "work", "work", true).unwrap();
        assert_eq!(repo.runner().calls(), ["push -u origin work:work"]);
    }

    #[test]
    fn test_push_failure_propagates_exit_code() {
        let runner = ScriptedRunner::default().fail("push origin work:work", 128);
        let repo = Repository::with_runner(runner);
        let err = repo.push("origin", "work", "work", false).unwrap_err();
        assert_eq!(err.exit_code(), Some(128));
    }

    #[test]
    fn test_delete_remote_branch_refspec() {
        let runner = ScriptedRunner::default().ok("push origin :old", "");
        let repo = Repository::with_runner(runner);
        repo.delete_remote_branch("origin", "old").unwrap();
    }

    #[test]
    fn test_log_graph_arguments() {
        let runner = ScriptedRunner::default().ok(
            "log --topo-order --graph --color=never --pretty=format:%h%x09%d%x20%s ^abc main feature",
            "* 1 one",
        );
        let repo = Repository::with_runner(runner);
        let graph = repo
            .log_graph(
                &CommitId::new("abc"),
                &[RefName::new("main"), RefName::new("feature")],
                LogOrder::Topo,
                false,
            )
            .unwrap();
        assert_eq!(graph, "* 1 one");
    }

    #[test]
    fn test_is_dirty() {
        let clean = ScriptedRunner::default()
            .ok("update-index -q --refresh", "")
            .ok("diff-index --quiet HEAD --", "");
        let clean = Repository::with_runner(clean);
        assert!(!clean.is_dirty());
        assert_eq!(
            clean.runner().calls(),
            ["update-index -q --refresh", "diff-index --quiet HEAD --"]
        );

        let dirty = ScriptedRunner::default()
            .fail("update-index -q --refresh", 1)
            .fail("diff-index --quiet HEAD --", 1);
        assert!(Repository::with_runner(dirty).is_dirty());
    }

    #[test]
    fn test_rewritten_unchanged_file_is_clean() {
        let temp = tempfile::TempDir::new().expect("Failed to create temp dir");
        let git = |args: &[&str]| {
            let status = std::process::Command::new("git")
                .args(args)
                .current_dir(temp.path())
                .status()
                .expect("Failed to run git");
            assert!(status.success(), "git {args:?} failed");
        };
        git(&["init", "-q"]);
        git(&["config", "user.email", "test@example.com"]);
        git(&["config", "user.name", "Test User"]);
        std::fs::write(temp.path().join("a.txt"), "same\n").unwrap();
        git(&["add", "."]);
        git(&["commit", "-q", "-m", "init"]);

        std::thread::sleep(std::time::Duration::from_millis(20));
        std::fs::write(temp.path().join("a.txt"), "same\n").unwrap();
        let repo = Repository::with_runner(crate::runner::GitRunner::new(temp.path()));
        assert!(!repo.is_dirty());

        std::fs::write(temp.path().join("a.txt"), "changed\n").unwrap();
        assert!(repo.is_dirty());
    }
}
