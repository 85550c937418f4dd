//! Parsers for git's textual output.
//!
//! Every regex and split in the crate lives here so the rest of the code
//! only sees typed values.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::LazyLock;

use regex::Regex;
use crate::types::RefName;

const HEADS_PREFIX: &str = "refs/heads/";
const REMOTES_PREFIX: &str = "refs/remotes/";

#[allow(clippy::unwrap_used)]
static TRACK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\[(?:ahead (?P<ahead>\d+))?(?:, )?(?:behind (?P<behind>\d+))?\]$").unwrap()
});

/// Relationship of a local branch to its upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncState {
    /// Same commit as the upstream.
    InSync,
    /// Local branch has commits the upstream lacks.
    Ahead { commits: usize },
    /// Upstream has commits the local branch lacks.
    Behind { commits: usize },
    /// Both sides have unique commits.
    Diverged { ahead: usize, behind: usize },
    /// The configured upstream no longer exists.
    Gone,
}

/// Parse `<objectname> <refname>` lines under `refs/heads` into branch names.
#[must_use]
pub fn local_heads(output: &str) -> BTreeSet<RefName> {
    output
        .lines()
        .filter_map(|line| line.split_whitespace().nth(1))
        .filter_map(|refname| refname.strip_prefix(HEADS_PREFIX))
        .map(RefName::new)
        .collect()
}

/// Parse a list of full `refs/remotes/...` names into `remote/branch` names.
///
/// Symbolic `remote/HEAD` entries are skipped.
#[must_use]
pub fn remote_refs(output: &str) -> BTreeSet<RefName> {
    output
        .lines()
        .map(str::trim)
        .filter_map(|line| line.strip_prefix(REMOTES_PREFIX))
        .filter(|name| !name.ends_with("/HEAD"))
        .map(RefName::new)
        .collect()
}

/// Parse `for-each-ref --format=%(refname)%09%(upstream) refs/heads`.
///
/// Returns each local branch with its remote upstream. Branches without an
/// upstream, or whose upstream is another local branch, map to `None`.
#[must_use]
pub fn upstreams(output: &str) -> Vec<(RefName, Option<RefName>)> {
    output
        .lines()
        .filter_map(|line| {
            let (local, upstream) = line.split_once('\t').unwrap_or((line, ""));
            let local = local.trim().strip_prefix(HEADS_PREFIX)?;
            let upstream = upstream
                .trim()
                .strip_prefix(REMOTES_PREFIX)
                .map(RefName::new);
            Some((RefName::new(local), upstream))
        })
        .collect()
}

/// Parse an `%(upstream:track)` value such as `[ahead 2, behind 1]`.
#[must_use]
pub fn track(value: &str) -> SyncState {
    let value = value.trim();
    if value.is_empty() {
        return SyncState::InSync;
    }
    if value == "[gone]" {
        return SyncState::Gone;
    }

    let Some(caps) = TRACK_RE.captures(value) else {
        return SyncState::InSync;
    };
    let count = |name: &str| {
        caps.name(name)
            .and_then(|m| m.as_str().parse::<usize>().ok())
            .unwrap_or(0)
    };

    match (count("ahead"), count("behind")) {
        (0, 0) => SyncState::InSync,
        (ahead, 0) => SyncState::Ahead { commits: ahead },
        (0, behind) => SyncState::Behind { commits: behind },
        (ahead, behind) => SyncState::Diverged { ahead, behind },
    }
}

/// Parse `for-each-ref --format=%(refname)%09%(upstream)%09%(upstream:track)`.
///
/// Only branches that have an upstream appear in the result.
#[must_use]
pub fn sync_states(output: &str) -> BTreeMap<String, SyncState> {
    output
        .lines()
        .filter_map(|line| {
            let mut fields = line.split('\t');
            let local = fields.next()?.trim().strip_prefix(HEADS_PREFIX)?;
            let upstream = fields.next().unwrap_or("").trim();
            if upstream.is_empty() {
                return None;
            }
            let state = track(fields.next().unwrap_or(""));
            Some((local.to_string(), state))
        })
        .collect()
}

/// Parse `git name-rev --name-only <commit>`.
///
/// Strips a leading `remotes/` namespace. Returns `None` when git could not
/// name the commit.
#[must_use]
pub fn name_rev(output: &str) -> Option<String> {
    let name = output.lines().next()?.trim();
    // Older git prints "<sha> <name>" even with --name-only on some paths.
    let name = name.rsplit(' ').next().unwrap_or(name);
    if name.is_empty() || name == "undefined" {
        return None;
    }
    let name = name.strip_prefix("remotes/").unwrap_or(name);
    Some(name.to_string())
}

/// Parse `git remote`.
#[must_use]
pub fn remotes(output: &str) -> Vec<String> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

/// Parse `git rev-list` output into a commit count.
#[must_use]
pub fn line_count(output: &str) -> usize {
    output.lines().filter(|line| !line.trim().is_empty()).count()
}
