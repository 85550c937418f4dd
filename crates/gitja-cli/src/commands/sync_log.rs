//! `git-ja sync-log` command - show what separates branches from their upstream.

use anyhow::Result;
use gitja_core::refs::DefaultRefs;
use gitja_core::sync;
use gitja_git::GitOps;
use tracing::debug;

use super::utils::{Session, join};
use crate::output;

/// Run the sync-log command.
pub fn run(session: &Session, refs: &[String]) -> Result<()> {
    let refs = session.refs(refs, DefaultRefs::Current)?;
    debug!("Using refs {}", join(&refs));

    let entries = sync::entries(&session.repo, &session.options, &refs)?;
    if entries.is_empty() {
        output::success("Everything is in sync");
        return Ok(());
    }

    for entry in &entries {
        output::header(&format!(
            "{} is {} of {} by {} commits:",
            entry.branch, entry.direction, entry.upstream, entry.commits
        ));
        let (from, to) = entry.range();
        output::detail(&session.repo.log_range(from, to, session.options.color)?);
        output::detail("");
    }
    Ok(())
}
